//! tsmodule Virtual File System
//!
//! The backing store for existence probes and source reads. Resolution never
//! touches `std::fs` directly, so tests can run against `MemoryFileSystem`
//! and hosts can wrap the native backend in middleware.
//!
//! # Usage
//! ```
//! use tsmodule_vfs::{MemoryFileSystem, VirtualFileSystem};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new();
//! fs.write_file(Path::new("/src/index.ts"), b"export {};").unwrap();
//! assert!(fs.exists(Path::new("/src/index.ts")));
//! ```

mod error;
mod memory;
pub mod middleware;
mod native;
mod r#trait;

pub use error::{VfsError, VfsResult};
pub use memory::MemoryFileSystem;
pub use middleware::{LayeredVFS, VfsBuilder};
pub use native::NativeFileSystem;
pub use r#trait::VirtualFileSystem;

