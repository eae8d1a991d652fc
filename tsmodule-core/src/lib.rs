//! tsmodule Core - resolution, loading and the built-in transform
//!
//! Everything here is synchronous and stateless: the configuration, the VFS
//! and the transform are passed in by the caller, which owns memoization.
//!
//! # Example
//! ```
//! use std::path::Path;
//! use tsmodule_config::ExtensionConfig;
//! use tsmodule_core::{Resolution, ResolutionContext, SpecifierResolver};
//! use tsmodule_vfs::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::with_files([("/app/util.ts", "export {};")]);
//! let resolver = SpecifierResolver::new(&fs, Path::new("/app"));
//! let resolution = resolver.resolve("./util", &ResolutionContext::entry(), &ExtensionConfig::defaults());
//! assert_eq!(resolution.url().map(|u| u.path()), Some("/app/util.ts"));
//! ```

pub mod loader;
pub mod transform;

pub use loader::{
    DelegateReason, ExistenceProbe, FormatOutcome, LoadError, LoadOutcome, LoadResult,
    LoadTransformer, Resolution, ResolutionContext, SourceOutcome, SpecifierKind,
    SpecifierResolver,
};
pub use transform::{StripTransform, Transform, TransformError, TransformErrorKind, TransformRequest};
pub use url::Url;
