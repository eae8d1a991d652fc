//! VFS Middleware System
//!
//! Composable layers around a backend. The hooks wrap their backend in a
//! tracing layer and a read-only guard.

mod builder;
mod layered;
mod middleware;
mod stage;

pub use builder::VfsBuilder;
pub use layered::LayeredVFS;
pub use middleware::{Middleware, Next};
pub use stage::Stage;

// Built-in middlewares
pub mod read_only;
pub mod traced;

pub use read_only::ReadOnlyLayer;
pub use traced::TracedLayer;
