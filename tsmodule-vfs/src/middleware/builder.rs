//! VFS Builder for constructing middleware chains

use super::{LayeredVFS, Middleware};
use crate::VirtualFileSystem;
use std::sync::Arc;

/// Builder for constructing a VFS with middleware chain
///
/// # Example
/// ```
/// use tsmodule_vfs::{MemoryFileSystem, VfsBuilder, VirtualFileSystem};
/// use tsmodule_vfs::middleware::{ReadOnlyLayer, TracedLayer};
/// use std::path::Path;
///
/// let vfs = VfsBuilder::new(MemoryFileSystem::new())
///     .with(ReadOnlyLayer::new())
///     .with(TracedLayer::new())
///     .build();
/// assert!(vfs.write_file(Path::new("/a.ts"), b"").is_err());
/// ```
pub struct VfsBuilder {
    backend: Arc<dyn VirtualFileSystem>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl VfsBuilder {
    /// Create a new VFS builder with the given backend
    pub fn new(backend: impl VirtualFileSystem + 'static) -> Self {
        Self::from_arc(Arc::new(backend))
    }

    /// Create a builder over an already shared backend
    pub fn from_arc(backend: Arc<dyn VirtualFileSystem>) -> Self {
        Self {
            backend,
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the chain
    ///
    /// Middlewares are sorted by stage when built; insertion order breaks ties.
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middlewares.push(Box::new(middleware));
        self
    }

    /// Build the final VFS with middleware chain
    pub fn build(self) -> LayeredVFS {
        let mut middlewares = self.middlewares;
        middlewares.sort_by_key(|m| m.stage().priority());
        LayeredVFS::new(self.backend, middlewares)
    }
}
