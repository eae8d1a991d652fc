//! Middleware and chain-continuation traits

use super::Stage;
use crate::VfsResult;
use std::path::Path;

/// A layer around the backend.
///
/// Every probe and read the resolver or loader issues passes through the
/// installed layers in [`Stage`] order. A layer overrides only the operations
/// it cares about; the rest fall through to `next` unchanged.
pub trait Middleware: Send + Sync {
    fn stage(&self) -> Stage;

    fn read_file(&self, path: &Path, next: &dyn Next) -> VfsResult<Vec<u8>> {
        next.read_file(path)
    }

    fn write_file(&self, path: &Path, content: &[u8], next: &dyn Next) -> VfsResult<()> {
        next.write_file(path, content)
    }

    /// Existence answers must not be cached: resolution re-probes each time
    fn exists(&self, path: &Path, next: &dyn Next) -> bool {
        next.exists(path)
    }

    fn is_file(&self, path: &Path, next: &dyn Next) -> bool {
        next.is_file(path)
    }

    fn is_dir(&self, path: &Path, next: &dyn Next) -> bool {
        next.is_dir(path)
    }
}

/// The rest of the chain below the current layer, ending at the backend
pub trait Next {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>>;
    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}
