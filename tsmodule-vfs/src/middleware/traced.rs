//! Tracing middleware for VFS operations

use super::{Middleware, Next, Stage};
use crate::VfsResult;
use std::path::Path;
use tracing::trace;
use tsmodule_config::Phase;

const TARGET: &str = Phase::Vfs.target();

/// Middleware that emits a `trace` event for every VFS operation
#[derive(Debug, Default, Clone, Copy)]
pub struct TracedLayer;

impl TracedLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for TracedLayer {
    fn stage(&self) -> Stage {
        Stage::Outer
    }

    fn read_file(&self, path: &Path, next: &dyn Next) -> VfsResult<Vec<u8>> {
        let result = next.read_file(path);
        match &result {
            Ok(bytes) => trace!(target: TARGET, path = %path.display(), bytes = bytes.len(), "read_file"),
            Err(e) => trace!(target: TARGET, path = %path.display(), error = %e, "read_file failed"),
        }
        result
    }

    fn write_file(&self, path: &Path, content: &[u8], next: &dyn Next) -> VfsResult<()> {
        trace!(target: TARGET, path = %path.display(), bytes = content.len(), "write_file");
        next.write_file(path, content)
    }

    fn exists(&self, path: &Path, next: &dyn Next) -> bool {
        let result = next.exists(path);
        trace!(target: TARGET, path = %path.display(), exists = result, "exists");
        result
    }

    fn is_file(&self, path: &Path, next: &dyn Next) -> bool {
        let result = next.is_file(path);
        trace!(target: TARGET, path = %path.display(), is_file = result, "is_file");
        result
    }

    fn is_dir(&self, path: &Path, next: &dyn Next) -> bool {
        let result = next.is_dir(path);
        trace!(target: TARGET, path = %path.display(), is_dir = result, "is_dir");
        result
    }
}
