//! Guard that rejects writes

use super::{Middleware, Next, Stage};
use crate::{VfsError, VfsResult};
use std::path::Path;

/// Middleware that turns every write into `PermissionDenied`.
///
/// Resolution and loading only ever look at the disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadOnlyLayer;

impl ReadOnlyLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for ReadOnlyLayer {
    fn stage(&self) -> Stage {
        Stage::PreProcess
    }

    fn write_file(&self, path: &Path, _content: &[u8], _next: &dyn Next) -> VfsResult<()> {
        Err(VfsError::PermissionDenied {
            path: path.to_string_lossy().to_string(),
        })
    }
}
