//! Layered VFS that executes a middleware chain

use super::{Middleware, Next};
use crate::{VfsResult, VirtualFileSystem};
use std::path::Path;
use std::sync::Arc;

/// VFS implementation that runs every operation through a middleware chain
/// before reaching the backend
pub struct LayeredVFS {
    backend: Arc<dyn VirtualFileSystem>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl LayeredVFS {
    pub(crate) fn new(backend: Arc<dyn VirtualFileSystem>, middlewares: Vec<Box<dyn Middleware>>) -> Self {
        Self {
            backend,
            middlewares,
        }
    }

    /// Number of installed middlewares
    pub fn depth(&self) -> usize {
        self.middlewares.len()
    }

    fn chain(&self) -> Chain<'_> {
        Chain {
            backend: &*self.backend,
            middlewares: &self.middlewares,
        }
    }
}

/// Remaining part of the chain for one call
struct Chain<'a> {
    backend: &'a dyn VirtualFileSystem,
    middlewares: &'a [Box<dyn Middleware>],
}

impl<'a> Chain<'a> {
    /// Split off the next middleware, or `None` when only the backend is left
    fn step(&self) -> Option<(&'a dyn Middleware, Chain<'a>)> {
        let (head, rest) = self.middlewares.split_first()?;
        Some((
            head.as_ref(),
            Chain {
                backend: self.backend,
                middlewares: rest,
            },
        ))
    }
}

impl Next for Chain<'_> {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        match self.step() {
            Some((middleware, next)) => middleware.read_file(path, &next),
            None => self.backend.read_file(path),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        match self.step() {
            Some((middleware, next)) => middleware.write_file(path, content, &next),
            None => self.backend.write_file(path, content),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        match self.step() {
            Some((middleware, next)) => middleware.exists(path, &next),
            None => self.backend.exists(path),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        match self.step() {
            Some((middleware, next)) => middleware.is_file(path, &next),
            None => self.backend.is_file(path),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        match self.step() {
            Some((middleware, next)) => middleware.is_dir(path, &next),
            None => self.backend.is_dir(path),
        }
    }
}

impl VirtualFileSystem for LayeredVFS {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        self.chain().read_file(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        self.chain().write_file(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        self.chain().exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.chain().is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.chain().is_dir(path)
    }
}
