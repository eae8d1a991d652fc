//! Existence checks against the VFS

use tracing::trace;
use tsmodule_config::Phase;
use tsmodule_vfs::VirtualFileSystem;
use url::Url;

const TARGET: &str = Phase::Resolve.target();

/// Answers "does this candidate exist", fresh on every call
#[derive(Clone, Copy)]
pub struct ExistenceProbe<'a> {
    vfs: &'a dyn VirtualFileSystem,
}

impl<'a> ExistenceProbe<'a> {
    pub fn new(vfs: &'a dyn VirtualFileSystem) -> Self {
        Self { vfs }
    }

    /// Files and directories both count. Non-`file:` URLs never exist.
    pub fn exists(&self, candidate: &Url) -> bool {
        let found = match candidate.to_file_path() {
            Ok(path) => self.vfs.exists(&path),
            Err(()) => false,
        };
        trace!(target: TARGET, candidate = %candidate, found, "probe");
        found
    }

    /// First candidate that exists, in order; stops at the first hit
    pub fn first_existing<'c>(&self, candidates: impl IntoIterator<Item = &'c Url>) -> Option<&'c Url> {
        candidates.into_iter().find(|c| self.exists(c))
    }
}

impl std::fmt::Debug for ExistenceProbe<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExistenceProbe").finish_non_exhaustive()
    }
}
