//! Specifier resolution
//!
//! Turns an import specifier plus the importing file into one `file:` URL,
//! or declines. Declining is never an error: the host falls back to its own
//! resolution.

use super::candidates::{candidates, extension, strip_extension, CandidateMode};
use super::probe::ExistenceProbe;
use super::specifier::SpecifierKind;
use std::fmt;
use std::path::Path;
use tracing::debug;
use tsmodule_config::{
    is_plain_script_extension, is_typed_source_extension, ExtensionConfig, Phase,
};
use tsmodule_vfs::VirtualFileSystem;
use url::Url;

const TARGET: &str = Phase::Resolve.target();

/// Where an import comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// URL of the importing module; absent for entry points
    pub importer: Option<Url>,
}

impl ResolutionContext {
    /// Context for an entry point
    pub fn entry() -> Self {
        Self::default()
    }

    pub fn from_importer(importer: Url) -> Self {
        Self {
            importer: Some(importer),
        }
    }
}

/// Why a specifier was handed back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateReason {
    /// Protocol, bare package or subpath specifier
    Unowned(SpecifierKind),
    /// The specifier does not join against the base URL
    InvalidSpecifier,
    /// No candidate exists
    NotFound,
}

impl fmt::Display for DelegateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegateReason::Unowned(kind) => write!(f, "{kind} specifier"),
            DelegateReason::InvalidSpecifier => write!(f, "invalid specifier"),
            DelegateReason::NotFound => write!(f, "no candidate found"),
        }
    }
}

/// Outcome of resolving one specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Url),
    Delegate(DelegateReason),
}

impl Resolution {
    pub fn url(&self) -> Option<&Url> {
        match self {
            Resolution::Resolved(url) => Some(url),
            Resolution::Delegate(_) => None,
        }
    }

    pub fn is_delegate(&self) -> bool {
        matches!(self, Resolution::Delegate(_))
    }
}

/// Resolves specifiers against a VFS
#[derive(Debug)]
pub struct SpecifierResolver<'a> {
    probe: ExistenceProbe<'a>,
    /// Base for entry points: the working directory as a directory URL
    cwd: Option<Url>,
}

impl<'a> SpecifierResolver<'a> {
    /// `cwd` must be absolute; a relative one leaves entry points unresolvable
    pub fn new(vfs: &'a dyn VirtualFileSystem, cwd: &Path) -> Self {
        Self {
            probe: ExistenceProbe::new(vfs),
            cwd: Url::from_directory_path(cwd).ok(),
        }
    }

    pub fn resolve(
        &self,
        specifier: &str,
        context: &ResolutionContext,
        config: &ExtensionConfig,
    ) -> Resolution {
        let kind = SpecifierKind::classify(specifier);
        if !kind.is_owned() {
            return delegate(specifier, DelegateReason::Unowned(kind));
        }

        let Some(base) = context.importer.as_ref().or(self.cwd.as_ref()) else {
            return delegate(specifier, DelegateReason::InvalidSpecifier);
        };
        let location = match base.join(specifier) {
            Ok(location) => location,
            Err(err) => {
                debug!(target: TARGET, specifier, base = %base, error = %err, "join failed");
                return delegate(specifier, DelegateReason::InvalidSpecifier);
            }
        };

        let ext = extension(&location).to_ascii_lowercase();
        if ext.is_empty() {
            return self.resolve_extensionless(specifier, &location, config);
        }

        let importer_is_typed = context
            .importer
            .as_ref()
            .is_some_and(|importer| is_typed_source_extension(extension(importer)));
        if is_plain_script_extension(&ext) && importer_is_typed {
            let stem = strip_extension(&location, &ext);
            let typed = candidates(&stem, CandidateMode::Typed, config);
            if let Some(hit) = self.probe.first_existing(&typed) {
                debug!(target: TARGET, specifier, url = %hit, "typed source for script import");
                return Resolution::Resolved(hit.clone());
            }
        }

        if context.importer.is_none() || self.probe.exists(&location) {
            debug!(target: TARGET, specifier, url = %location, "literal location");
            return Resolution::Resolved(location);
        }
        delegate(specifier, DelegateReason::NotFound)
    }

    fn resolve_extensionless(
        &self,
        specifier: &str,
        stem: &Url,
        config: &ExtensionConfig,
    ) -> Resolution {
        for mode in [CandidateMode::Plain, CandidateMode::Typed, CandidateMode::Index] {
            let list = candidates(stem, mode, config);
            if let Some(hit) = self.probe.first_existing(&list) {
                debug!(target: TARGET, specifier, url = %hit, mode = ?mode, "candidate hit");
                return Resolution::Resolved(hit.clone());
            }
        }
        delegate(specifier, DelegateReason::NotFound)
    }
}

fn delegate(specifier: &str, reason: DelegateReason) -> Resolution {
    debug!(target: TARGET, specifier, reason = %reason, "delegate");
    Resolution::Delegate(reason)
}
