//! Load dispatch
//!
//! A resolved location is ours when its extension has an entry in the
//! [`ExtensionConfig`]. Ours means: read it, transform it, report the output
//! kind. Anything else goes back to the host untouched.

use super::candidates::extension;
use crate::transform::{Transform, TransformError, TransformRequest};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use tsmodule_config::{ExtensionConfig, ExtensionOptions, OutputKind, Phase};
use tsmodule_vfs::{VfsError, VirtualFileSystem};
use url::Url;

const TARGET: &str = Phase::Load.target();

/// Transformed code, consumed once by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub output_kind: OutputKind,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadResult),
    Delegate,
}

/// Result of the legacy format query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    Format(OutputKind),
    Delegate,
}

/// Result of the legacy source transformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Transformed(String),
    Delegate,
}

/// Errors while loading an owned location
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: VfsError,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),
}

impl LoadError {
    /// Line and column, for transform failures
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            LoadError::Transform(err) => Some((err.line, err.column)),
            _ => None,
        }
    }
}

/// Options configured for the extension of `url`; exact, case-sensitive match
pub fn options_for<'c>(url: &Url, config: &'c ExtensionConfig) -> Option<&'c ExtensionOptions> {
    config.get(extension(url))
}

/// Reads and transforms owned locations
pub struct LoadTransformer<'a> {
    vfs: &'a dyn VirtualFileSystem,
    transform: &'a dyn Transform,
}

impl<'a> LoadTransformer<'a> {
    pub fn new(vfs: &'a dyn VirtualFileSystem, transform: &'a dyn Transform) -> Self {
        Self { vfs, transform }
    }

    /// Read, transform and tag the module at `url`
    pub fn load(&self, url: &Url, config: &ExtensionConfig) -> Result<LoadOutcome, LoadError> {
        let Some(options) = options_for(url, config) else {
            debug!(target: TARGET, url = %url, "delegate: unconfigured extension");
            return Ok(LoadOutcome::Delegate);
        };
        let Ok(path) = url.to_file_path() else {
            debug!(target: TARGET, url = %url, "delegate: not a file URL");
            return Ok(LoadOutcome::Delegate);
        };

        let output_kind = options.output_kind();
        let sourcefile = path.display().to_string();
        let source = self.read(&path)?;
        let request = TransformRequest {
            sourcefile: &sourcefile,
            format: output_kind.format(),
            options,
        };
        let code = self.transform.transform(&source, &request)?;
        debug!(
            target: TARGET,
            url = %url,
            output_kind = output_kind.as_str(),
            bytes = code.len(),
            "loaded"
        );
        Ok(LoadOutcome::Loaded(LoadResult { output_kind, code }))
    }

    /// Legacy first step: the output kind only
    pub fn inspect_format(&self, url: &Url, config: &ExtensionConfig) -> FormatOutcome {
        match options_for(url, config) {
            Some(options) => FormatOutcome::Format(options.output_kind()),
            None => FormatOutcome::Delegate,
        }
    }

    /// Legacy second step: transform bytes the host already read.
    ///
    /// The output format comes from `format`, the kind the host settled on.
    pub fn transform_source(
        &self,
        source: &[u8],
        url: &Url,
        format: OutputKind,
        config: &ExtensionConfig,
    ) -> Result<SourceOutcome, LoadError> {
        let Some(options) = options_for(url, config) else {
            return Ok(SourceOutcome::Delegate);
        };
        let source = decode(source.to_vec(), url.as_str())?;
        let request = TransformRequest {
            sourcefile: url.as_str(),
            format: format.format(),
            options,
        };
        let code = self.transform.transform(&source, &request)?;
        Ok(SourceOutcome::Transformed(code))
    }

    fn read(&self, path: &Path) -> Result<String, LoadError> {
        let display = path.display().to_string();
        let bytes = self.vfs.read_file(path).map_err(|source| LoadError::Read {
            path: display.clone(),
            source,
        })?;
        decode(bytes, &display)
    }
}

impl std::fmt::Debug for LoadTransformer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadTransformer").finish_non_exhaustive()
    }
}

fn decode(bytes: Vec<u8>, path: &str) -> Result<String, LoadError> {
    String::from_utf8(bytes).map_err(|source| LoadError::Decode {
        path: path.to_string(),
        source,
    })
}
