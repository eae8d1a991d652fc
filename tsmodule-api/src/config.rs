//! 配置来源
//!
//! 外部配置文件的定位（[`Environment`]）与读取（[`ConfigLoader`]）。
//! 合并到默认配置的工作由 `tsmodule_config::finalize` 完成。

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use tsmodule_config::{ConfigError, PartialConfig, Phase};
use tsmodule_vfs::{NativeFileSystem, VirtualFileSystem};

const TARGET: &str = Phase::Config.target();

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "TSMODULE_CONFIG";

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tsmodule.config.json";

/// Loads a user configuration from a location
pub trait ConfigLoader: Send + Sync {
    fn load(&self, location: &Path) -> Result<PartialConfig, ConfigError>;
}

impl<F> ConfigLoader for F
where
    F: Fn(&Path) -> Result<PartialConfig, ConfigError> + Send + Sync,
{
    fn load(&self, location: &Path) -> Result<PartialConfig, ConfigError> {
        self(location)
    }
}

/// Reads a JSON configuration document through a VFS
pub struct JsonConfigLoader {
    vfs: Arc<dyn VirtualFileSystem>,
}

impl JsonConfigLoader {
    pub fn new(vfs: Arc<dyn VirtualFileSystem>) -> Self {
        Self { vfs }
    }
}

impl ConfigLoader for JsonConfigLoader {
    fn load(&self, location: &Path) -> Result<PartialConfig, ConfigError> {
        let path = location.display().to_string();
        let bytes = self.vfs.read_file(location).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let source = String::from_utf8(bytes).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let partial = PartialConfig::from_json_str(&source, &path)?;
        debug!(target: TARGET, path = %path, entries = partial.entries().len(), "configuration read");
        Ok(partial)
    }
}

impl std::fmt::Debug for JsonConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonConfigLoader").finish_non_exhaustive()
    }
}

/// Process-level inputs of the hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Base for entry-point resolution
    pub cwd: PathBuf,
    /// External configuration file, if any
    pub config_path: Option<PathBuf>,
}

impl Environment {
    /// No configuration file: defaults only
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            config_path: None,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// `TSMODULE_CONFIG` if set, else `tsmodule.config.json` in `cwd` if present
    pub fn discover(cwd: impl Into<PathBuf>) -> Self {
        Self::discover_with(
            cwd,
            std::env::var_os(CONFIG_ENV_VAR),
            &NativeFileSystem::new(),
        )
    }

    /// [`Environment::discover`] with the variable value and file system supplied
    pub fn discover_with(
        cwd: impl Into<PathBuf>,
        env_value: Option<OsString>,
        vfs: &dyn VirtualFileSystem,
    ) -> Self {
        let cwd = cwd.into();
        let config_path = match env_value.filter(|v| !v.is_empty()) {
            Some(value) => Some(cwd.join(value)),
            None => {
                let candidate = cwd.join(CONFIG_FILE_NAME);
                vfs.is_file(&candidate).then_some(candidate)
            }
        };
        debug!(
            target: TARGET,
            cwd = %cwd.display(),
            config = ?config_path,
            "environment discovered"
        );
        Self { cwd, config_path }
    }
}
