//! tsmodule API - hook facade for a host module loader
//!
//! Provides the host-facing interface, including:
//! - Memoized configuration (loaded from a JSON file, merged into defaults)
//! - Combined `resolve` / `load` hooks and the legacy two-step variant
//! - Unified error handling (HookError, ErrorReport)
//!
//! The hook object owns its state; there is no global singleton.

pub mod config;
pub mod error;
mod hooks;
pub mod types;

pub use config::{ConfigLoader, Environment, JsonConfigLoader, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
pub use error::{ErrorReport, HookError};
pub use hooks::{default_vfs, ModuleHooks};
pub use types::SourceContext;

// Re-export the types hooks hand back
pub use tsmodule_config;
pub use tsmodule_config::{ExtensionConfig, OutputKind, Phase};
pub use tsmodule_core::{
    DelegateReason, FormatOutcome, LoadOutcome, LoadResult, Resolution, ResolutionContext,
    SourceOutcome, Url,
};
