//! tsmodule Config - configuration data structures
//!
//! Holds the extension → transform-options mapping that every hook consumes,
//! plus the merge step that overlays a user configuration on the defaults.
//! No I/O and no global state: loading the user file is the API layer's job.

mod extension;
mod options;
mod partial;

pub use extension::{
    is_plain_family_key, is_plain_script_extension, is_typed_family_key,
    is_typed_source_extension, normalize_key, ExtensionConfig, FALLBACK_EXTENSION,
    INDEX_BASENAME,
};
pub use options::{ExtensionOptions, Loader, ModuleFormat, OutputKind, Target};
pub use partial::{finalize, ConfigError, PartialConfig, PartialOptions};

/// Processing phase, used to pick log targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Config,
    Resolve,
    Load,
    Transform,
    Vfs,
}

impl Phase {
    /// Get the string name of the phase
    pub const fn as_str(&self) -> &'static str {
        match self {
            Phase::Config => "config",
            Phase::Resolve => "resolve",
            Phase::Load => "load",
            Phase::Transform => "transform",
            Phase::Vfs => "vfs",
        }
    }

    /// Get the log target name for this phase
    pub const fn target(&self) -> &'static str {
        match self {
            Phase::Config => "tsmodule::config",
            Phase::Resolve => "tsmodule::resolve",
            Phase::Load => "tsmodule::load",
            Phase::Transform => "tsmodule::transform",
            Phase::Vfs => "tsmodule::vfs",
        }
    }

    /// All phases, in pipeline order
    pub const ALL: [Phase; 5] = [
        Phase::Config,
        Phase::Resolve,
        Phase::Load,
        Phase::Transform,
        Phase::Vfs,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Resolve.as_str(), "resolve");
        assert_eq!(Phase::Load.target(), "tsmodule::load");
    }

    #[test]
    fn test_phase_targets_share_prefix() {
        for phase in Phase::ALL {
            assert_eq!(phase.target(), format!("tsmodule::{}", phase.as_str()));
        }
    }
}
