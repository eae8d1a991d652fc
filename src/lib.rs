//! tsmodule - TypeScript module loading for a host JavaScript runtime
//!
//! A pair of loader hooks: `resolve` maps import specifiers to files,
//! probing TypeScript and JavaScript extensions and directory index files;
//! `load` strips types from owned sources and tells the host which module
//! system the result uses. Anything the hooks do not own is delegated back.
//!
//! # Architecture
//!
//! ```text
//! tsmodule-config/  - Extension → options mapping, user overrides (pure data)
//! tsmodule-vfs/     - File system abstraction and middleware
//! tsmodule-core/    - Resolver, load transformer, built-in transform
//! tsmodule-api/     - ModuleHooks facade with memoized configuration
//! tsmodule-cli/     - `tsmodule` binary
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use tsmodule_workspace::{LoadOutcome, ModuleHooks, ResolutionContext};
//!
//! let hooks = ModuleHooks::discover(std::env::current_dir().unwrap());
//! let entry = hooks.resolve("./src/index", &ResolutionContext::entry()).unwrap();
//! if let Some(url) = entry.url() {
//!     if let LoadOutcome::Loaded(result) = hooks.load(url).unwrap() {
//!         println!("{}: {}", result.output_kind, result.code);
//!     }
//! }
//! ```

pub use tsmodule_api as api;
pub use tsmodule_config as config;
pub use tsmodule_core as core;
pub use tsmodule_vfs as vfs;

// 重导出常用类型
pub use tsmodule_api::{
    ConfigLoader, Environment, ErrorReport, HookError, JsonConfigLoader, ModuleHooks,
    SourceContext,
};
pub use tsmodule_config::{
    ExtensionConfig, ExtensionOptions, Loader, ModuleFormat, OutputKind, Target,
};
pub use tsmodule_core::{
    DelegateReason, FormatOutcome, LoadOutcome, LoadResult, Resolution, ResolutionContext,
    SourceOutcome, StripTransform, Transform, TransformError, Url,
};
pub use tsmodule_vfs::{MemoryFileSystem, NativeFileSystem, VirtualFileSystem};
