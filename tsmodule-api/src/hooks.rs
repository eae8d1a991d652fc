//! Hook 门面
//!
//! [`ModuleHooks`] 持有 VFS、转换器和配置来源；配置在第一次使用时计算并缓存。

use crate::config::{ConfigLoader, Environment, JsonConfigLoader};
use crate::error::HookError;
use crate::types::SourceContext;
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tsmodule_config::{finalize, ExtensionConfig, Phase};
use tsmodule_core::{
    FormatOutcome, LoadOutcome, LoadTransformer, Resolution, ResolutionContext, SourceOutcome,
    SpecifierResolver, StripTransform, Transform,
};
use tsmodule_vfs::middleware::{ReadOnlyLayer, TracedLayer};
use tsmodule_vfs::{LayeredVFS, NativeFileSystem, VfsBuilder, VirtualFileSystem};
use url::Url;

const TARGET: &str = Phase::Config.target();

/// Resolve and load hooks for one host process
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use tsmodule_api::{Environment, ModuleHooks};
/// use tsmodule_core::{LoadOutcome, Resolution, ResolutionContext};
/// use tsmodule_vfs::MemoryFileSystem;
///
/// let fs = MemoryFileSystem::with_files([("/app/main.ts", "export const n: number = 1;\n")]);
/// let hooks = ModuleHooks::new(Environment::new("/app")).with_vfs(Arc::new(fs));
///
/// let Resolution::Resolved(url) = hooks.resolve("./main", &ResolutionContext::entry()).unwrap() else {
///     panic!("main should resolve");
/// };
/// let LoadOutcome::Loaded(result) = hooks.load(&url).unwrap() else {
///     panic!("main should load");
/// };
/// assert_eq!(result.code, "export const n = 1;\n");
/// ```
pub struct ModuleHooks {
    environment: Environment,
    vfs: Arc<dyn VirtualFileSystem>,
    transform: Arc<dyn Transform>,
    /// `None`: JSON loader over `vfs`
    config_loader: Option<Arc<dyn ConfigLoader>>,
    config: OnceCell<ExtensionConfig>,
}

impl ModuleHooks {
    /// Native file system, built-in transform, JSON configuration
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            vfs: Arc::new(default_vfs()),
            transform: Arc::new(StripTransform::new()),
            config_loader: None,
            config: OnceCell::new(),
        }
    }

    /// Hooks for `cwd`, configuration discovered from the process environment
    pub fn discover(cwd: impl AsRef<Path>) -> Self {
        Self::new(Environment::discover(cwd.as_ref()))
    }

    pub fn with_vfs(mut self, vfs: Arc<dyn VirtualFileSystem>) -> Self {
        self.vfs = vfs;
        self
    }

    pub fn with_transform(mut self, transform: Arc<dyn Transform>) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_config_loader(mut self, loader: Arc<dyn ConfigLoader>) -> Self {
        self.config_loader = Some(loader);
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The finalized configuration, computed once.
    ///
    /// A failed load is not cached; the next call tries again.
    pub fn get_config(&self) -> Result<&ExtensionConfig, HookError> {
        self.config.get_or_try_init(|| self.compute_config())
    }

    fn compute_config(&self) -> Result<ExtensionConfig, HookError> {
        let Some(path) = &self.environment.config_path else {
            debug!(target: TARGET, "no configuration file, using defaults");
            return Ok(ExtensionConfig::defaults());
        };
        let partial = match &self.config_loader {
            Some(loader) => loader.load(path)?,
            None => JsonConfigLoader::new(self.vfs.clone()).load(path)?,
        };
        for (extension, key) in partial.ignored_keys() {
            warn!(target: TARGET, extension, key, "option has no effect, ignored");
        }
        let config = finalize(ExtensionConfig::defaults(), Some(&partial));
        info!(
            target: TARGET,
            path = %path.display(),
            extensions = config.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Map `specifier` to a location, or hand it back to the host
    pub fn resolve(
        &self,
        specifier: &str,
        context: &ResolutionContext,
    ) -> Result<Resolution, HookError> {
        let config = self.get_config()?;
        let resolver = SpecifierResolver::new(self.vfs.as_ref(), &self.environment.cwd);
        Ok(resolver.resolve(specifier, context, config))
    }

    /// Read and transform `url` when its extension is configured
    pub fn load(&self, url: &Url) -> Result<LoadOutcome, HookError> {
        let config = self.get_config()?;
        Ok(self.loader().load(url, config)?)
    }

    /// Legacy format query
    pub fn inspect_format(&self, url: &Url) -> Result<FormatOutcome, HookError> {
        let config = self.get_config()?;
        Ok(self.loader().inspect_format(url, config))
    }

    /// Legacy transformation of source the host already read
    pub fn transform_source(
        &self,
        source: &[u8],
        context: &SourceContext,
    ) -> Result<SourceOutcome, HookError> {
        let config = self.get_config()?;
        Ok(self
            .loader()
            .transform_source(source, &context.url, context.format, config)?)
    }

    fn loader(&self) -> LoadTransformer<'_> {
        LoadTransformer::new(self.vfs.as_ref(), self.transform.as_ref())
    }
}

impl std::fmt::Debug for ModuleHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleHooks")
            .field("environment", &self.environment)
            .field("config", &self.config.get())
            .finish_non_exhaustive()
    }
}

/// Read-only, traced view of the native file system
pub fn default_vfs() -> LayeredVFS {
    VfsBuilder::new(NativeFileSystem::new())
        .with(TracedLayer::new())
        .with(ReadOnlyLayer::new())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tsmodule_config::{ConfigError, OutputKind, PartialConfig};
    use tsmodule_vfs::MemoryFileSystem;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn hooks(fs: MemoryFileSystem, env: Environment) -> ModuleHooks {
        ModuleHooks::new(env).with_vfs(Arc::new(fs))
    }

    #[test]
    fn test_defaults_without_config_file() {
        let hooks = hooks(MemoryFileSystem::new(), Environment::new("/app"));
        assert_eq!(hooks.get_config().unwrap(), &ExtensionConfig::defaults());
    }

    #[test]
    fn test_config_file_overrides() {
        let fs = MemoryFileSystem::with_files([
            (
                "/app/tsmodule.config.json",
                r#"{ ".ts": { "format": "cjs" }, ".vue": { "loader": "ts" } }"#,
            ),
            ("/app/a.ts", "export const a = 1;\n"),
        ]);
        let env = Environment::new("/app").with_config_path("/app/tsmodule.config.json");
        let hooks = hooks(fs, env);

        let config = hooks.get_config().unwrap();
        assert_eq!(config.keys().last(), Some(".vue"));
        assert_eq!(
            hooks.inspect_format(&url("file:///app/a.ts")).unwrap(),
            FormatOutcome::Format(OutputKind::CommonJs)
        );
    }

    #[test]
    fn test_config_is_memoized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let loader = move |_: &Path| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ConfigError>(PartialConfig::new())
        };
        let env = Environment::new("/app").with_config_path("/app/conf.json");
        let hooks = hooks(MemoryFileSystem::new(), env).with_config_loader(Arc::new(loader));

        for _ in 0..3 {
            hooks.resolve("./x", &ResolutionContext::entry()).unwrap();
            hooks.load(&url("file:///app/x.png")).unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_config_failure_propagates() {
        let env = Environment::new("/app").with_config_path("/app/missing.json");
        let hooks = hooks(MemoryFileSystem::new(), env);
        let err = hooks
            .resolve("./x", &ResolutionContext::entry())
            .unwrap_err();
        assert_eq!(err.phase(), Phase::Config);
        assert!(hooks.get_config().is_err());
    }

    #[test]
    fn test_resolve_then_load() {
        let fs = MemoryFileSystem::with_files([
            ("/app/src/index.ts", "import { twice } from './util';\nconsole.log(twice(2));\n"),
            ("/app/src/util.ts", "export const twice = (n: number): number => n * 2;\n"),
        ]);
        let hooks = hooks(fs, Environment::new("/app"));

        let entry = hooks
            .resolve("./src/index", &ResolutionContext::entry())
            .unwrap();
        let entry = entry.url().unwrap().clone();
        assert_eq!(entry.path(), "/app/src/index.ts");

        let util = hooks
            .resolve("./util", &ResolutionContext::from_importer(entry))
            .unwrap();
        let LoadOutcome::Loaded(result) = hooks.load(util.url().unwrap()).unwrap() else {
            panic!("util should load");
        };
        assert_eq!(result.output_kind, OutputKind::Module);
        assert!(result.code.starts_with("export const twice = (n)"), "{}", result.code);
        assert!(!result.code.contains("number"), "{}", result.code);
    }

    #[test]
    fn test_transform_error_surfaces() {
        let fs = MemoryFileSystem::with_files([("/app/bad.ts", "let x: = 1;\n")]);
        let hooks = hooks(fs, Environment::new("/app"));
        let err = hooks.load(&url("file:///app/bad.ts")).unwrap_err();
        assert_eq!(err.phase(), Phase::Transform);
        assert_eq!(err.location(), Some("/app/bad.ts"));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_legacy_transform_source() {
        let hooks = hooks(MemoryFileSystem::new(), Environment::new("/app"));
        let context = SourceContext::new(url("file:///app/a.ts"), OutputKind::Module);
        assert_eq!(
            hooks.transform_source(b"let a: string = 'x';", &context).unwrap(),
            SourceOutcome::Transformed("let a = 'x';\n".to_string())
        );

        let context = SourceContext::new(url("file:///app/a.png"), OutputKind::Module);
        assert_eq!(
            hooks.transform_source(b"", &context).unwrap(),
            SourceOutcome::Delegate
        );
    }

    #[test]
    fn test_custom_transform() {
        let fs = MemoryFileSystem::with_files([("/app/a.ts", "anything")]);
        let transform = |_: &str, _: &tsmodule_core::TransformRequest<'_>| {
            Ok::<_, tsmodule_core::TransformError>("replaced".to_string())
        };
        let hooks = hooks(fs, Environment::new("/app")).with_transform(Arc::new(transform));
        let LoadOutcome::Loaded(result) = hooks.load(&url("file:///app/a.ts")).unwrap() else {
            panic!("a.ts should load");
        };
        assert_eq!(result.code, "replaced");
    }
}
