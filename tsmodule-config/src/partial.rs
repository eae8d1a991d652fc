//! User-supplied configuration and merging

use crate::extension::{normalize_key, ExtensionConfig};
use crate::options::{ExtensionOptions, Loader, ModuleFormat, Target};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors produced while interpreting a configuration document
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Cannot read configuration '{path}': {message}")]
    Read { path: String, message: String },

    /// Configuration file is not valid JSON
    #[error("Cannot parse configuration '{path}': {message}")]
    Parse { path: String, message: String },

    /// Document parsed but has the wrong shape
    #[error("Invalid configuration: {0}")]
    Shape(String),
}

/// Partially specified options for one extension.
///
/// Keys the built-in transform has no use for (`minify`, `keepNames`, ...)
/// are kept in `ignored` instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    pub format: Option<ModuleFormat>,
    pub loader: Option<Loader>,
    pub target: Option<Target>,
    pub sourcemap: Option<bool>,
    #[serde(flatten)]
    pub ignored: BTreeMap<String, Value>,
}

impl PartialOptions {
    /// Fill missing fields from `base`
    pub fn apply_to(&self, base: &ExtensionOptions) -> ExtensionOptions {
        ExtensionOptions {
            format: self.format.unwrap_or(base.format),
            loader: self.loader.unwrap_or(base.loader),
            target: self.target.or(base.target),
            sourcemap: self.sourcemap.unwrap_or(base.sourcemap),
        }
    }
}

/// Ordered set of per-extension overrides loaded from an external source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    entries: Vec<(String, PartialOptions)>,
}

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, extension: impl AsRef<str>, options: PartialOptions) -> Self {
        self.entries.push((normalize_key(extension.as_ref()), options));
        self
    }

    pub fn entries(&self) -> &[(String, PartialOptions)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(extension, key)` pairs that were accepted but have no effect
    pub fn ignored_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(extension, options)| {
            options
                .ignored
                .keys()
                .map(move |key| (extension.as_str(), key.as_str()))
        })
    }

    /// Interpret a JSON document.
    ///
    /// The document is either the extension map itself or an object whose
    /// `default` field holds it.
    pub fn from_json_value(value: Value) -> Result<Self, ConfigError> {
        let object = match value {
            Value::Object(mut object) => match object.remove("default") {
                Some(Value::Object(inner)) => inner,
                Some(other) => {
                    return Err(ConfigError::Shape(format!(
                        "'default' must be an object, found {}",
                        json_kind(&other)
                    )))
                }
                None => object,
            },
            other => {
                return Err(ConfigError::Shape(format!(
                    "expected an object of extensions, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut config = PartialConfig::new();
        for (key, entry) in object {
            let options: PartialOptions = serde_json::from_value(entry)
                .map_err(|e| ConfigError::Shape(format!("entry '{}': {}", key, e)))?;
            config = config.with(key, options);
        }
        Ok(config)
    }

    /// Parse a JSON string; `path` only labels errors
    pub fn from_json_str(source: &str, path: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_value(value)
    }
}

/// Merge user overrides into the defaults.
///
/// Known keys keep their position and inherit unspecified fields; new keys are
/// appended in the order they were declared.
pub fn finalize(defaults: ExtensionConfig, partial: Option<&PartialConfig>) -> ExtensionConfig {
    let mut config = defaults;
    let Some(partial) = partial else {
        return config;
    };
    for (key, overrides) in partial.entries() {
        let base = config
            .get(key)
            .cloned()
            .unwrap_or_else(|| ExtensionOptions::for_extension(key));
        config.insert(key, overrides.apply_to(&base));
    }
    config
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_without_partial() {
        let config = finalize(ExtensionConfig::defaults(), None);
        assert_eq!(config, ExtensionConfig::defaults());
    }

    #[test]
    fn test_finalize_overrides_and_appends() {
        let partial = PartialConfig::from_json_str(
            r#"{ ".ts": { "format": "cjs" }, "js": { "loader": "js" } }"#,
            "inline",
        )
        .unwrap();
        let config = finalize(ExtensionConfig::defaults(), Some(&partial));

        let ts = config.get(".ts").unwrap();
        assert_eq!(ts.format, ModuleFormat::Cjs);
        assert_eq!(ts.loader, Loader::Ts);

        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys.first(), Some(&".ts"));
        assert_eq!(keys.last(), Some(&".js"));
        assert_eq!(config.get(".js").unwrap().format, ModuleFormat::Esm);
    }

    #[test]
    fn test_foreign_keys_are_ignored() {
        let partial = PartialConfig::from_json_str(
            r#"{ ".ts": { "format": "cjs", "keepNames": true, "minify": false, "target": "es2020" } }"#,
            "inline",
        )
        .unwrap();
        let ignored: Vec<_> = partial.ignored_keys().collect();
        assert_eq!(ignored, vec![(".ts", "keepNames"), (".ts", "minify")]);

        let config = finalize(ExtensionConfig::defaults(), Some(&partial));
        let ts = config.get(".ts").unwrap();
        assert_eq!(ts.format, ModuleFormat::Cjs);
        assert_eq!(ts.target, Some(Target::Es2020));
    }

    #[test]
    fn test_default_wrapper() {
        let partial =
            PartialConfig::from_json_str(r#"{ "default": { ".mjs": {} } }"#, "inline").unwrap();
        assert_eq!(partial.entries().len(), 1);
        assert_eq!(partial.entries()[0].0, ".mjs");
    }

    #[test]
    fn test_declared_order_is_kept() {
        let partial = PartialConfig::from_json_str(
            r#"{ ".zz": {}, ".aa": {}, ".mm": {} }"#,
            "inline",
        )
        .unwrap();
        let keys: Vec<&str> = partial.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec![".zz", ".aa", ".mm"]);
    }

    #[test]
    fn test_shape_errors() {
        let err = PartialConfig::from_json_str("[1, 2]", "inline").unwrap_err();
        assert!(matches!(err, ConfigError::Shape(_)));

        let err = PartialConfig::from_json_str(r#"{ ".ts": { "loader": 3 } }"#, "inline")
            .unwrap_err();
        assert!(err.to_string().contains(".ts"));

        let err = PartialConfig::from_json_str(r#"{ ".ts": { "target": "es1999" } }"#, "inline")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Shape(_)));

        let err = PartialConfig::from_json_str("{ nope", "cfg.json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == "cfg.json"));
    }
}
