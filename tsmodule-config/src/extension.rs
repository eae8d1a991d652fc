//! Extension → options mapping

use crate::options::{ExtensionOptions, Loader, ModuleFormat};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Fallback plain-script extension appended to every candidate list
pub const FALLBACK_EXTENSION: &str = ".js";

/// Basename probed for directory imports
pub const INDEX_BASENAME: &str = "index";

/// Ordered mapping from file extension (with leading `.`) to transform options.
///
/// Iteration order is insertion order; it decides candidate order during
/// resolution, so it is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionConfig {
    entries: Vec<(String, ExtensionOptions)>,
}

impl ExtensionConfig {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults: `.ts`, `.mts`, `.cts`, `.tsx`, `.jsx`
    pub fn defaults() -> Self {
        let mut config = Self::new();
        config.insert(".ts", ExtensionOptions::new(ModuleFormat::Esm, Loader::Ts));
        config.insert(".mts", ExtensionOptions::new(ModuleFormat::Esm, Loader::Ts));
        config.insert(".cts", ExtensionOptions::new(ModuleFormat::Cjs, Loader::Ts));
        config.insert(".tsx", ExtensionOptions::new(ModuleFormat::Esm, Loader::Tsx));
        config.insert(".jsx", ExtensionOptions::new(ModuleFormat::Esm, Loader::Jsx));
        config
    }

    /// Insert or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, extension: impl AsRef<str>, options: ExtensionOptions) {
        let key = normalize_key(extension.as_ref());
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = options,
            None => self.entries.push((key, options)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, extension: impl AsRef<str>, options: ExtensionOptions) -> Self {
        self.insert(extension, options);
        self
    }

    /// Look up the options for an extension (exact key match)
    pub fn get(&self, extension: &str) -> Option<&ExtensionOptions> {
        self.entries
            .iter()
            .find(|(k, _)| k == extension)
            .map(|(_, options)| options)
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.get(extension).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionOptions)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of the plain-script family, in iteration order
    pub fn plain_script_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| is_plain_family_key(k))
    }

    /// Keys of the typed-source family, in iteration order
    pub fn typed_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| is_typed_family_key(k))
    }
}

impl Serialize for ExtensionConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, options) in &self.entries {
            map.serialize_entry(key, options)?;
        }
        map.end()
    }
}

/// Ensure a key starts with exactly one `.`
pub fn normalize_key(extension: &str) -> String {
    format!(".{}", extension.trim_start_matches('.'))
}

/// Candidate-generation family test for plain-script keys (`.js`, `.mjs`, `.jsx`, ...)
pub fn is_plain_family_key(key: &str) -> bool {
    key.contains("js")
}

/// Candidate-generation family test for typed keys (`.ts`, `.mts`, `.tsx`, ...)
pub fn is_typed_family_key(key: &str) -> bool {
    key.contains("ts")
}

/// `.js`, `.mjs` or `.cjs`
pub fn is_plain_script_extension(extension: &str) -> bool {
    let ext = extension.to_ascii_lowercase();
    matches!(ext.as_str(), ".js" | ".mjs" | ".cjs")
}

/// `.ts`, `.mts`, `.cts`, `.tsx`, `.mtsx` or `.ctsx`
pub fn is_typed_source_extension(extension: &str) -> bool {
    let ext = extension.to_ascii_lowercase();
    let rest = match ext.strip_prefix('.') {
        Some(rest) => rest,
        None => return false,
    };
    let rest = rest
        .strip_prefix('m')
        .or_else(|| rest.strip_prefix('c'))
        .unwrap_or(rest);
    rest == "ts" || rest == "tsx"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_order() {
        let config = ExtensionConfig::defaults();
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec![".ts", ".mts", ".cts", ".tsx", ".jsx"]);
        assert_eq!(config.get(".cts").unwrap().format, ModuleFormat::Cjs);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut config = ExtensionConfig::defaults();
        config.insert("mts", ExtensionOptions::new(ModuleFormat::Cjs, Loader::Ts));
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys[1], ".mts");
        assert_eq!(config.len(), 5);
        assert_eq!(config.get(".mts").unwrap().format, ModuleFormat::Cjs);
    }

    #[test]
    fn test_families() {
        let config = ExtensionConfig::defaults().with(".mjs", ExtensionOptions::for_extension(".mjs"));
        let plain: Vec<&str> = config.plain_script_keys().collect();
        let typed: Vec<&str> = config.typed_keys().collect();
        assert_eq!(plain, vec![".jsx", ".mjs"]);
        assert_eq!(typed, vec![".ts", ".mts", ".cts", ".tsx"]);
    }

    #[test]
    fn test_extension_predicates() {
        assert!(is_plain_script_extension(".js"));
        assert!(is_plain_script_extension(".MJS"));
        assert!(is_plain_script_extension(".cjs"));
        assert!(!is_plain_script_extension(".jsx"));
        assert!(is_typed_source_extension(".ts"));
        assert!(is_typed_source_extension(".cts"));
        assert!(is_typed_source_extension(".tsx"));
        assert!(!is_typed_source_extension(".js"));
        assert!(!is_typed_source_extension("ts"));
        assert!(!is_typed_source_extension(".xts"));
    }

    #[test]
    fn test_serialize_keeps_order() {
        let json = serde_json::to_string(&ExtensionConfig::defaults()).unwrap();
        let ts = json.find("\".ts\"").unwrap();
        let jsx = json.find("\".jsx\"").unwrap();
        assert!(ts < jsx);
    }
}
