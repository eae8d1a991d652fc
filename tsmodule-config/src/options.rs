//! Per-extension transform options

use serde::{Deserialize, Serialize};
use std::fmt;

/// Module system the loaded code is interpreted as by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// ES module (`import` / `export`)
    Module,
    /// CommonJS (`require` / `module.exports`)
    CommonJs,
}

impl OutputKind {
    /// Host-facing name of the output kind
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Module => "module",
            OutputKind::CommonJs => "commonjs",
        }
    }

    /// Format flag handed to the transform for this kind
    pub fn format(&self) -> ModuleFormat {
        match self {
            OutputKind::Module => ModuleFormat::Esm,
            OutputKind::CommonJs => ModuleFormat::Cjs,
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared module format of an extension entry.
///
/// Only `"cjs"` selects CommonJS; every other value reads as ESM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ModuleFormat {
    #[default]
    Esm,
    Cjs,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Esm => "esm",
            ModuleFormat::Cjs => "cjs",
        }
    }

    /// Output kind reported to the host
    pub fn output_kind(&self) -> OutputKind {
        match self {
            ModuleFormat::Esm => OutputKind::Module,
            ModuleFormat::Cjs => OutputKind::CommonJs,
        }
    }
}

impl From<&str> for ModuleFormat {
    fn from(value: &str) -> Self {
        match value {
            "cjs" => ModuleFormat::Cjs,
            _ => ModuleFormat::Esm,
        }
    }
}

impl From<String> for ModuleFormat {
    fn from(value: String) -> Self {
        ModuleFormat::from(value.as_str())
    }
}

impl From<ModuleFormat> for String {
    fn from(value: ModuleFormat) -> Self {
        value.as_str().to_string()
    }
}

/// Source syntax the transform should expect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    Ts,
    Tsx,
    Js,
    Jsx,
}

impl Loader {
    /// Infer the loader from an extension key (`.mts` -> `ts`, `.jsx` -> `jsx`)
    pub fn infer(extension: &str) -> Self {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        if ext.ends_with("tsx") {
            Loader::Tsx
        } else if ext.ends_with("jsx") {
            Loader::Jsx
        } else if ext.ends_with("ts") {
            Loader::Ts
        } else {
            Loader::Js
        }
    }

    /// Whether the source may carry type syntax
    pub fn is_typed(&self) -> bool {
        matches!(self, Loader::Ts | Loader::Tsx)
    }

    /// Whether the source may carry JSX
    pub fn allows_jsx(&self) -> bool {
        matches!(self, Loader::Tsx | Loader::Jsx)
    }
}

/// ECMAScript level the emitted code is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    Es2024,
    #[default]
    EsNext,
}

/// Transform configuration attached to one extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionOptions {
    /// Declared module format
    pub format: ModuleFormat,
    /// Source syntax
    pub loader: Loader,
    /// Syntax level for parsing and code generation; latest when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// Append an inline source map to the emitted code
    #[serde(default)]
    pub sourcemap: bool,
}

impl ExtensionOptions {
    pub fn new(format: ModuleFormat, loader: Loader) -> Self {
        Self {
            format,
            loader,
            target: None,
            sourcemap: false,
        }
    }

    /// ESM options with the loader inferred from the extension
    pub fn for_extension(extension: &str) -> Self {
        Self::new(ModuleFormat::Esm, Loader::infer(extension))
    }

    pub fn output_kind(&self) -> OutputKind {
        self.format.output_kind()
    }
}
