//! Syntactic classification of import specifiers

use std::fmt;

/// Shape of an import specifier, decided from its text alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `./x`, `../x`, `.`
    Relative,
    /// `/abs/x`
    Absolute,
    /// `node:fs`, `https://...`, `file:///...`
    Protocol,
    /// `lodash`, `lodash/fp`, `@scope/pkg`
    Bare,
    /// `#internal`, resolved through the package manifest
    Subpath,
    Empty,
    /// Anything else that still joins as a relative URL
    Other,
}

impl SpecifierKind {
    pub fn classify(specifier: &str) -> Self {
        let Some(first) = specifier.chars().next() else {
            return SpecifierKind::Empty;
        };
        match first {
            '.' => SpecifierKind::Relative,
            '/' => SpecifierKind::Absolute,
            '#' => SpecifierKind::Subpath,
            '@' => SpecifierKind::Bare,
            c if is_word_char(c) => {
                let word_len = specifier
                    .find(|c: char| !is_word_char(c))
                    .unwrap_or(specifier.len());
                if specifier[word_len..].starts_with(':') {
                    SpecifierKind::Protocol
                } else {
                    SpecifierKind::Bare
                }
            }
            _ => SpecifierKind::Other,
        }
    }

    /// Whether resolution handles this kind itself instead of delegating
    pub fn is_owned(&self) -> bool {
        matches!(
            self,
            SpecifierKind::Relative | SpecifierKind::Absolute | SpecifierKind::Other
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecifierKind::Relative => "relative",
            SpecifierKind::Absolute => "absolute",
            SpecifierKind::Protocol => "protocol",
            SpecifierKind::Bare => "bare",
            SpecifierKind::Subpath => "subpath",
            SpecifierKind::Empty => "empty",
            SpecifierKind::Other => "other",
        }
    }
}

impl fmt::Display for SpecifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
