//! Candidate locations for a path stem
//!
//! Pure URL arithmetic; nothing here touches the file system.

use tsmodule_config::{ExtensionConfig, FALLBACK_EXTENSION, INDEX_BASENAME};
use url::Url;

/// Which candidate list to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateMode {
    /// `stem` + every plain-script family key, then `.js`
    Plain,
    /// `stem` + every typed family key, then `.js`
    Typed,
    /// `stem/index` in `Plain` order, then in `Typed` order
    Index,
}

/// Ordered candidates for `stem` in the given mode
pub fn candidates(stem: &Url, mode: CandidateMode, config: &ExtensionConfig) -> Vec<Url> {
    match mode {
        CandidateMode::Plain => with_extensions(stem, config.plain_script_keys()),
        CandidateMode::Typed => with_extensions(stem, config.typed_keys()),
        CandidateMode::Index => {
            let index = index_stem(stem);
            let mut list = candidates(&index, CandidateMode::Plain, config);
            list.extend(candidates(&index, CandidateMode::Typed, config));
            list
        }
    }
}

fn with_extensions<'a>(stem: &Url, keys: impl Iterator<Item = &'a str>) -> Vec<Url> {
    let mut extensions: Vec<&str> = keys.collect();
    if !extensions.contains(&FALLBACK_EXTENSION) {
        extensions.push(FALLBACK_EXTENSION);
    }
    extensions
        .into_iter()
        .map(|ext| append_to_path(stem, ext))
        .collect()
}

fn index_stem(stem: &Url) -> Url {
    if stem.path().ends_with('/') {
        append_to_path(stem, INDEX_BASENAME)
    } else {
        append_to_path(stem, &format!("/{INDEX_BASENAME}"))
    }
}

/// Append `suffix` to the path, keeping any query and fragment
pub fn append_to_path(url: &Url, suffix: &str) -> Url {
    let mut out = url.clone();
    out.set_path(&format!("{}{}", url.path(), suffix));
    out
}

/// Extension of the last path segment, Node `extname` style: `.ts` for
/// `a.ts`, empty for `a`, `.bashrc` or `dir/`
pub fn extension(url: &Url) -> &str {
    let path = url.path();
    let segment = &path[path.rfind('/').map_or(0, |i| i + 1)..];
    match segment.rfind('.') {
        Some(0) | None => "",
        Some(i) => &segment[i..],
    }
}

/// The URL with `ext` removed from the end of its path
pub fn strip_extension(url: &Url, ext: &str) -> Url {
    let path = url.path();
    let mut out = url.clone();
    if path.len() >= ext.len() {
        out.set_path(&path[..path.len() - ext.len()]);
    }
    out
}
