use std::path::Path;

use locdiff_core::{LocdiffError, Result};
use regex::Regex;

/// Derive a language code from a locale-directory path segment such as
/// `fr.lproj` or `zh-CN.lproj`.
///
/// The path is scanned left-to-right and the first qualifying segment wins
/// (`Regex::captures` returns the leftmost match). No qualifying segment is
/// [`LocdiffError::UnresolvedLanguage`].
pub fn resolve_language(path: &Path) -> Result<String> {
    let pattern = Regex::new(r"([a-z]{2,3}(?:-[a-zA-Z]{2})?)\.lproj").unwrap();
    let text = path.to_string_lossy();
    match pattern.captures(&text) {
        Some(caps) => Ok(caps[1].to_string()),
        None => Err(LocdiffError::UnresolvedLanguage(path.to_path_buf()).into()),
    }
}
