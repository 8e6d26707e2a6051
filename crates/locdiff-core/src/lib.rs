use std::collections::{hash_map::Entry, HashMap};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Minimal unit used across crates to represent a single key/value entry
/// extracted from a `.strings` resource file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub key: String,
    /// 0-based line index of the first occurrence in the source file.
    pub line: usize,
    pub value: String,
}

/// Key → declaration mapping for one parsed resource file.
/// On duplicate keys the first occurrence wins; later ones are rejected.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    entries: HashMap<String, Declaration>,
}

impl ParsedFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `decl` unless its key is already present. Returns the existing
    /// declaration when the key was taken, so callers can report both lines.
    pub fn insert_first(&mut self, decl: Declaration) -> Option<&Declaration> {
        match self.entries.entry(decl.key.clone()) {
            Entry::Occupied(e) => Some(e.into_mut()),
            Entry::Vacant(v) => {
                v.insert(decl);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Declaration> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate declarations in unspecified order (lookup is by key).
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.values()
    }
}

/// A missing declaration paired with the translation fetched for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedDeclaration {
    pub key: String,
    /// Line index in the *base* file (the comparison file has no entry).
    pub line: usize,
    pub value: String,
    pub translation: String,
}

/// Which parser events get reported. Flags are independent; presets below
/// mirror the reporting levels exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseReporting {
    pub empty_line: bool,
    pub mismatch_pattern: bool,
    pub duplicate_key: bool,
    /// Consumed by the translation orchestrator, not the parser: report
    /// entries left without a machine translation.
    pub manual_translation: bool,
}

impl Default for ParseReporting {
    fn default() -> Self {
        Self {
            empty_line: false,
            mismatch_pattern: true,
            duplicate_key: true,
            manual_translation: true,
        }
    }
}

impl ParseReporting {
    pub fn silent() -> Self {
        Self {
            empty_line: false,
            mismatch_pattern: false,
            duplicate_key: false,
            manual_translation: false,
        }
    }

    pub fn verbose() -> Self {
        Self {
            empty_line: true,
            mismatch_pattern: true,
            duplicate_key: true,
            manual_translation: true,
        }
    }
}

/// Which missing-declaration reports get printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingReporting {
    pub missing_declarations: bool,
    pub string_format_warnings: bool,
}

impl Default for MissingReporting {
    fn default() -> Self {
        Self {
            missing_declarations: true,
            string_format_warnings: true,
        }
    }
}

impl MissingReporting {
    pub fn silent() -> Self {
        Self {
            missing_declarations: false,
            string_format_warnings: false,
        }
    }

    pub fn verbose() -> Self {
        Self::default()
    }
}

/// Domain errors. Malformed lines and duplicate keys are *not* errors — they
/// are reporting events handled by the parser policy.
#[derive(Debug, Error)]
pub enum LocdiffError {
    #[error("could not determine language from filepath: {}", .0.display())]
    UnresolvedLanguage(PathBuf),
    #[error("translation backend returned {got} strings for {want} requested")]
    TranslationLengthMismatch { want: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(key: &str, line: usize, value: &str) -> Declaration {
        Declaration {
            key: key.to_string(),
            line,
            value: value.to_string(),
        }
    }

    #[test]
    fn first_occurrence_wins() {
        let mut parsed = ParsedFile::new();
        assert!(parsed.insert_first(decl("greet", 0, "Hello")).is_none());
        let existing = parsed
            .insert_first(decl("greet", 5, "Hi"))
            .expect("duplicate must be rejected");
        assert_eq!(existing.line, 0);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("greet").unwrap().value, "Hello");
    }
}
