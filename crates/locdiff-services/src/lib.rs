//! High-level orchestration layer over the parser and translator crates.
//! Intentionally thin: exposes stable functions used by the CLI.

pub mod compare;
pub mod diff;
pub mod lang;
pub mod translate;

pub use compare::{compare_files, CompareRun, FileComparison};
pub use diff::{display_value, find_missing, format_specifier_subset, FORMAT_SPECIFIER};
pub use lang::resolve_language;
pub use locdiff_core::{Declaration, ParsedFile, Result, TranslatedDeclaration};
pub use translate::{translate_all, translate_missing, TranslatedFile};
