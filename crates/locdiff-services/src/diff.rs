use locdiff_core::{Declaration, ParsedFile};

/// Two-character marker for a runtime string-interpolation placeholder.
/// Checked as an opaque literal substring, never parsed as a format string.
pub const FORMAT_SPECIFIER: &str = "%@";

/// Keys present in `base` but absent from `comparison`, carrying the base
/// file's line and value (the comparison file has no entry to point at).
/// Sorted by base line number so report order is reproducible.
pub fn find_missing(base: &ParsedFile, comparison: &ParsedFile) -> Vec<Declaration> {
    let mut missing: Vec<Declaration> = base
        .iter()
        .filter(|decl| !comparison.contains_key(&decl.key))
        .cloned()
        .collect();
    missing.sort_by_key(|decl| decl.line);
    missing
}

/// Subset of `missing` whose value embeds a format specifier. An overlay
/// warning for translators: these entries stay in the missing list and still
/// get translated.
pub fn format_specifier_subset(missing: &[Declaration]) -> Vec<&Declaration> {
    missing
        .iter()
        .filter(|decl| decl.value.contains(FORMAT_SPECIFIER))
        .collect()
}

/// Truncate a value for tabular display. Stored values are never touched.
pub fn display_value(value: &str) -> String {
    const MAX: usize = 60;
    if value.chars().count() > MAX {
        let cut: String = value.chars().take(MAX - 3).collect();
        format!("{cut}...")
    } else {
        value.to_string()
    }
}
