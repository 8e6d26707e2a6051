use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use locdiff_core::{Declaration, ParseReporting, ParsedFile, Result};
use regex::Regex;
use serde::Serialize;
use walkdir::WalkDir;

/// One reportable event produced while parsing. The library never prints;
/// the CLI decides how to render these (or a JSON writer serializes them).
#[derive(Debug, Clone, Serialize)]
pub struct ParseDiagnostic {
    pub path: String,
    /// 0-based line index the event refers to.
    pub line: usize,
    /// Машиночитаемый тип события: "empty-line" | "pattern-mismatch" | "duplicate-key"
    pub kind: String,
    /// Offending trimmed text (pattern-mismatch only).
    pub text: Option<String>,
    /// Key involved (duplicate-key only).
    pub key: Option<String>,
    /// Line of the kept first occurrence (duplicate-key only).
    pub first_line: Option<usize>,
}

/// Разбирает файл формата `"ключ" = "значение";` построчно.
///
/// Malformed input is a reporting event, never an error: blank lines and
/// non-matching lines are skipped, duplicate keys keep the first occurrence.
/// Diagnostics are collected only for the event kinds enabled in `report`.
/// Fails only when the file itself cannot be read.
pub fn parse_strings_file(
    path: &Path,
    report: &ParseReporting,
) -> Result<(ParsedFile, Vec<ParseDiagnostic>)> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(parse_strings_text(&text, path, report))
}

/// Same as [`parse_strings_file`] but over an in-memory string.
pub fn parse_strings_text(
    text: &str,
    path: &Path,
    report: &ParseReporting,
) -> (ParsedFile, Vec<ParseDiagnostic>) {
    // Greedy groups: the key runs up to the last `" = "`, the value up to the
    // trailing `";` — this is what disambiguates interior quotes.
    let pattern = Regex::new(r#"^"(.*)" *= *"(.*)";"#).unwrap();

    let mut parsed = ParsedFile::new();
    let mut diagnostics = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();

        let Some(caps) = pattern.captures(line) else {
            if line.is_empty() {
                if report.empty_line {
                    diagnostics.push(ParseDiagnostic {
                        path: path.display().to_string(),
                        line: i,
                        kind: "empty-line".into(),
                        text: None,
                        key: None,
                        first_line: None,
                    });
                }
            } else if report.mismatch_pattern {
                diagnostics.push(ParseDiagnostic {
                    path: path.display().to_string(),
                    line: i,
                    kind: "pattern-mismatch".into(),
                    text: Some(line.to_string()),
                    key: None,
                    first_line: None,
                });
            }
            continue;
        };

        let decl = Declaration {
            key: caps[1].to_string(),
            line: i,
            value: caps[2].to_string(),
        };

        if let Some(existing) = parsed.insert_first(decl) {
            if report.duplicate_key {
                diagnostics.push(ParseDiagnostic {
                    path: path.display().to_string(),
                    line: i,
                    kind: "duplicate-key".into(),
                    text: None,
                    key: Some(existing.key.clone()),
                    first_line: Some(existing.line),
                });
            }
        }
    }

    (parsed, diagnostics)
}

/// Collect every file literally named `Localizable.strings` beneath `root`,
/// excluding the base file if it lies inside the tree. Paths come back sorted
/// so runs over the same tree are deterministic.
pub fn collect_language_files(root: &Path, exclude: Option<&Path>) -> Vec<PathBuf> {
    let exclude_canon = exclude.map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()));

    let mut out: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if path.file_name().map(|n| n == "Localizable.strings") != Some(true) {
            continue;
        }
        if let Some(ex) = exclude_canon.as_deref() {
            let canon = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
            if canon == ex {
                continue;
            }
        }
        out.push(path.to_path_buf());
    }
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(text: &str, report: &ParseReporting) -> (ParsedFile, Vec<ParseDiagnostic>) {
        parse_strings_text(text, Path::new("en.lproj/Localizable.strings"), report)
    }

    #[test]
    fn recovers_key_value_and_line_index() {
        let (parsed, diags) = parse(
            "\"hi\" = \"Hello\";\n\"bye\" = \"Bye\";\n",
            &ParseReporting::default(),
        );
        assert!(diags.is_empty());
        assert_eq!(parsed.len(), 2);
        let hi = parsed.get("hi").unwrap();
        assert_eq!((hi.line, hi.value.as_str()), (0, "Hello"));
        let bye = parsed.get("bye").unwrap();
        assert_eq!((bye.line, bye.value.as_str()), (1, "Bye"));
    }

    #[test]
    fn tolerates_whitespace_variations() {
        let (parsed, _) = parse(
            "   \"a\" = \"1\";   \n\"b\"=\"2\";\n\"c\"  =  \"3\";\n",
            &ParseReporting::silent(),
        );
        assert_eq!(parsed.get("a").unwrap().value, "1");
        assert_eq!(parsed.get("b").unwrap().value, "2");
        assert_eq!(parsed.get("c").unwrap().value, "3");
    }

    #[test]
    fn greedy_match_keeps_interior_quotes() {
        let (parsed, _) = parse(
            "\"quote\" = \"He said \"no\"\";\n",
            &ParseReporting::silent(),
        );
        assert_eq!(parsed.get("quote").unwrap().value, "He said \"no\"");
    }

    #[test]
    fn duplicate_key_keeps_first_occurrence() {
        let (parsed, diags) = parse(
            "\"k\" = \"first\";\n\"k\" = \"second\";\n",
            &ParseReporting::default(),
        );
        assert_eq!(parsed.len(), 1);
        let kept = parsed.get("k").unwrap();
        assert_eq!((kept.line, kept.value.as_str()), (0, "first"));

        assert_eq!(diags.len(), 1);
        let d = &diags[0];
        assert_eq!(d.kind, "duplicate-key");
        assert_eq!(d.key.as_deref(), Some("k"));
        assert_eq!(d.first_line, Some(0));
        assert_eq!(d.line, 1);
    }

    #[test]
    fn malformed_lines_are_events_not_errors() {
        let text = "garbage\n\n\"ok\" = \"yes\";\n// comment\n";
        let (parsed, diags) = parse(text, &ParseReporting::verbose());
        assert_eq!(parsed.len(), 1);

        let kinds: Vec<&str> = diags.iter().map(|d| d.kind.as_str()).collect();
        assert_eq!(kinds, ["pattern-mismatch", "empty-line", "pattern-mismatch"]);
        assert_eq!(diags[0].text.as_deref(), Some("garbage"));
    }

    #[test]
    fn silent_policy_collects_nothing() {
        let text = "garbage\n\n\"k\" = \"a\";\n\"k\" = \"b\";\n";
        let (_, diags) = parse(text, &ParseReporting::silent());
        assert!(diags.is_empty());
    }

    #[test]
    fn parse_is_idempotent() {
        let text = "\"x\" = \"1\";\nnoise\n\"y\" = \"2\";\n";
        let (a, _) = parse(text, &ParseReporting::default());
        let (b, _) = parse(text, &ParseReporting::default());
        assert_eq!(a.len(), b.len());
        for decl in a.iter() {
            assert_eq!(b.get(&decl.key), Some(decl));
        }
    }

    #[test]
    fn collects_only_localizable_strings_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let fr = tmp.path().join("fr.lproj");
        let de = tmp.path().join("nested").join("de.lproj");
        std::fs::create_dir_all(&fr).unwrap();
        std::fs::create_dir_all(&de).unwrap();
        std::fs::write(fr.join("Localizable.strings"), "").unwrap();
        std::fs::write(de.join("Localizable.strings"), "").unwrap();
        std::fs::write(fr.join("Other.strings"), "").unwrap();

        let base = fr.join("Localizable.strings");
        let files = collect_language_files(tmp.path(), Some(&base));
        assert_eq!(files, vec![de.join("Localizable.strings")]);
    }
}
