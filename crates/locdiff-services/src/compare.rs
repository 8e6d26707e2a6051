use std::path::{Path, PathBuf};

use locdiff_core::{Declaration, ParseReporting, ParsedFile, Result};
use locdiff_parsers_strings::{parse_strings_file, ParseDiagnostic};

use crate::diff::find_missing;

/// Per-comparison-file outcome: the parse, its diagnostics and the diff
/// against the base file.
#[derive(Debug)]
pub struct FileComparison {
    pub path: PathBuf,
    pub parsed: ParsedFile,
    pub diagnostics: Vec<ParseDiagnostic>,
    pub missing: Vec<Declaration>,
}

/// Result of one full compare run. Files that failed to read are absent.
#[derive(Debug)]
pub struct CompareRun {
    pub base_path: PathBuf,
    pub base: ParsedFile,
    pub base_diagnostics: Vec<ParseDiagnostic>,
    pub files: Vec<FileComparison>,
}

/// Parse the base file once and every comparison file against it.
///
/// A base-file read failure is fatal — without a base there is nothing to
/// diff. A comparison-file read failure only drops that file from the run,
/// with a warning naming it.
pub fn compare_files(
    base_path: &Path,
    comparison_paths: &[PathBuf],
    report: &ParseReporting,
) -> Result<CompareRun> {
    tracing::info!(event = "parse_base", path = %base_path.display());
    let (base, base_diagnostics) = parse_strings_file(base_path, report)?;

    let mut files = Vec::with_capacity(comparison_paths.len());
    for path in comparison_paths {
        tracing::info!(event = "parse_comparison", path = %path.display());
        let (parsed, diagnostics) = match parse_strings_file(path, report) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(event = "comparison_unreadable", path = %path.display(), error = %e);
                continue;
            }
        };

        tracing::info!(event = "scan_missing", path = %path.display());
        let missing = find_missing(&base, &parsed);
        files.push(FileComparison {
            path: path.clone(),
            parsed,
            diagnostics,
            missing,
        });
    }

    Ok(CompareRun {
        base_path: base_path.to_path_buf(),
        base,
        base_diagnostics,
        files,
    })
}
