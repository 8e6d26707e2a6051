use std::path::{Path, PathBuf};

use locdiff_core::{
    Declaration, LocdiffError, ParseReporting, Result, TranslatedDeclaration,
};
use locdiff_translate::Translator;

use crate::compare::FileComparison;
use crate::lang::resolve_language;

/// Translations fetched for one comparison file.
#[derive(Debug)]
pub struct TranslatedFile {
    pub path: PathBuf,
    pub dest_lang: String,
    pub translated: Vec<TranslatedDeclaration>,
    /// Missing declarations the backend returned an empty slot for; these
    /// still need a human translator.
    pub manual: Vec<Declaration>,
}

/// Submit one ordered batch for a single file and zip the response back onto
/// the declarations it was built from.
///
/// The backend contract is positional: slot *i* of the response translates
/// `missing[i].value`. Any other response length is a backend bug surfaced as
/// [`LocdiffError::TranslationLengthMismatch`] — never silently truncated or
/// padded. Slots translated to the empty string are dropped from the output.
pub fn translate_missing(
    translator: &dyn Translator,
    missing: &[Declaration],
    src: &str,
    dest: &str,
) -> Result<Vec<TranslatedDeclaration>> {
    if missing.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = missing.iter().map(|decl| decl.value.clone()).collect();
    let translations = translator.batch_translate(&texts, src, dest)?;

    if translations.len() != texts.len() {
        return Err(LocdiffError::TranslationLengthMismatch {
            want: texts.len(),
            got: translations.len(),
        }
        .into());
    }

    Ok(missing
        .iter()
        .zip(translations)
        .filter(|(_, translation)| !translation.is_empty())
        .map(|(decl, translation)| TranslatedDeclaration {
            key: decl.key.clone(),
            line: decl.line,
            value: decl.value.clone(),
            translation,
        })
        .collect())
}

/// Run translation over every comparison file's diff result, one independent
/// batch per file. A failure (unresolvable language, backend error, length
/// mismatch) kills only that file's translation; the file is then absent from
/// the returned list. The missing-declaration report stays valid either way.
pub fn translate_all(
    translator: &dyn Translator,
    base_path: &Path,
    files: &[FileComparison],
    report: &ParseReporting,
) -> Vec<TranslatedFile> {
    let src = match resolve_language(base_path) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(event = "source_lang_unresolved", path = %base_path.display(), error = %e);
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for file in files {
        if file.missing.is_empty() {
            tracing::info!(event = "translate_skip_empty", path = %file.path.display());
            continue;
        }

        let dest = match resolve_language(&file.path) {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(event = "dest_lang_unresolved", path = %file.path.display(), error = %e);
                continue;
            }
        };
        tracing::info!(
            event = "translate_batch",
            path = %file.path.display(),
            src = %src,
            dest = %dest,
            count = file.missing.len()
        );

        let translated = match translate_missing(translator, &file.missing, &src, &dest) {
            Ok(translated) => translated,
            Err(e) => {
                tracing::error!(event = "translate_failed", path = %file.path.display(), error = %e);
                continue;
            }
        };

        let manual = if report.manual_translation {
            file.missing
                .iter()
                .filter(|decl| !translated.iter().any(|t| t.key == decl.key))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        out.push(TranslatedFile {
            path: file.path.clone(),
            dest_lang: dest,
            translated,
            manual,
        });
    }
    out
}
