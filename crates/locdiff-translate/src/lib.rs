//! Seam to the machine-translation backend. The rest of the workspace only
//! sees [`Translator`]; production backends and test stubs satisfy the same
//! contract.

use locdiff_core::Result;

/// Minimal interface to a batch translation service.
pub trait Translator {
    /// Translate `texts` from `src` into `dest`.
    ///
    /// The response must be positionally aligned with the request: slot *i*
    /// of the result is the translation of `texts[i]`. Callers treat any
    /// other length as a broken backend, so implementations must not reorder,
    /// drop or pad slots — except the no-op case of returning an empty list.
    fn batch_translate(&self, texts: &[String], src: &str, dest: &str) -> Result<Vec<String>>;
}

/// Reference backend that declines to translate anything.
///
/// Returning an empty list (rather than erroring) keeps the tool usable
/// without a configured service: the orchestrator records the contract
/// violation per file and the missing-declaration report stays valid.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn batch_translate(&self, texts: &[String], src: &str, dest: &str) -> Result<Vec<String>> {
        tracing::warn!(
            event = "translate_noop",
            requested = texts.len(),
            src = src,
            dest = dest,
            "translations not implemented, returning no results"
        );
        Ok(Vec::new())
    }
}
