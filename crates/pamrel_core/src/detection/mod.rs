//! Language detection behind a pluggable capability trait.

/// Embedded language catalog and alias canonicalization.
pub mod catalog;
mod heuristic;

use thiserror::Error;

/// Failure reported by a detector; always absorbed into the plain-text fallback.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("language detection failed: {0}")]
    Failed(String),
}

/// Guesses the language of paste content.
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of `content`.
    ///
    /// # Returns
    /// `Ok(Some(name))` on a confident guess, `Ok(None)` when the detector
    /// has no opinion.
    ///
    /// # Errors
    /// Returns [`DetectionError`] when the detector itself fails.
    fn detect(&self, content: &str) -> Result<Option<String>, DetectionError>;
}

/// Built-in keyword/shape heuristic detector.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicDetector;

impl LanguageDetector for HeuristicDetector {
    fn detect(&self, content: &str) -> Result<Option<String>, DetectionError> {
        Ok(heuristic::detect(content).map(str::to_string))
    }
}
