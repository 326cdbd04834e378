//! Save-time content transforms and language resolution.

use crate::detection::catalog::{self, JSON_LANGUAGE, PLAIN_TEXT};
use crate::detection::{HeuristicDetector, LanguageDetector};
use crate::error::AppError;
use serde_json::Value;
use std::sync::Arc;

const JSON_INDENT: &str = "    ";
const ITEM_SEPARATOR: &str = ", ";
const KEY_SEPARATOR: &str = ": ";

/// Final content and language ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedContent {
    pub content: String,
    pub language: String,
}

impl ProcessedContent {
    pub fn syntax_enabled(&self) -> bool {
        catalog::syntax_enabled(&self.language)
    }
}

/// Applies JSON pretty-printing and language classification before persistence.
#[derive(Clone)]
pub struct ContentProcessor {
    detector: Arc<dyn LanguageDetector>,
}

impl Default for ContentProcessor {
    fn default() -> Self {
        Self::new(HeuristicDetector)
    }
}

impl ContentProcessor {
    pub fn new(detector: impl LanguageDetector + 'static) -> Self {
        Self {
            detector: Arc::new(detector),
        }
    }

    /// Finalize content and language for a new paste.
    ///
    /// Explicit languages are used verbatim; catalog membership is checked by
    /// the caller.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidContent`] when `pretty_print_json` is set and
    /// `content` is not valid JSON.
    pub fn process(
        &self,
        content: String,
        language: Option<&str>,
        pretty_print_json: bool,
    ) -> Result<ProcessedContent, AppError> {
        if pretty_print_json {
            return Ok(ProcessedContent {
                content: pretty_print(&content)?,
                language: JSON_LANGUAGE.to_string(),
            });
        }

        let language = match language.filter(|value| !value.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => self.detect(&content).to_string(),
        };
        Ok(ProcessedContent { content, language })
    }

    fn detect(&self, content: &str) -> &'static str {
        match self.detector.detect(content) {
            Ok(Some(name)) => catalog::alias_for_detected(&name).unwrap_or_else(|| {
                tracing::debug!("Detected language '{}' has no catalog alias", name);
                PLAIN_TEXT
            }),
            Ok(None) => PLAIN_TEXT,
            Err(err) => {
                tracing::debug!("Language detection failed, using plain text: {}", err);
                PLAIN_TEXT
            }
        }
    }
}

/// Re-serialize JSON with sorted keys, 4-space indentation and `", "` / `": "`
/// separators.
///
/// Numbers keep their source text, so integers wider than 64 bits survive.
///
/// # Errors
/// Returns [`AppError::InvalidContent`] when `content` does not parse as JSON.
pub fn pretty_print(content: &str) -> Result<String, AppError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|err| AppError::InvalidContent(format!("Error parsing JSON content: {err}")))?;
    let mut out = String::with_capacity(content.len() + content.len() / 2);
    write_value(&value, 0, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, depth: usize, out: &mut String) -> Result<(), AppError> {
    match value {
        Value::Array(items) if !items.is_empty() => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                open_item(idx, depth + 1, out);
                write_value(item, depth + 1, out)?;
            }
            close_container(']', depth, out);
        }
        Value::Object(map) if !map.is_empty() => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
            out.push('{');
            for (idx, (key, item)) in entries.into_iter().enumerate() {
                open_item(idx, depth + 1, out);
                out.push_str(&serde_json::to_string(key)?);
                out.push_str(KEY_SEPARATOR);
                write_value(item, depth + 1, out)?;
            }
            close_container('}', depth, out);
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

fn open_item(idx: usize, depth: usize, out: &mut String) {
    if idx > 0 {
        out.push_str(ITEM_SEPARATOR);
    }
    out.push('\n');
    out.push_str(&JSON_INDENT.repeat(depth));
}

fn close_container(close: char, depth: usize, out: &mut String) {
    out.push('\n');
    out.push_str(&JSON_INDENT.repeat(depth));
    out.push(close);
}
