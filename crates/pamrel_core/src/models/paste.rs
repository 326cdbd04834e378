//! Paste-related data models.

use crate::detection::catalog;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digest-derived paste identifier.
///
/// Rendered externally as lowercase hexadecimal, which is the digest prefix
/// it was parsed from (minus any leading zeros).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PasteId(u128);

impl PasteId {
    /// Maximum number of hex digits an id can be parsed from.
    pub const MAX_HEX_DIGITS: usize = 32;

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }
}

impl fmt::Display for PasteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

/// Error returned when a string is not a valid hexadecimal paste id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid paste id '{0}'")]
pub struct ParsePasteIdError(String);

impl FromStr for PasteId {
    type Err = ParsePasteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= Self::MAX_HEX_DIGITS
            && s.bytes().all(|b| b.is_ascii_hexdigit());
        if !valid {
            return Err(ParsePasteIdError(s.to_string()));
        }
        u128::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| ParsePasteIdError(s.to_string()))
    }
}

impl Serialize for PasteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PasteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A stored paste with its expiry rules and view counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: PasteId,
    pub content: String,
    pub language: String,
    pub theme: String,
    pub numbers: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
    pub delete_on_views: Option<u64>,
    pub viewed: u64,
}

impl Paste {
    /// Whether the paste should be rendered with syntax highlighting.
    pub fn syntax_enabled(&self) -> bool {
        catalog::syntax_enabled(&self.language)
    }

    /// True once `now` has reached the paste's deletion deadline.
    pub fn is_time_expired(&self, now: DateTime<Utc>) -> bool {
        self.delete_at.is_some_and(|deadline| now >= deadline)
    }

    /// True once the view counter has reached the view limit.
    pub fn views_exhausted(&self) -> bool {
        self.delete_on_views
            .is_some_and(|limit| self.viewed >= limit)
    }
}

/// Side-effect-free projection returned by metadata reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteMeta {
    pub theme: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub delete_on_views: Option<u64>,
    pub delete_at: Option<DateTime<Utc>>,
    pub syntax: bool,
    pub numbers: bool,
    pub viewed: u64,
}

impl From<&Paste> for PasteMeta {
    fn from(value: &Paste) -> Self {
        Self {
            theme: value.theme.clone(),
            created: value.created_at,
            modified: value.modified_at,
            delete_on_views: value.delete_on_views,
            delete_at: value.delete_at,
            syntax: value.syntax_enabled(),
            numbers: value.numbers,
            viewed: value.viewed,
        }
    }
}

/// What the rendering layer needs to highlight a served paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightHint {
    pub language: String,
    pub syntax: bool,
    pub numbers: bool,
    pub theme: String,
}

impl From<&Paste> for HighlightHint {
    fn from(value: &Paste) -> Self {
        Self {
            language: value.language.clone(),
            syntax: value.syntax_enabled(),
            numbers: value.numbers,
            theme: value.theme.clone(),
        }
    }
}

/// Request payload for creating a paste.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, alias = "json_prettify")]
    pub pretty_print_json: bool,
    #[serde(default)]
    pub delete_on_views: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_delete_at")]
    pub delete_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub numbers: Option<bool>,
}

impl CreatePasteRequest {
    /// Request with only content set; every option takes its default.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Compact `YYYYMMDDTHH:MM:SS` form accepted for deadlines, read as UTC.
const COMPACT_DEADLINE_FORMAT: &str = "%Y%m%dT%H:%M:%S";

/// Parse a deadline given as RFC 3339 or the compact form.
pub fn parse_delete_at(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, COMPACT_DEADLINE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| format!("invalid delete_at '{}'", raw))
}

fn deserialize_delete_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_delete_at(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
