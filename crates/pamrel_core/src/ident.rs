//! Digest-derived paste identifiers.
//!
//! An id is a hex prefix of `sha1(content || timestamp)`. Short prefixes are
//! tried first so ids stay short until they collide.

use crate::clock::Clock;
use crate::db::PasteStore;
use crate::error::AppError;
use crate::models::paste::PasteId;
use chrono::{DateTime, Utc};
use sha1::{Digest, Sha1};

/// Length of the first candidate prefix, in hex digits.
const FIRST_PREFIX_LEN: usize = 5;
/// Growth of each following candidate prefix, in hex digits.
const PREFIX_STEP: usize = 6;
/// Derivation rounds before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Render `ts` the way it is fed into the digest (microsecond precision).
pub fn isoformat(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// Lowercase hex SHA-1 of `content` followed by the rendered timestamp.
pub fn digest_hex(content: &str, ts: DateTime<Utc>) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content.as_bytes());
    hasher.update(isoformat(ts).as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Candidate ids for one derivation round, shortest prefix first.
pub fn candidates(content: &str, ts: DateTime<Utc>) -> Vec<PasteId> {
    let digest = digest_hex(content, ts);
    let max_len = digest.len().min(PasteId::MAX_HEX_DIGITS);
    let mut ids: Vec<PasteId> = Vec::new();
    for len in (FIRST_PREFIX_LEN..=max_len).step_by(PREFIX_STEP) {
        let Ok(value) = u128::from_str_radix(&digest[..len], 16) else {
            continue;
        };
        let id = PasteId::new(value);
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Allocates ids that are free in a store at the time of the check.
#[derive(Debug, Clone, Copy)]
pub struct IdGenerator {
    max_attempts: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl IdGenerator {
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Return the first candidate id not present in `store`.
    ///
    /// Each round reads a fresh timestamp from `clock`.
    ///
    /// # Errors
    /// Returns [`AppError::CapacityExhausted`] when every round collides, or
    /// any store error unchanged.
    pub fn generate<S, C>(&self, store: &S, clock: &C, content: &str) -> Result<PasteId, AppError>
    where
        S: PasteStore + ?Sized,
        C: Clock + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            let ts = clock.now();
            for id in candidates(content, ts) {
                if !store.exists(id)? {
                    return Ok(id);
                }
                tracing::debug!("Candidate id {} taken (round {})", id, attempt);
            }
        }
        tracing::warn!(
            "No free paste id after {} derivation rounds",
            self.max_attempts
        );
        Err(AppError::CapacityExhausted)
    }
}
