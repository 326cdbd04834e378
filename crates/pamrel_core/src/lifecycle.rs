//! Paste creation, view counting and expiry.

use crate::clock::{Clock, SystemClock};
use crate::constants::DEFAULT_THEME;
use crate::content::ContentProcessor;
use crate::db::PasteStore;
use crate::detection::{catalog, LanguageDetector};
use crate::error::AppError;
use crate::ident::IdGenerator;
use crate::models::paste::{CreatePasteRequest, HighlightHint, Paste, PasteId, PasteMeta};
use std::sync::Arc;

/// Insert attempts before a run of primary-key conflicts is reported as exhaustion.
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Observable lifecycle state of a paste id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteState {
    /// Stored and retrievable.
    Active,
    /// Stored but past its deadline or view limit; removed on next access.
    Expired,
    /// Not stored.
    Deleted,
}

/// Orchestrates content processing, id allocation and expiry over a [`PasteStore`].
pub struct PasteService<S> {
    store: S,
    clock: Arc<dyn Clock>,
    processor: ContentProcessor,
    ids: IdGenerator,
    default_theme: String,
}

impl<S: PasteStore> PasteService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            processor: ContentProcessor::default(),
            ids: IdGenerator::default(),
            default_theme: DEFAULT_THEME.to_string(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.processor = ContentProcessor::new(detector);
        self
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_default_theme(mut self, theme: impl Into<String>) -> Self {
        self.default_theme = theme.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Classify a stored paste against the current time.
    pub fn evaluate(&self, paste: &Paste) -> PasteState {
        if paste.is_time_expired(self.clock.now()) || paste.views_exhausted() {
            PasteState::Expired
        } else {
            PasteState::Active
        }
    }

    /// Current state of `id` without side effects.
    ///
    /// # Errors
    /// Propagates storage errors.
    pub fn state(&self, id: PasteId) -> Result<PasteState, AppError> {
        Ok(match self.store.get(id)? {
            Some(paste) => self.evaluate(&paste),
            None => PasteState::Deleted,
        })
    }

    /// Validate, process and persist a new paste.
    ///
    /// # Errors
    /// - [`AppError::BadRequest`] for empty content or a zero view limit.
    /// - [`AppError::UnsupportedLanguage`] for an explicit language outside the catalog.
    /// - [`AppError::InvalidContent`] when JSON pretty-printing fails.
    /// - [`AppError::CapacityExhausted`] when no free id can be allocated.
    pub fn create_paste(&self, request: CreatePasteRequest) -> Result<Paste, AppError> {
        validate_request(&request)?;

        let processed = self.processor.process(
            request.content,
            request.language.as_deref(),
            request.pretty_print_json,
        )?;
        let theme = request
            .theme
            .filter(|theme| !theme.trim().is_empty())
            .unwrap_or_else(|| self.default_theme.clone());

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let id = self
                .ids
                .generate(&self.store, self.clock.as_ref(), &processed.content)?;
            let now = self.clock.now();
            let paste = Paste {
                id,
                content: processed.content.clone(),
                language: processed.language.clone(),
                theme: theme.clone(),
                numbers: request.numbers.unwrap_or(true),
                created_at: now,
                modified_at: now,
                delete_at: request.delete_at,
                delete_on_views: request.delete_on_views,
                viewed: 0,
            };
            match self.store.insert(&paste) {
                Ok(()) => {
                    tracing::info!(
                        "Created paste {} (language: {}, {} bytes)",
                        paste.id,
                        paste.language,
                        paste.content.len()
                    );
                    return Ok(paste);
                }
                Err(AppError::Conflict(taken)) => {
                    tracing::warn!(
                        "Insert conflict on paste id {} (attempt {}/{})",
                        taken,
                        attempt,
                        MAX_INSERT_ATTEMPTS
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Err(AppError::CapacityExhausted)
    }

    /// Serve a paste, counting the view and applying expiry rules.
    ///
    /// The access that brings `viewed` up to `delete_on_views` is served and
    /// the paste is deleted right after it.
    ///
    /// # Errors
    /// [`AppError::NotFound`] for missing or expired pastes; storage errors
    /// otherwise.
    pub fn read_paste(&self, id: PasteId) -> Result<(Paste, HighlightHint), AppError> {
        let Some(current) = self.store.get(id)? else {
            return Err(AppError::NotFound);
        };
        if current.is_time_expired(self.clock.now()) {
            self.expire(id, "deadline passed")?;
            return Err(AppError::NotFound);
        }

        let Some(paste) = self.store.increment_view_and_fetch(id)? else {
            return Err(AppError::NotFound);
        };
        if let Some(limit) = paste.delete_on_views {
            if paste.viewed >= limit {
                self.expire(id, "view limit reached")?;
            }
            if paste.viewed > limit {
                return Err(AppError::NotFound);
            }
        }

        let hint = HighlightHint::from(&paste);
        Ok((paste, hint))
    }

    /// Metadata projection; never counts a view or deletes.
    ///
    /// # Errors
    /// [`AppError::NotFound`] for missing or expired pastes.
    pub fn read_meta(&self, id: PasteId) -> Result<PasteMeta, AppError> {
        match self.store.get(id)? {
            Some(paste) if self.evaluate(&paste) == PasteState::Active => {
                Ok(PasteMeta::from(&paste))
            }
            _ => Err(AppError::NotFound),
        }
    }

    /// Remove a paste on request.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the paste does not exist.
    pub fn delete_paste(&self, id: PasteId) -> Result<(), AppError> {
        if self.store.delete(id)? {
            tracing::info!("Deleted paste {}", id);
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Delete every paste whose deadline has passed.
    ///
    /// # Returns
    /// Number of rows removed.
    ///
    /// # Errors
    /// Propagates the first storage error.
    pub fn purge_expired(&self) -> Result<usize, AppError> {
        let now = self.clock.now();
        let mut removed = 0usize;
        for id in self.store.list_ids_expiring_before(now)? {
            if self.store.delete(id)? {
                removed += 1;
            }
        }
        tracing::info!("Purged {} expired paste(s)", removed);
        Ok(removed)
    }

    fn expire(&self, id: PasteId, reason: &str) -> Result<(), AppError> {
        if self.store.delete(id)? {
            tracing::info!("Expired paste {} ({})", id, reason);
        }
        Ok(())
    }
}

fn validate_request(request: &CreatePasteRequest) -> Result<(), AppError> {
    if request.content.is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }
    if request.delete_on_views == Some(0) {
        return Err(AppError::BadRequest(
            "delete_on_views must be a positive integer".to_string(),
        ));
    }
    if !request.pretty_print_json {
        if let Some(language) = request.language.as_deref().filter(|l| !l.is_empty()) {
            if !catalog::is_supported(language) {
                return Err(AppError::UnsupportedLanguage(language.to_string()));
            }
        }
    }
    Ok(())
}
