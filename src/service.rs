//! The inbound interface of the fortune engine.
//!
//! `draw_card` runs the whole check-quota → draw → interpret → record sequence
//! as one logical unit per user: a per-user mutex serializes concurrent draw
//! requests so two of them can never both pass the quota check and both
//! persist. Both persistence calls carry a bounded timeout and fail closed
//! (no card surfaced, no quota consumed) on expiry.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

use crate::config::FortuneConfig;
use crate::constants::MAX_QUESTION_CHARS;
use crate::database::store::{ProfileStore, StoreError};
use crate::drawer;
use crate::error::FortuneError;
use crate::history;
use crate::interpretation::{self, Interpretation};
use crate::model::{DrawRecord, DrawnCard, FortuneStats, UserFortuneProfile};
use crate::quota;
use crate::spread::SpreadType;

/// A draw request as handed over by the routing layer.
#[derive(Debug, Clone)]
pub struct DrawRequest {
    pub spread: SpreadType,
    pub question: Option<String>,
}

/// A successful draw, composed for the routing layer to render.
#[derive(Debug, Clone)]
pub struct DrawResult {
    pub spread: SpreadType,
    pub question: Option<String>,
    pub cards: Vec<DrawnCard>,
    pub interpretation: Interpretation,
    /// Draws of this spread type still available today; `None` for bypass
    /// users (unlimited).
    pub remaining_draws: Option<u32>,
    pub is_special_time: bool,
}

/// Outcome of a draw request. Hitting the quota is a normal outcome, not an
/// error; hard failures surface as `FortuneError`.
#[derive(Debug, Clone)]
pub enum DrawOutcome {
    Drawn(Box<DrawResult>),
    QuotaExceeded { remaining: u32, reason: String },
}

pub struct FortuneService<S: ProfileStore> {
    store: S,
    config: FortuneConfig,
    user_locks: RwLock<HashMap<u64, Arc<Mutex<()>>>>,
}

impl<S: ProfileStore> FortuneService<S> {
    pub fn new(store: S, config: FortuneConfig) -> Self {
        Self {
            store,
            config,
            user_locks: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &FortuneConfig {
        &self.config
    }

    /// Draws a spread for the user, or reports the exhausted quota.
    #[instrument(level = "debug", skip(self, request), fields(spread = request.spread.as_str()))]
    pub async fn draw_card(
        &self,
        user_id: u64,
        request: DrawRequest,
    ) -> Result<DrawOutcome, FortuneError> {
        let lock = self.user_lock(user_id).await;
        let _serialized = lock.lock().await;

        let now = Utc::now();
        let profile = self
            .bounded(self.store.load(user_id), "profile load")
            .await?;

        let decision = quota::check(user_id, profile.as_ref(), request.spread, now, &self.config);
        if !decision.allowed {
            return Ok(DrawOutcome::QuotaExceeded {
                remaining: decision.remaining.unwrap_or(0),
                reason: decision
                    .reason
                    .unwrap_or("daily draw limit reached")
                    .to_string(),
            });
        }

        let cards = match drawer::draw(request.spread, now, &self.config) {
            Ok(cards) => cards,
            Err(e) => {
                // Invariant violation; must never reach the user unmasked.
                tracing::error!(target = "fortune.draw", user_id, error = %e, "deck integrity failure");
                return Err(e);
            }
        };

        let question = request.question.map(truncate_question);
        let interpretation =
            interpretation::interpret(&cards, request.spread, question.as_deref());
        let is_special_time = self.config.is_lucky_hour(now);

        let record = DrawRecord {
            spread: request.spread,
            question: question.clone(),
            cards: cards.clone(),
            interpretation: interpretation.clone(),
            timestamp: now,
            is_special_time,
        };

        let mut profile = profile.unwrap_or_else(|| UserFortuneProfile::new(user_id, now));
        history::push_record(
            &mut profile,
            record,
            self.config.history_cap,
            self.config.local_offset(),
        );

        // Fail closed: if this save does not land, the draw is not surfaced
        // and no quota is consumed.
        self.bounded(self.store.save(&profile), "profile save")
            .await?;

        Ok(DrawOutcome::Drawn(Box::new(DrawResult {
            spread: request.spread,
            question,
            cards,
            interpretation,
            remaining_draws: decision.remaining.map(|r| r.saturating_sub(1)),
            is_special_time,
        })))
    }

    /// The newest `limit` draw records for the user, newest first.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_history(
        &self,
        user_id: u64,
        limit: usize,
    ) -> Result<Vec<DrawRecord>, FortuneError> {
        let profile = self
            .bounded(self.store.load(user_id), "profile load")
            .await?;
        Ok(profile
            .map(|p| p.draws.into_iter().take(limit).collect())
            .unwrap_or_default())
    }

    /// Longitudinal stats; zeroed defaults for a user who never drew.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_stats(&self, user_id: u64) -> Result<FortuneStats, FortuneError> {
        let profile = self
            .bounded(self.store.load(user_id), "profile load")
            .await?;
        Ok(profile.map(|p| p.stats).unwrap_or_default())
    }

    /// Cosmetic acknowledgment only: every draw already reshuffles a fresh
    /// deck copy, so there is nothing to shuffle here.
    pub async fn shuffle_deck(&self, user_id: u64) {
        tracing::debug!(target = "fortune.draw", user_id, "cosmetic shuffle requested");
    }

    async fn user_lock(&self, user_id: u64) -> Arc<Mutex<()>> {
        if let Some(lock) = self.user_locks.read().await.get(&user_id) {
            return lock.clone();
        }
        let mut locks = self.user_locks.write().await;
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Wraps a store call in the configured timeout; expiry or store failure
    /// both become `PersistenceUnavailable`.
    async fn bounded<T, F>(&self, fut: F, what: &str) -> Result<T, FortuneError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(target = "fortune.store", error = %e, "{what} failed");
                Err(FortuneError::from(e))
            }
            Err(_) => {
                tracing::error!(target = "fortune.store", "{what} timed out");
                Err(FortuneError::PersistenceUnavailable(format!(
                    "{what} timed out"
                )))
            }
        }
    }
}

/// Questions are capped at 500 characters; truncation happens on a char
/// boundary so the stored text is what interpretation saw.
fn truncate_question(question: String) -> String {
    if question.chars().count() <= MAX_QUESTION_CHARS {
        question
    } else {
        question.chars().take(MAX_QUESTION_CHARS).collect()
    }
}
