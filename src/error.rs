//! Engine error kinds and their propagation rules.
//!
//! A quota refusal is *not* an error — it is a normal outcome modeled by
//! `service::DrawOutcome::QuotaExceeded`. Likewise a meaning-table miss never
//! surfaces here; interpretation degrades to a generic line and continues.

use thiserror::Error;

use crate::database::store::StoreError;

/// Hard failures of the draw path. Both variants are logged with full detail
/// and should reach the user only as a generic "try again later" message.
#[derive(Debug, Error)]
pub enum FortuneError {
    /// Internal invariant violation: wrong deck size or a duplicate card
    /// surfaced within a single spread. Unreachable with a correct 78-card
    /// deck and layouts of at most 10 positions; checked defensively.
    #[error("deck integrity violation: {0}")]
    DeckIntegrity(String),

    /// The profile store timed out or failed. The draw must not be presented
    /// as successful unless it was durably recorded, otherwise quota tracking
    /// is silently bypassed.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl From<StoreError> for FortuneError {
    fn from(e: StoreError) -> Self {
        FortuneError::PersistenceUnavailable(e.to_string())
    }
}
