//! Shared data structures for draws, history and the persisted user profile.
//! The profile serializes as one JSON document per user, which is exactly the
//! shape the document store persists (see `database::postgres`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::card::{Card, CardId};
use crate::deck;
use crate::interpretation::Interpretation;
use crate::spread::SpreadType;

/// One card as it landed in a spread. Created fresh per draw, embedded by
/// value in the record, never mutated afterwards. Only the stable id is
/// stored; the catalog entry is resolved on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub card_id: CardId,
    pub is_reversed: bool,
    /// Spread-slot key this card landed in (e.g. `"near-future"`).
    pub position: String,
    pub drawn_at: DateTime<Utc>,
}

impl DrawnCard {
    /// Resolves the catalog entry for this card. `None` only for a corrupt
    /// record with an out-of-range id.
    pub fn card(&self) -> Option<Card> {
        deck::card_by_id(self.card_id)
    }

    /// Display label including orientation, for presentation layers.
    pub fn label(&self) -> String {
        let name = deck::display_name(self.card_id);
        if self.is_reversed {
            format!("{name} (reversed)")
        } else {
            name
        }
    }
}

/// One completed draw. Immutable once created; appended to the profile's
/// history and pruned from the tail once the cap is exceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRecord {
    pub spread: SpreadType,
    pub question: Option<String>,
    pub cards: Vec<DrawnCard>,
    pub interpretation: Interpretation,
    pub timestamp: DateTime<Utc>,
    /// Whether the draw happened during a configured lucky hour.
    /// Presentational only.
    pub is_special_time: bool,
}

/// Per-spread-type draw counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub single: u32,
    pub triple: u32,
    pub celtic: u32,
}

impl TypeCounts {
    pub fn bump(&mut self, spread: SpreadType) {
        match spread {
            SpreadType::Single => self.single += 1,
            SpreadType::Triple => self.triple += 1,
            SpreadType::Celtic => self.celtic += 1,
        }
    }
}

/// Longitudinal statistics, recomputed in full from the draw list after every
/// successful draw (never incrementally maintained, so they cannot drift).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FortuneStats {
    pub total_draws: u32,
    pub per_type_counts: TypeCounts,
    /// How often each card id has appeared, counting every card of every
    /// record, not only the primary one.
    pub per_card_frequency: HashMap<CardId, u32>,
    /// Max-frequency card id; ties break toward the first-encountered id.
    pub favorite_card: Option<CardId>,
    /// Consecutive calendar days (in the fixed engine timezone) ending at the
    /// most recent draw day.
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// The per-user document. Created lazily on first draw; never hard-deleted
/// by this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFortuneProfile {
    pub user_id: u64,
    /// Bounded draw history, newest first.
    pub draws: Vec<DrawRecord>,
    pub stats: FortuneStats,
    /// Carried for the achievements feature; this engine stores but never
    /// interprets them.
    #[serde(default)]
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_draw_at: Option<DateTime<Utc>>,
}

impl UserFortuneProfile {
    pub fn new(user_id: u64, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            draws: Vec::new(),
            stats: FortuneStats::default(),
            achievements: Vec::new(),
            created_at: now,
            last_draw_at: None,
        }
    }
}
