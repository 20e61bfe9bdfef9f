//! Draws cards for a spread: shuffle a working copy of the deck, sample
//! without replacement per position, and assign orientation.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::card::Card;
use crate::config::FortuneConfig;
use crate::constants::DECK_SIZE;
use crate::deck;
use crate::error::FortuneError;
use crate::model::DrawnCard;
use crate::spread::{self, SpreadType};

/// Draws one full spread. Every call works on its own freshly shuffled copy
/// of the deck, so no deck state is ever shared across users or calls.
pub fn draw(
    spread: SpreadType,
    now: DateTime<Utc>,
    config: &FortuneConfig,
) -> Result<Vec<DrawnCard>, FortuneError> {
    let mut working = deck::full_deck();
    if working.len() != DECK_SIZE {
        return Err(FortuneError::DeckIntegrity(format!(
            "expected {DECK_SIZE} cards, catalog produced {}",
            working.len()
        )));
    }
    working.shuffle(&mut rand::rng());

    let layout = spread::layout(spread);
    let mut drawn = Vec::with_capacity(layout.len());
    let mut seen = HashSet::with_capacity(layout.len());
    for position in layout {
        // Unreachable with a correct 78-card deck and layouts of at most 10
        // positions; checked defensively rather than unwrapped.
        let card = working.pop().ok_or_else(|| {
            FortuneError::DeckIntegrity(format!(
                "deck exhausted before filling position '{}'",
                position.key
            ))
        })?;
        if !seen.insert(card.id) {
            return Err(FortuneError::DeckIntegrity(format!(
                "duplicate card id {} within one spread",
                card.id
            )));
        }
        let is_reversed = roll_reversal(&card, config, &mut rand::rng());
        drawn.push(DrawnCard {
            card_id: card.id,
            is_reversed,
            position: position.key.to_string(),
            drawn_at: now,
        });
    }
    Ok(drawn)
}

/// Rolls orientation for one card: majors reverse at `p_major`, minor courts
/// at `p_court`, remaining minors at `p_minor`. Minor reversals honor the
/// explicit `minor_reversals` policy switch.
pub fn roll_reversal<R: Rng>(card: &Card, config: &FortuneConfig, rng: &mut R) -> bool {
    if card.is_major() {
        return rng.random_bool(config.p_major);
    }
    if !config.minor_reversals {
        return false;
    }
    let p = if card.is_court() { config.p_court } else { config.p_minor };
    rng.random_bool(p)
}
