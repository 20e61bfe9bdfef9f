//! The static 78-card catalog.
//!
//! The canonical data here is never mutated; [`full_deck`] hands every caller
//! a fresh, independently mutable snapshot so no deck state is ever shared
//! across users. Major arcana ids are fixed 0..=21 in canonical order and
//! minor ids are derived arithmetically from suit and rank, so lookup by id
//! is O(1) with no table scan.

use crate::card::{Arcana, Card, CardId, Rank, Suit};
use crate::constants::{CARDS_PER_SUIT, DECK_SIZE, MINOR_ARCANA_BASE};

/// Stable ids for the major arcana, in canonical order.
pub mod major {
    use super::CardId;

    pub const THE_FOOL: CardId = 0;
    pub const THE_MAGICIAN: CardId = 1;
    pub const THE_HIGH_PRIESTESS: CardId = 2;
    pub const THE_EMPRESS: CardId = 3;
    pub const THE_EMPEROR: CardId = 4;
    pub const THE_HIEROPHANT: CardId = 5;
    pub const THE_LOVERS: CardId = 6;
    pub const THE_CHARIOT: CardId = 7;
    pub const STRENGTH: CardId = 8;
    pub const THE_HERMIT: CardId = 9;
    pub const WHEEL_OF_FORTUNE: CardId = 10;
    pub const JUSTICE: CardId = 11;
    pub const THE_HANGED_MAN: CardId = 12;
    pub const DEATH: CardId = 13;
    pub const TEMPERANCE: CardId = 14;
    pub const THE_DEVIL: CardId = 15;
    pub const THE_TOWER: CardId = 16;
    pub const THE_STAR: CardId = 17;
    pub const THE_MOON: CardId = 18;
    pub const THE_SUN: CardId = 19;
    pub const JUDGEMENT: CardId = 20;
    pub const THE_WORLD: CardId = 21;
}

// (slug, display name, keywords) for ids 0..=21.
static MAJOR_ARCANA: [(&str, &str, &[&str]); 22] = [
    ("the-fool", "The Fool", &["beginnings", "spontaneity", "leap of faith"]),
    ("the-magician", "The Magician", &["willpower", "skill", "manifestation"]),
    ("the-high-priestess", "The High Priestess", &["intuition", "mystery", "inner voice"]),
    ("the-empress", "The Empress", &["abundance", "nurturing", "creation"]),
    ("the-emperor", "The Emperor", &["structure", "authority", "stability"]),
    ("the-hierophant", "The Hierophant", &["tradition", "guidance", "convention"]),
    ("the-lovers", "The Lovers", &["union", "choice", "alignment"]),
    ("the-chariot", "The Chariot", &["drive", "victory", "control"]),
    ("strength", "Strength", &["courage", "patience", "gentle power"]),
    ("the-hermit", "The Hermit", &["solitude", "reflection", "inner search"]),
    ("wheel-of-fortune", "Wheel of Fortune", &["cycles", "turning point", "fate"]),
    ("justice", "Justice", &["fairness", "truth", "consequence"]),
    ("the-hanged-man", "The Hanged Man", &["surrender", "new perspective", "pause"]),
    ("death", "Death", &["endings", "transformation", "release"]),
    ("temperance", "Temperance", &["balance", "moderation", "blending"]),
    ("the-devil", "The Devil", &["attachment", "temptation", "restriction"]),
    ("the-tower", "The Tower", &["upheaval", "revelation", "collapse"]),
    ("the-star", "The Star", &["hope", "renewal", "serenity"]),
    ("the-moon", "The Moon", &["illusion", "uncertainty", "the subconscious"]),
    ("the-sun", "The Sun", &["joy", "vitality", "clarity"]),
    ("judgement", "Judgement", &["awakening", "reckoning", "second chance"]),
    ("the-world", "The World", &["completion", "integration", "arrival"]),
];

/// Keywords shared by every minor card of a given rank; the suit supplies the
/// domain flavor in the interpretation layer.
fn rank_keywords(rank: Rank) -> &'static [&'static str] {
    match rank {
        Rank::Ace => &["beginnings", "raw potential"],
        Rank::Two => &["balance", "choice"],
        Rank::Three => &["growth", "collaboration"],
        Rank::Four => &["stability", "rest"],
        Rank::Five => &["conflict", "loss"],
        Rank::Six => &["harmony", "recovery"],
        Rank::Seven => &["assessment", "perseverance"],
        Rank::Eight => &["movement", "mastery"],
        Rank::Nine => &["fruition", "resilience"],
        Rank::Ten => &["completion", "legacy"],
        Rank::Page => &["curiosity", "a message"],
        Rank::Knight => &["action", "pursuit"],
        Rank::Queen => &["maturity", "nurture"],
        Rank::King => &["authority", "command"],
    }
}

/// Derives the stable id of a minor-arcana card from suit and rank.
pub fn minor_id(suit: Suit, rank: Rank) -> CardId {
    let suit_index = match suit {
        Suit::Wands => 0,
        Suit::Cups => 1,
        Suit::Swords => 2,
        Suit::Pentacles => 3,
    };
    MINOR_ARCANA_BASE + suit_index * CARDS_PER_SUIT as u8 + (rank as u8 - 1)
}

/// O(1) lookup of any card by its stable id. Returns `None` for ids outside
/// 0..=77; callers in the interpretation layer degrade gracefully on a miss.
pub fn card_by_id(id: CardId) -> Option<Card> {
    if let Some(&(slug, display, keywords)) = MAJOR_ARCANA.get(id as usize) {
        return Some(Card {
            id,
            canonical_name: slug.to_string(),
            display_name: display.to_string(),
            arcana: Arcana::Major,
            suit: None,
            rank: None,
            keywords,
        });
    }
    let minor = (id as usize).checked_sub(MINOR_ARCANA_BASE as usize)?;
    if minor >= DECK_SIZE - MINOR_ARCANA_BASE as usize {
        return None;
    }
    let suit = Suit::ALL[minor / CARDS_PER_SUIT];
    let rank = Rank::ALL[minor % CARDS_PER_SUIT];
    Some(Card {
        id,
        canonical_name: format!("{}-of-{}", rank.slug(), suit.slug()),
        display_name: format!("{} of {}", rank.display_name(), suit.display_name()),
        arcana: Arcana::Minor,
        suit: Some(suit),
        rank: Some(rank),
        keywords: rank_keywords(rank),
    })
}

/// A fresh, independently mutable snapshot of the full 78-card deck.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for id in 0..DECK_SIZE as CardId {
        if let Some(card) = card_by_id(id) {
            deck.push(card);
        }
    }
    deck
}

/// Presentation helper: a card's display name, or a neutral placeholder for
/// an id the catalog does not know.
pub fn display_name(id: CardId) -> String {
    card_by_id(id).map_or_else(|| format!("Unknown Card #{id}"), |c| c.display_name)
}
