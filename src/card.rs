//! Defines the core components of a tarot card.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable numeric card identifier, 0..=77. Majors are 0..=21 in canonical
/// order; minor ids are derived from suit and rank (see `deck::minor_id`).
/// Statistics join on this id, so it must never change across releases.
pub type CardId = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcana {
    Major,
    Minor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    /// Canonical suit order; minor ids are derived from these indices.
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    /// The classical element associated with the suit.
    pub fn element(self) -> Element {
        match self {
            Suit::Wands => Element::Fire,
            Suit::Cups => Element::Water,
            Suit::Swords => Element::Air,
            Suit::Pentacles => Element::Earth,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
        }
    }

    pub(crate) fn slug(self) -> &'static str {
        match self {
            Suit::Wands => "wands",
            Suit::Cups => "cups",
            Suit::Swords => "swords",
            Suit::Pentacles => "pentacles",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Air,
    Earth,
}

/// Minor-arcana rank. Explicit values so the id derivation can treat ranks
/// as numbers (Ace = 1 through King = 14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Page = 11,
    Knight = 12,
    Queen = 13,
    King = 14,
}

impl Rank {
    pub const ALL: [Rank; 14] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Page,
        Rank::Knight,
        Rank::Queen,
        Rank::King,
    ];

    /// Court cards reverse at a different probability than pip cards.
    pub fn is_court(self) -> bool {
        matches!(self, Rank::Page | Rank::Knight | Rank::Queen | Rank::King)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Page => "Page",
            Rank::Knight => "Knight",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }

    pub(crate) fn slug(self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "two",
            Rank::Three => "three",
            Rank::Four => "four",
            Rank::Five => "five",
            Rank::Six => "six",
            Rank::Seven => "seven",
            Rank::Eight => "eight",
            Rank::Nine => "nine",
            Rank::Ten => "ten",
            Rank::Page => "page",
            Rank::Knight => "knight",
            Rank::Queen => "queen",
            Rank::King => "king",
        }
    }
}

/// An immutable catalog entry. The canonical name is a stable slug kept for
/// exports and debugging; every lookup in the engine keys off `id`, and
/// `display_name` exists purely for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub canonical_name: String,
    pub display_name: String,
    pub arcana: Arcana,
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
    pub keywords: &'static [&'static str],
}

impl Card {
    pub fn is_major(&self) -> bool {
        self.arcana == Arcana::Major
    }

    pub fn is_court(&self) -> bool {
        self.rank.is_some_and(Rank::is_court)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}
