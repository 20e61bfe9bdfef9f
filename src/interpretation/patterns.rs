//! Cross-card pattern detection: a fixed table of notable pair combinations,
//! scanned against every unordered pair of the draw.

use crate::card::{CardId, Rank, Suit};
use crate::deck::major;
use crate::model::DrawnCard;

struct PairPattern {
    a: CardId,
    b: CardId,
    text: &'static str,
}

const fn pair(a: CardId, b: CardId, text: &'static str) -> PairPattern {
    PairPattern { a, b, text }
}

// Minor ids spelled out so the table stays const-evaluable.
const TWO_OF_CUPS: CardId = minor_id_const(Suit::Cups, Rank::Two);
const TEN_OF_CUPS: CardId = minor_id_const(Suit::Cups, Rank::Ten);
const TEN_OF_PENTACLES: CardId = minor_id_const(Suit::Pentacles, Rank::Ten);
const NINE_OF_SWORDS: CardId = minor_id_const(Suit::Swords, Rank::Nine);

const fn minor_id_const(suit: Suit, rank: Rank) -> CardId {
    let suit_index = match suit {
        Suit::Wands => 0,
        Suit::Cups => 1,
        Suit::Swords => 2,
        Suit::Pentacles => 3,
    };
    22 + suit_index * 14 + (rank as u8 - 1)
}

static PAIR_PATTERNS: [PairPattern; 11] = [
    pair(
        major::THE_FOOL,
        major::THE_WORLD,
        "The Fool meets The World: one great cycle ends exactly as another begins.",
    ),
    pair(
        major::THE_SUN,
        major::THE_MOON,
        "Sun and Moon share this reading: clarity and mystery are both at work; trust sight and instinct alike.",
    ),
    pair(
        major::DEATH,
        major::THE_TOWER,
        "Death with The Tower: sweeping transformation, sudden and thorough, clearing ground for rebuilding.",
    ),
    pair(
        major::THE_LOVERS,
        TWO_OF_CUPS,
        "The Lovers with the Two of Cups: a bond of rare mutuality sits at the heart of this reading.",
    ),
    pair(
        major::THE_MAGICIAN,
        major::THE_HIGH_PRIESTESS,
        "The Magician and The High Priestess: will and intuition in balance; act, but listen first.",
    ),
    pair(
        major::THE_DEVIL,
        major::THE_LOVERS,
        "The Devil shadows The Lovers: examine whether this attachment frees or binds.",
    ),
    pair(
        major::THE_TOWER,
        major::THE_STAR,
        "The Tower with The Star: after the collapse comes healing; the upheaval clears room for hope.",
    ),
    pair(
        major::WHEEL_OF_FORTUNE,
        major::JUSTICE,
        "Wheel of Fortune beside Justice: what turns now turns fairly; past actions come due.",
    ),
    pair(
        major::THE_EMPEROR,
        major::THE_EMPRESS,
        "The Emperor and The Empress: structure and nurture together make a powerful foundation.",
    ),
    pair(
        TEN_OF_CUPS,
        TEN_OF_PENTACLES,
        "The Tens of Cups and Pentacles together: emotional and material fulfillment arriving side by side.",
    ),
    pair(
        NINE_OF_SWORDS,
        major::THE_MOON,
        "Nine of Swords under The Moon: anxiety feeds on uncertainty; seek daylight facts before dark conclusions.",
    ),
];

/// Scans all unordered pairs of the draw against the pattern table and
/// returns the matched texts in table order.
pub(super) fn detect(cards: &[DrawnCard]) -> Vec<String> {
    let mut found = Vec::new();
    for pattern in &PAIR_PATTERNS {
        let has_a = cards.iter().any(|c| c.card_id == pattern.a);
        let has_b = cards.iter().any(|c| c.card_id == pattern.b);
        if has_a && has_b {
            found.push(pattern.text.to_string());
        }
    }
    found
}
