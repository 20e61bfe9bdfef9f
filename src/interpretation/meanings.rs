//! Meaning tables, keyed by stable card id (never by display string).
//!
//! Resolution order: category-specific override for (card, orientation),
//! then the card's generic upright/reversed meaning, then a neutral
//! placeholder. A miss at any level degrades, it never errors.

use super::QuestionCategory;
use crate::card::{Card, CardId};
use crate::deck::major;
use crate::model::DrawnCard;

/// Shown when a record carries an id the catalog does not know.
const FALLBACK_MEANING: &str =
    "The cards are quiet on this one; read it by your own intuition.";

// Generic (upright, reversed) meanings for major ids 0..=21.
static MAJOR_MEANINGS: [(&str, &str); 22] = [
    (
        "A fresh start invites you to step forward on faith, unburdened by the past.",
        "Recklessness or hesitation stalls you at the edge of a genuine opportunity.",
    ),
    (
        "You hold every tool you need; focused will turns intention into reality.",
        "Talent scatters or bends toward manipulation; gather your focus again.",
    ),
    (
        "The answer is already within; listen to the quiet voice beneath the noise.",
        "Intuition is being shouted down; secrets or self-doubt cloud your knowing.",
    ),
    (
        "Abundance and care are flowering; nurture what grows around you.",
        "Creative energy is smothered; watch for dependence or neglected self-care.",
    ),
    (
        "Structure and steady authority bring order; build on firm foundations.",
        "Control hardens into rigidity or slips entirely; rule yourself first.",
    ),
    (
        "Tradition and trusted guidance show the proven path.",
        "Convention chafes; it may be time to question inherited rules.",
    ),
    (
        "A union or heartfelt choice aligns your values with your path.",
        "Disharmony or an avoided choice pulls the bond out of tune.",
    ),
    (
        "Willpower and direction carry you to victory; hold the reins.",
        "Forces pull in opposite directions; recover control before pushing on.",
    ),
    (
        "Gentle courage tames what brute force cannot.",
        "Self-doubt gnaws at resolve; be patient with your own wild parts.",
    ),
    (
        "Withdraw and reflect; the lantern lights one step at a time.",
        "Solitude curdles into isolation; return from the cave with what you learned.",
    ),
    (
        "The wheel turns in your favor; ride the change rather than resisting it.",
        "A cycle drags or luck dips; what turns down will turn up again.",
    ),
    (
        "Truth and fairness prevail; actions meet their consequences.",
        "An imbalance or avoided accountability asks to be set right.",
    ),
    (
        "A willing pause reveals the view you could not see upright.",
        "Stalling serves no one; release what you are clinging to.",
    ),
    (
        "Something ends so something truer can begin; let it go cleanly.",
        "A necessary ending is being resisted; the tighter the grip, the harder the release.",
    ),
    (
        "Patience and blending find the middle way.",
        "Excess or impatience tips the scales; return to moderation.",
    ),
    (
        "Name the chain before you break it; attachment masquerades as comfort.",
        "The grip loosens; freedom from an old bond is close.",
    ),
    (
        "A sudden upheaval clears false structures; what remains is real.",
        "A needed collapse is being postponed; controlled change beats disaster.",
    ),
    (
        "Hope returns; heal slowly under a quiet, certain light.",
        "Faith runs thin; tend the small flame rather than cursing the dark.",
    ),
    (
        "Not everything is as it appears; move slowly through the fog.",
        "Confusion lifts and hidden things come to light.",
    ),
    (
        "Joy, vitality and success shine plainly; accept the warmth.",
        "The light is dimmed by doubt, yet the sun is still there behind the cloud.",
    ),
    (
        "A call to rise; reckon honestly with the past and answer it.",
        "Harsh self-judgment drowns the call; forgive before you weigh.",
    ),
    (
        "A cycle completes in wholeness; celebrate the arrival.",
        "The last loose end resists tying; finish before you begin anew.",
    ),
];

// Category-specific overrides for (card id, reversed, category). Sparse by
// design; anything absent falls through to the generic meaning.
static CATEGORY_OVERRIDES: &[(CardId, bool, QuestionCategory, &str)] = &[
    (
        major::THE_LOVERS,
        false,
        QuestionCategory::Love,
        "A meeting of equals; this connection asks for a wholehearted yes.",
    ),
    (
        major::THE_LOVERS,
        true,
        QuestionCategory::Love,
        "The bond is out of tune; an honest conversation matters more than a grand gesture.",
    ),
    (
        major::THE_SUN,
        false,
        QuestionCategory::Love,
        "Warmth without games; let yourself be seen and enjoy what is already good.",
    ),
    (
        major::THE_TOWER,
        false,
        QuestionCategory::Love,
        "A sudden truth shakes the relationship's foundations; what survives it is solid.",
    ),
    (
        major::THE_EMPEROR,
        false,
        QuestionCategory::Career,
        "Take the senior role in the room; structure and ownership get rewarded now.",
    ),
    (
        major::THE_CHARIOT,
        false,
        QuestionCategory::Career,
        "Push the project forward on your own momentum; victory favors the decisive.",
    ),
    (
        major::THE_HERMIT,
        false,
        QuestionCategory::Career,
        "Step back from the noise to master the craft; depth beats visibility this season.",
    ),
    (
        major::WHEEL_OF_FORTUNE,
        false,
        QuestionCategory::Money,
        "Fortunes are turning; favorable timing matters more than clever picks.",
    ),
    (
        major::WHEEL_OF_FORTUNE,
        true,
        QuestionCategory::Money,
        "The cycle dips; hold reserves and avoid doubling down on a falling wheel.",
    ),
    (
        major::THE_DEVIL,
        false,
        QuestionCategory::Money,
        "Watch for golden handcuffs; a lucrative arrangement may be quietly costing freedom.",
    ),
    (
        major::TEMPERANCE,
        false,
        QuestionCategory::Health,
        "Moderation is the medicine; steady small habits outwork drastic regimens.",
    ),
    (
        major::THE_STAR,
        false,
        QuestionCategory::Health,
        "Recovery is underway; give it quiet time and gentle consistency.",
    ),
    (
        major::THE_MOON,
        true,
        QuestionCategory::Health,
        "A vague worry resolves into something nameable; get the facts checked.",
    ),
];

pub(super) fn meaning_for(drawn: &DrawnCard, category: QuestionCategory) -> String {
    let Some(card) = drawn.card() else {
        tracing::warn!(
            target = "fortune.interpret",
            card_id = drawn.card_id,
            "meaning lookup miss; degrading to placeholder"
        );
        return FALLBACK_MEANING.to_string();
    };
    if let Some(text) = category_override(card.id, drawn.is_reversed, category) {
        return text.to_string();
    }
    generic_meaning(&card, drawn.is_reversed)
}

fn category_override(
    id: CardId,
    reversed: bool,
    category: QuestionCategory,
) -> Option<&'static str> {
    CATEGORY_OVERRIDES
        .iter()
        .find(|(cid, rev, cat, _)| *cid == id && *rev == reversed && *cat == category)
        .map(|(_, _, _, text)| *text)
}

fn generic_meaning(card: &Card, reversed: bool) -> String {
    if let Some(&(upright, rev)) = MAJOR_MEANINGS.get(card.id as usize) {
        return if reversed { rev } else { upright }.to_string();
    }
    minor_meaning(card, reversed)
}

/// Minor meanings compose the rank's keywords with the suit's domain, so all
/// 56 cards stay covered without a hand-written table per card.
fn minor_meaning(card: &Card, reversed: bool) -> String {
    let theme = match card.suit {
        Some(suit) => suit_theme(suit),
        None => return FALLBACK_MEANING.to_string(),
    };
    let first = card.keywords.first().copied().unwrap_or("change");
    let second = card.keywords.get(1).copied().unwrap_or(first);
    if reversed {
        format!(
            "{} reversed suggests {} blocked, delayed or overdone in the realm of {}.",
            card.display_name, first, theme
        )
    } else {
        format!(
            "{} speaks of {} and {} in the realm of {}.",
            card.display_name, first, second, theme
        )
    }
}

fn suit_theme(suit: crate::card::Suit) -> &'static str {
    use crate::card::Suit;
    match suit {
        Suit::Wands => "passion, will and creative drive",
        Suit::Cups => "emotion, relationships and intuition",
        Suit::Swords => "thought, words and conflict",
        Suit::Pentacles => "work, money and the material world",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::deck::minor_id;
    use chrono::Utc;

    fn drawn(card_id: CardId, reversed: bool) -> DrawnCard {
        DrawnCard {
            card_id,
            is_reversed: reversed,
            position: "focus".to_string(),
            drawn_at: Utc::now(),
        }
    }

    #[test]
    fn override_beats_generic_and_respects_orientation() {
        let love_up = meaning_for(&drawn(major::THE_LOVERS, false), QuestionCategory::Love);
        assert!(love_up.contains("meeting of equals"));
        let love_rev = meaning_for(&drawn(major::THE_LOVERS, true), QuestionCategory::Love);
        assert!(love_rev.contains("honest conversation"));
        // Same card, different category: falls back to the generic meaning.
        let general = meaning_for(&drawn(major::THE_LOVERS, false), QuestionCategory::General);
        assert_ne!(general, love_up);
    }

    #[test]
    fn every_card_and_orientation_has_a_nonempty_meaning() {
        for id in 0..78 {
            for reversed in [false, true] {
                for cat in [
                    QuestionCategory::Love,
                    QuestionCategory::Career,
                    QuestionCategory::Money,
                    QuestionCategory::Health,
                    QuestionCategory::General,
                ] {
                    assert!(!meaning_for(&drawn(id, reversed), cat).is_empty());
                }
            }
        }
    }

    #[test]
    fn minor_meanings_mention_the_suit_domain() {
        let text = meaning_for(
            &drawn(minor_id(Suit::Pentacles, Rank::Eight), false),
            QuestionCategory::General,
        );
        assert!(text.contains("work, money and the material world"));
    }

    #[test]
    fn unknown_id_yields_placeholder() {
        assert_eq!(
            meaning_for(&drawn(200, false), QuestionCategory::General),
            FALLBACK_MEANING
        );
    }
}
