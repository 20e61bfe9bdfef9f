//! Spread narratives: the story each layout tells across its positions.

use super::QuestionCategory;
use crate::card::CardId;
use crate::deck::major;
use crate::model::DrawnCard;
use crate::spread::SpreadType;

/// Overall flow of a three-card reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Positive,
    Challenging,
    Transformative,
    Stable,
}

pub(super) fn narrate(
    cards: &[DrawnCard],
    spread: SpreadType,
    category: QuestionCategory,
) -> String {
    match spread {
        SpreadType::Single => narrate_single(cards, category),
        SpreadType::Triple => narrate_triple(cards),
        SpreadType::Celtic => narrate_celtic(cards),
    }
}

fn keyword(drawn: &DrawnCard) -> &'static str {
    drawn
        .card()
        .and_then(|c| c.keywords.first().copied())
        .unwrap_or("change")
}

fn by_position<'a>(cards: &'a [DrawnCard], key: &str) -> Option<&'a DrawnCard> {
    cards.iter().find(|c| c.position == key)
}

fn narrate_single(cards: &[DrawnCard], category: QuestionCategory) -> String {
    let Some(drawn) = cards.first() else {
        return "No card surfaced for this reading.".to_string();
    };
    let mut text = format!(
        "Your card is {}, turning this reading toward {}.",
        drawn.label(),
        keyword(drawn)
    );
    match drawn.card() {
        Some(card) if card.is_major() => text.push_str(
            " As a major arcana card it speaks to currents larger than the day to day; expect its theme to echo beyond a single moment.",
        ),
        Some(_) => text.push_str(
            " A minor arcana card: this concerns the textures of everyday life, well within your reach to shape.",
        ),
        None => {}
    }
    if category != QuestionCategory::General {
        text.push_str(" Read it against the question you brought.");
    }
    text
}

fn narrate_triple(cards: &[DrawnCard]) -> String {
    let mut text = String::new();
    for (key, lead) in [
        ("past", "In the past"),
        ("present", "In the present"),
        ("future", "Ahead of you"),
    ] {
        if let Some(drawn) = by_position(cards, key) {
            text.push_str(&format!(
                "{lead}, {} speaks of {}. ",
                drawn.label(),
                keyword(drawn)
            ));
        }
    }
    let flow_line = match classify_flow(cards) {
        Flow::Positive => "The flow runs positive: what was set in motion is ripening in your favor.",
        Flow::Challenging => {
            "The flow is challenging: reversed currents ask for care before the next step."
        }
        Flow::Transformative => {
            "The flow is transformative: a structural change is underway, not a passing mood."
        }
        Flow::Stable => "The flow is stable: steady continuation, with no sharp turns ahead.",
    };
    text.push_str(flow_line);
    text
}

// Classification rules, checked in priority order: any of Death, The Tower
// or Wheel of Fortune marks the reading transformative; two or more
// reversals mark it challenging; an upright future with nothing reversed is
// positive; everything else is stable.
fn classify_flow(cards: &[DrawnCard]) -> Flow {
    const TRANSFORMERS: [CardId; 3] = [major::DEATH, major::THE_TOWER, major::WHEEL_OF_FORTUNE];
    if cards.iter().any(|c| TRANSFORMERS.contains(&c.card_id)) {
        return Flow::Transformative;
    }
    let reversed = cards.iter().filter(|c| c.is_reversed).count();
    if reversed >= 2 {
        return Flow::Challenging;
    }
    let future_upright = by_position(cards, "future").is_some_and(|c| !c.is_reversed);
    if future_upright && reversed == 0 {
        return Flow::Positive;
    }
    Flow::Stable
}

// Celtic cross semantic areas, each narrated from its positions.
const CENTER: [&str; 2] = ["present", "challenge"];
const TIMELINE: [&str; 4] = ["foundation", "recent-past", "crown", "near-future"];
const INTERNAL: [&str; 2] = ["self", "hopes-fears"];
const EXTERNAL: [&str; 1] = ["environment"];

fn narrate_celtic(cards: &[DrawnCard]) -> String {
    let mut text = String::new();

    if let (Some(present), Some(challenge)) =
        (by_position(cards, CENTER[0]), by_position(cards, CENTER[1]))
    {
        text.push_str(&format!(
            "At the heart of the matter stands {}, crossed by {}: the tension between {} and {} defines where you are. ",
            present.label(),
            challenge.label(),
            keyword(present),
            keyword(challenge)
        ));
    }

    let timeline: Vec<&DrawnCard> = TIMELINE.iter().filter_map(|k| by_position(cards, k)).collect();
    if timeline.len() == TIMELINE.len() {
        text.push_str(&format!(
            "The story runs from {} beneath it all, through {} just passing, under a crown of {}, toward {} arriving next. ",
            timeline[0].label(),
            timeline[1].label(),
            timeline[2].label(),
            timeline[3].label()
        ));
    }

    if let (Some(self_card), Some(hopes)) =
        (by_position(cards, INTERNAL[0]), by_position(cards, INTERNAL[1]))
    {
        text.push_str(&format!(
            "Within, you bring {}, while {} carries what you hope for and fear alike. ",
            self_card.label(),
            hopes.label()
        ));
    }
    if let Some(env) = by_position(cards, EXTERNAL[0]) {
        text.push_str(&format!(
            "Around you, {} colors what others bring to the table. ",
            env.label()
        ));
    }

    // Synthesis anchored on the outcome and approach positions.
    match (by_position(cards, "outcome"), by_position(cards, "self")) {
        (Some(outcome), Some(approach)) => {
            text.push_str(&format!(
                "Taken together: the approach you carry as {} leads toward {}.",
                approach.label(),
                outcome.label()
            ));
            if outcome.is_reversed {
                text.push_str(
                    " The outcome lands reversed, so treat it as a warning that is still negotiable rather than a fixed destination.",
                );
            } else {
                text.push_str(" The path to it is already under your feet.");
            }
        }
        (Some(outcome), None) => {
            text.push_str(&format!("It all resolves toward {}.", outcome.label()));
        }
        _ => text.push_str("The spread resolves without a clear outcome card; let the center guide you."),
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use crate::deck::minor_id;
    use crate::spread;
    use chrono::Utc;

    fn drawn(card_id: CardId, position: &str, reversed: bool) -> DrawnCard {
        DrawnCard {
            card_id,
            is_reversed: reversed,
            position: position.to_string(),
            drawn_at: Utc::now(),
        }
    }

    fn triple(past: CardId, present: CardId, future: CardId, reversed: [bool; 3]) -> Vec<DrawnCard> {
        vec![
            drawn(past, "past", reversed[0]),
            drawn(present, "present", reversed[1]),
            drawn(future, "future", reversed[2]),
        ]
    }

    #[test]
    fn flow_classification_priorities() {
        let wands = |r: Rank| minor_id(Suit::Wands, r);
        // Death anywhere wins, even with reversals present.
        let t = triple(major::DEATH, wands(Rank::Two), wands(Rank::Three), [true, true, false]);
        assert_eq!(classify_flow(&t), Flow::Transformative);

        let c = triple(wands(Rank::Two), wands(Rank::Three), wands(Rank::Four), [true, true, false]);
        assert_eq!(classify_flow(&c), Flow::Challenging);

        let p = triple(wands(Rank::Two), wands(Rank::Three), major::THE_SUN, [false, false, false]);
        assert_eq!(classify_flow(&p), Flow::Positive);

        let s = triple(wands(Rank::Two), wands(Rank::Three), major::THE_SUN, [true, false, false]);
        assert_eq!(classify_flow(&s), Flow::Stable);
    }

    #[test]
    fn single_narrative_mentions_card_and_arcana() {
        let text = narrate_single(
            &[drawn(major::THE_HERMIT, "focus", false)],
            QuestionCategory::General,
        );
        assert!(text.contains("The Hermit"));
        assert!(text.contains("major arcana"));
    }

    #[test]
    fn celtic_narrative_covers_all_areas_and_outcome() {
        let cards: Vec<DrawnCard> = spread::layout(SpreadType::Celtic)
            .iter()
            .enumerate()
            .map(|(i, p)| drawn(i as CardId, p.key, false))
            .collect();
        let text = narrate_celtic(&cards);
        assert!(text.contains("heart of the matter"));
        assert!(text.contains("Taken together"));
        // The outcome position holds id 9, The Hermit.
        assert!(text.contains("The Hermit"));
    }

    #[test]
    fn reversed_outcome_softens_the_synthesis() {
        let mut cards: Vec<DrawnCard> = spread::layout(SpreadType::Celtic)
            .iter()
            .enumerate()
            .map(|(i, p)| drawn(i as CardId, p.key, false))
            .collect();
        cards[9].is_reversed = true;
        let text = narrate_celtic(&cards);
        assert!(text.contains("still negotiable"));
    }
}
