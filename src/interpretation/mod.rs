//! Turns drawn cards plus a spread and an optional question into a layered
//! interpretation: per-card meanings, a spread narrative, cross-card pattern
//! matches, aggregate analysis and a short piece of advice.
//!
//! Partial-failure tolerance is mandatory here: a missing meaning lookup
//! degrades to a generic line, it never aborts the interpretation.

mod meanings;
mod narrative;
mod patterns;

use serde::{Deserialize, Serialize};

use crate::card::{CardId, Element, Suit};
use crate::deck;
use crate::model::DrawnCard;
use crate::spread::SpreadType;

/// Fixed question categories, matched by keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Love,
    Career,
    Money,
    Health,
    #[default]
    General,
}

/// One card's meaning in context, resolved for the asked category and the
/// card's orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReading {
    pub position: String,
    pub card_id: CardId,
    pub card_name: String,
    pub is_reversed: bool,
    pub text: String,
}

/// Aggregate counts across the whole draw. Element counts mirror the suits
/// (wands/fire, cups/water, swords/air, pentacles/earth) and are stored
/// explicitly because downstream presentation reads them independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawAnalysis {
    pub major_count: u8,
    pub reversed_count: u8,
    pub wands: u8,
    pub cups: u8,
    pub swords: u8,
    pub pentacles: u8,
    pub fire: u8,
    pub water: u8,
    pub air: u8,
    pub earth: u8,
}

impl DrawAnalysis {
    pub fn from_cards(cards: &[DrawnCard]) -> Self {
        let mut a = DrawAnalysis::default();
        for drawn in cards {
            if drawn.is_reversed {
                a.reversed_count += 1;
            }
            match drawn.card().and_then(|c| c.suit) {
                None => a.major_count += 1,
                Some(Suit::Wands) => a.wands += 1,
                Some(Suit::Cups) => a.cups += 1,
                Some(Suit::Swords) => a.swords += 1,
                Some(Suit::Pentacles) => a.pentacles += 1,
            }
        }
        for suit in Suit::ALL {
            let n = match suit {
                Suit::Wands => a.wands,
                Suit::Cups => a.cups,
                Suit::Swords => a.swords,
                Suit::Pentacles => a.pentacles,
            };
            match suit.element() {
                Element::Fire => a.fire = n,
                Element::Water => a.water = n,
                Element::Air => a.air = n,
                Element::Earth => a.earth = n,
            }
        }
        a
    }

    /// The most frequent suit in the draw, if any minor cards are present.
    /// Ties break in canonical suit order.
    pub fn dominant_suit(&self) -> Option<Suit> {
        let counts = [
            (Suit::Wands, self.wands),
            (Suit::Cups, self.cups),
            (Suit::Swords, self.swords),
            (Suit::Pentacles, self.pentacles),
        ];
        counts
            .iter()
            .filter(|(_, n)| *n > 0)
            .max_by_key(|(_, n)| *n)
            .map(|(s, _)| *s)
    }
}

/// The full synthesized interpretation of one draw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub category: QuestionCategory,
    pub readings: Vec<CardReading>,
    pub narrative: String,
    pub patterns: Vec<String>,
    pub analysis: DrawAnalysis,
    pub advice: String,
}

/// Classifies a question into a category by keyword match; `General` when no
/// keyword hits or no question was asked.
pub fn classify_question(question: Option<&str>) -> QuestionCategory {
    let Some(q) = question else {
        return QuestionCategory::General;
    };
    let q = q.to_lowercase();
    const LOVE: &[&str] = &[
        "love", "relationship", "crush", "partner", "marriage", "marry", "dating",
        "boyfriend", "girlfriend", "breakup", "romance",
    ];
    const CAREER: &[&str] = &[
        "career", "job", "work", "interview", "promotion", "boss", "coworker", "resign",
        "company", "project",
    ];
    const MONEY: &[&str] = &[
        "money", "invest", "salary", "debt", "saving", "lottery", "stock", "rent", "budget",
        "pay",
    ];
    const HEALTH: &[&str] = &[
        "health", "sick", "illness", "sleep", "pain", "doctor", "diet", "tired", "stress",
        "recover",
    ];
    let hit = |words: &[&str]| words.iter().any(|w| q.contains(w));
    if hit(LOVE) {
        QuestionCategory::Love
    } else if hit(CAREER) {
        QuestionCategory::Career
    } else if hit(MONEY) {
        QuestionCategory::Money
    } else if hit(HEALTH) {
        QuestionCategory::Health
    } else {
        QuestionCategory::General
    }
}

/// Synthesizes the full interpretation for one draw.
pub fn interpret(cards: &[DrawnCard], spread: SpreadType, question: Option<&str>) -> Interpretation {
    let category = classify_question(question);
    let readings = cards
        .iter()
        .map(|drawn| CardReading {
            position: drawn.position.clone(),
            card_id: drawn.card_id,
            card_name: deck::display_name(drawn.card_id),
            is_reversed: drawn.is_reversed,
            text: meanings::meaning_for(drawn, category),
        })
        .collect();
    let narrative = narrative::narrate(cards, spread, category);
    let patterns = patterns::detect(cards);
    let analysis = DrawAnalysis::from_cards(cards);
    let advice = compose_advice(&analysis, category);
    Interpretation { category, readings, narrative, patterns, analysis, advice }
}

/// One to three sentences: dominant-suit guidance, a reversed-card caveat
/// when any card landed reversed, and a category-specific closing line.
fn compose_advice(analysis: &DrawAnalysis, category: QuestionCategory) -> String {
    let mut advice = String::new();
    match analysis.dominant_suit() {
        Some(Suit::Wands) => advice.push_str(
            "Lead with initiative; energy spent on what genuinely excites you comes back doubled.",
        ),
        Some(Suit::Cups) => advice.push_str(
            "Let feeling inform action; a relationship or a mood deserves your attention first.",
        ),
        Some(Suit::Swords) => advice.push_str(
            "Think and speak precisely; clarity will cut this knot faster than force.",
        ),
        Some(Suit::Pentacles) => advice.push_str(
            "Tend the practical side; small concrete steps outweigh grand plans right now.",
        ),
        None => advice.push_str(
            "The major arcana dominate this draw; the currents at work are larger than daily routine, so set your course rather than your schedule.",
        ),
    }
    if analysis.reversed_count > 0 {
        advice.push_str(&format!(
            " With {} reversed card{} in play, slow down and double-check before committing.",
            analysis.reversed_count,
            if analysis.reversed_count == 1 { "" } else { "s" }
        ));
    }
    let closing = match category {
        QuestionCategory::Love => "In matters of the heart, honesty weighs more than timing.",
        QuestionCategory::Career => "At work, steady visible effort is your best argument.",
        QuestionCategory::Money => "With money, protect the base before reaching for the gain.",
        QuestionCategory::Health => "For your wellbeing, rest is a strategy, not a retreat.",
        QuestionCategory::General => {
            "Take the reading as a mirror, not a verdict; the next move is still yours."
        }
    };
    advice.push(' ');
    advice.push_str(closing);
    advice
}
