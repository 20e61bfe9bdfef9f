//! Spread layouts: the named positions each spread type deals into.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadType {
    Single,
    Triple,
    Celtic,
}

impl SpreadType {
    /// Parses a spread name from the routing layer. Unrecognized input falls
    /// back to `Single` — that is the documented default, not an error.
    /// Callers needing strict validation must check membership themselves.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "triple" | "three" | "three-card" => SpreadType::Triple,
            "celtic" | "celtic-cross" => SpreadType::Celtic,
            _ => SpreadType::Single,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpreadType::Single => "single",
            SpreadType::Triple => "triple",
            SpreadType::Celtic => "celtic",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SpreadType::Single => "Single Card",
            SpreadType::Triple => "Past / Present / Future",
            SpreadType::Celtic => "Celtic Cross",
        }
    }
}

/// One named slot in a spread. The description feeds the interpretation
/// engine's area grouping and narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSpec {
    pub key: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

const fn pos(key: &'static str, display_name: &'static str, description: &'static str) -> PositionSpec {
    PositionSpec { key, display_name, description }
}

static SINGLE: [PositionSpec; 1] = [pos("focus", "Focus", "the energy of the moment")];

static TRIPLE: [PositionSpec; 3] = [
    pos("past", "Past", "what shaped the situation"),
    pos("present", "Present", "where things stand now"),
    pos("future", "Future", "where the current path leads"),
];

static CELTIC: [PositionSpec; 10] = [
    pos("present", "Present", "the heart of the matter"),
    pos("challenge", "Challenge", "what crosses or tests you"),
    pos("foundation", "Foundation", "the distant past beneath the situation"),
    pos("recent-past", "Recent Past", "what is just leaving"),
    pos("crown", "Crown", "the best that can be achieved"),
    pos("near-future", "Near Future", "what approaches next"),
    pos("self", "Self", "your own approach and attitude"),
    pos("environment", "Environment", "the people and forces around you"),
    pos("hopes-fears", "Hopes and Fears", "what you long for and dread"),
    pos("outcome", "Outcome", "where it all resolves"),
];

/// The ordered, fixed layout for a spread type. Layout length always equals
/// the number of cards drawn, and position keys are unique within a layout.
pub fn layout(spread: SpreadType) -> &'static [PositionSpec] {
    match spread {
        SpreadType::Single => &SINGLE,
        SpreadType::Triple => &TRIPLE,
        SpreadType::Celtic => &CELTIC,
    }
}
