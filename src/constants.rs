//! Central constants for deck composition, quotas and limits.

/// Total number of cards in a complete tarot deck (22 major + 56 minor).
pub const DECK_SIZE: usize = 78;
/// Number of cards in each of the four minor-arcana suits.
pub const CARDS_PER_SUIT: usize = 14;
/// Id of the first minor-arcana card; majors occupy 0..=21.
pub const MINOR_ARCANA_BASE: u8 = 22;

// Daily draw limits per spread type. The celtic cross is deliberately the
// scarcest since it is the "big" reading.
pub const DEFAULT_DAILY_LIMIT_SINGLE: u32 = 5;
pub const DEFAULT_DAILY_LIMIT_TRIPLE: u32 = 3;
pub const DEFAULT_DAILY_LIMIT_CELTIC: u32 = 1;

// Reversal probabilities by card class.
pub const P_MAJOR_REVERSAL: f64 = 0.30;
pub const P_COURT_REVERSAL: f64 = 0.25;
pub const P_MINOR_REVERSAL: f64 = 0.20;

/// Bound on stored draw records per user; older records are evicted.
pub const DEFAULT_HISTORY_CAP: usize = 100;
/// Default page size for history reads.
pub const DEFAULT_HISTORY_PAGE: usize = 20;
/// Questions longer than this are truncated before storage.
pub const MAX_QUESTION_CHARS: usize = 500;

/// The one fixed timezone the day boundary is computed in, for every user.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;
/// Local hours flagged as "lucky" on a draw (presentational only).
pub const DEFAULT_LUCKY_HOURS: [u32; 3] = [0, 22, 23];

/// Bound on each persistence call in the draw path; on expiry the draw fails
/// closed (no card surfaced, no quota consumed).
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 3_000;
