//! Runtime configuration for the fortune engine.
//!
//! Values come from environment variables with sensible defaults, so the bot's
//! bootstrap can simply call [`FortuneConfig::from_env`] once and hand the
//! result to the service. Tests construct the struct directly.

use std::env;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::constants::{
    DEFAULT_DAILY_LIMIT_CELTIC, DEFAULT_DAILY_LIMIT_SINGLE, DEFAULT_DAILY_LIMIT_TRIPLE,
    DEFAULT_HISTORY_CAP, DEFAULT_LUCKY_HOURS, DEFAULT_STORE_TIMEOUT_MS, DEFAULT_UTC_OFFSET_HOURS,
    P_COURT_REVERSAL, P_MAJOR_REVERSAL, P_MINOR_REVERSAL,
};
use crate::spread::SpreadType;

/// Per-spread-type daily draw limits.
#[derive(Debug, Clone, Copy)]
pub struct DailyLimits {
    pub single: u32,
    pub triple: u32,
    pub celtic: u32,
}

impl Default for DailyLimits {
    fn default() -> Self {
        Self {
            single: DEFAULT_DAILY_LIMIT_SINGLE,
            triple: DEFAULT_DAILY_LIMIT_TRIPLE,
            celtic: DEFAULT_DAILY_LIMIT_CELTIC,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FortuneConfig {
    /// Reversal probability for major arcana cards.
    pub p_major: f64,
    /// Reversal probability for minor court cards (page/knight/queen/king).
    pub p_court: f64,
    /// Reversal probability for the remaining minor cards.
    pub p_minor: f64,
    /// Whether minor-arcana cards may draw reversed at all. Disabling this is
    /// an explicit policy switch, never a silent behavioral fork.
    pub minor_reversals: bool,
    pub daily_limits: DailyLimits,
    /// Developer/test user ids that bypass the daily quota entirely.
    pub bypass_user_ids: Vec<u64>,
    /// Fixed UTC offset (hours) the day boundary is computed in for all users.
    pub utc_offset_hours: i32,
    pub history_cap: usize,
    /// Local hours flagged as "special time" on a draw. Presentational only;
    /// no effect on sampling or quota.
    pub lucky_hours: Vec<u32>,
    /// Bound on each persistence call in the draw path.
    pub store_timeout: Duration,
}

impl Default for FortuneConfig {
    fn default() -> Self {
        Self {
            p_major: P_MAJOR_REVERSAL,
            p_court: P_COURT_REVERSAL,
            p_minor: P_MINOR_REVERSAL,
            minor_reversals: true,
            daily_limits: DailyLimits::default(),
            bypass_user_ids: Vec::new(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            history_cap: DEFAULT_HISTORY_CAP,
            lucky_hours: DEFAULT_LUCKY_HOURS.to_vec(),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl FortuneConfig {
    /// Builds a config from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_parse::<i32>("FORTUNE_UTC_OFFSET_HOURS") {
            cfg.utc_offset_hours = v.clamp(-23, 23);
        }
        if let Some(v) = env_parse::<u32>("FORTUNE_DAILY_LIMIT_SINGLE") {
            cfg.daily_limits.single = v;
        }
        if let Some(v) = env_parse::<u32>("FORTUNE_DAILY_LIMIT_TRIPLE") {
            cfg.daily_limits.triple = v;
        }
        if let Some(v) = env_parse::<u32>("FORTUNE_DAILY_LIMIT_CELTIC") {
            cfg.daily_limits.celtic = v;
        }
        if let Some(v) = env_parse::<usize>("FORTUNE_HISTORY_CAP") {
            cfg.history_cap = v.max(1);
        }
        if let Some(v) = env_parse::<u64>("FORTUNE_STORE_TIMEOUT_MS") {
            cfg.store_timeout = Duration::from_millis(v);
        }
        if let Ok(raw) = env::var("FORTUNE_BYPASS_USER_IDS") {
            cfg.bypass_user_ids = raw
                .split(',')
                .filter_map(|s| s.trim().parse::<u64>().ok())
                .collect();
        }
        if let Ok(raw) = env::var("FORTUNE_MINOR_REVERSALS") {
            cfg.minor_reversals = matches!(raw.trim(), "1" | "true" | "yes");
        }
        cfg
    }

    /// The shared fixed-offset timezone for day-boundary arithmetic.
    pub fn local_offset(&self) -> FixedOffset {
        let hours = self.utc_offset_hours.clamp(-23, 23);
        FixedOffset::east_opt(hours * 3600).expect("clamped offset is in range")
    }

    pub fn daily_limit(&self, spread: SpreadType) -> u32 {
        match spread {
            SpreadType::Single => self.daily_limits.single,
            SpreadType::Triple => self.daily_limits.triple,
            SpreadType::Celtic => self.daily_limits.celtic,
        }
    }

    pub fn is_bypass_user(&self, user_id: u64) -> bool {
        self.bypass_user_ids.contains(&user_id)
    }

    /// Whether `now` falls inside a configured lucky hour, evaluated in the
    /// shared fixed timezone.
    pub fn is_lucky_hour(&self, now: DateTime<Utc>) -> bool {
        let hour = now.with_timezone(&self.local_offset()).hour();
        self.lucky_hours.contains(&hour)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
