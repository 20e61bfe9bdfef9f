//! Per-user daily draw limits.
//!
//! "Today" is the window `[local_midnight, local_midnight + 24h)` in the one
//! fixed timezone the engine is configured with — every user shares the same
//! boundary regardless of where they are. The count is always recomputed from
//! the profile's draw list, never from a separately maintained counter, so it
//! self-heals from any drift.

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use crate::config::FortuneConfig;
use crate::model::UserFortuneProfile;
use crate::spread::SpreadType;

/// Outcome of a quota check. `remaining` is the number of draws still
/// available *before* the draw being considered; `None` means unlimited
/// (bypass user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub remaining: Option<u32>,
    pub reason: Option<&'static str>,
}

/// Start of the current local day, expressed back in UTC.
pub fn local_day_start(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local_midnight = now.with_timezone(&offset).date_naive().and_time(NaiveTime::MIN);
    // Fixed offsets have no DST gaps, so the mapping is always unambiguous.
    local_midnight
        .and_local_timezone(offset)
        .single()
        .expect("fixed offset has exactly one local mapping")
        .with_timezone(&Utc)
}

/// Number of draws of `spread` the profile has already made today.
/// An absent profile counts as zero draws.
pub fn draws_today(
    profile: Option<&UserFortuneProfile>,
    spread: SpreadType,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> u32 {
    let Some(profile) = profile else { return 0 };
    let today_start = local_day_start(now, offset);
    profile
        .draws
        .iter()
        .filter(|r| r.spread == spread && r.timestamp >= today_start && r.timestamp <= now)
        .count() as u32
}

/// Checks whether `user_id` may draw `spread` right now.
pub fn check(
    user_id: u64,
    profile: Option<&UserFortuneProfile>,
    spread: SpreadType,
    now: DateTime<Utc>,
    config: &FortuneConfig,
) -> QuotaDecision {
    if config.is_bypass_user(user_id) {
        // Must stay distinguishable in logs from normal draws.
        tracing::info!(
            target = "fortune.quota",
            user_id,
            spread = spread.as_str(),
            "quota bypass for designated user"
        );
        return QuotaDecision { allowed: true, remaining: None, reason: None };
    }

    let limit = config.daily_limit(spread);
    let used = draws_today(profile, spread, now, config.local_offset());
    let remaining = limit.saturating_sub(used);
    if remaining == 0 {
        tracing::debug!(
            target = "fortune.quota",
            user_id,
            spread = spread.as_str(),
            used,
            limit,
            "daily quota exhausted"
        );
        return QuotaDecision {
            allowed: false,
            remaining: Some(0),
            reason: Some("daily draw limit reached for this spread"),
        };
    }
    QuotaDecision { allowed: true, remaining: Some(remaining), reason: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpretation::Interpretation;
    use crate::model::DrawRecord;
    use chrono::TimeZone;

    fn record_at(spread: SpreadType, timestamp: DateTime<Utc>) -> DrawRecord {
        DrawRecord {
            spread,
            question: None,
            cards: Vec::new(),
            interpretation: Interpretation::default(),
            timestamp,
            is_special_time: false,
        }
    }

    fn profile_with(draws: Vec<DrawRecord>) -> UserFortuneProfile {
        let mut p = UserFortuneProfile::new(7, Utc::now());
        p.draws = draws;
        p
    }

    #[test]
    fn day_boundary_is_local_midnight_in_fixed_offset() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        // 2025-03-01 23:30 local = 14:30 UTC; day started at 15:00 UTC the
        // previous UTC day.
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 14, 30, 0).unwrap();
        let start = local_day_start(now, offset);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 2, 28, 15, 0, 0).unwrap());
    }

    #[test]
    fn nth_draw_allowed_next_denied_and_midnight_resets() {
        let config = FortuneConfig {
            daily_limits: crate::config::DailyLimits { single: 2, triple: 3, celtic: 1 },
            ..FortuneConfig::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let earlier = now - chrono::Duration::hours(1);

        let one = profile_with(vec![record_at(SpreadType::Single, earlier)]);
        let d = check(7, Some(&one), SpreadType::Single, now, &config);
        assert!(d.allowed);
        assert_eq!(d.remaining, Some(1));

        let two = profile_with(vec![
            record_at(SpreadType::Single, earlier),
            record_at(SpreadType::Single, now - chrono::Duration::minutes(5)),
        ]);
        let d = check(7, Some(&two), SpreadType::Single, now, &config);
        assert!(!d.allowed);
        assert_eq!(d.remaining, Some(0));
        assert!(d.reason.is_some());

        // Just after the next local midnight (15:00 UTC at UTC+9) the same
        // profile is allowed again.
        let after_midnight = Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 1).unwrap();
        let d = check(7, Some(&two), SpreadType::Single, after_midnight, &config);
        assert!(d.allowed);
        assert_eq!(d.remaining, Some(2));
    }

    #[test]
    fn limits_are_tracked_per_spread_type() {
        let config = FortuneConfig {
            daily_limits: crate::config::DailyLimits { single: 5, triple: 3, celtic: 1 },
            ..FortuneConfig::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();
        let p = profile_with(vec![record_at(SpreadType::Celtic, now - chrono::Duration::hours(2))]);

        assert!(!check(7, Some(&p), SpreadType::Celtic, now, &config).allowed);
        assert!(check(7, Some(&p), SpreadType::Single, now, &config).allowed);
    }

    #[test]
    fn bypass_user_is_never_limited() {
        let config = FortuneConfig {
            bypass_user_ids: vec![42],
            daily_limits: crate::config::DailyLimits { single: 1, triple: 1, celtic: 1 },
            ..FortuneConfig::default()
        };
        let now = Utc::now();
        let mut draws = Vec::new();
        for i in 0i64..50 {
            draws.push(record_at(SpreadType::Single, now - chrono::Duration::minutes(i)));
        }
        let p = profile_with(draws);
        let d = check(42, Some(&p), SpreadType::Single, now, &config);
        assert!(d.allowed);
        assert_eq!(d.remaining, None);
    }

    #[test]
    fn missing_profile_counts_as_zero_today() {
        let config = FortuneConfig::default();
        let d = check(7, None, SpreadType::Celtic, Utc::now(), &config);
        assert!(d.allowed);
        assert_eq!(d.remaining, Some(config.daily_limits.celtic));
    }
}
