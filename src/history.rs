//! Bounded per-user draw history and the statistics derived from it.
//!
//! Statistics are always recomputed in full from the draw list after each
//! insert rather than maintained incrementally, so a crash or concurrent
//! writer can never leave them drifted from the source of truth.

use chrono::{FixedOffset, NaiveDate};
use std::collections::HashMap;

use crate::card::CardId;
use crate::model::{DrawRecord, FortuneStats, TypeCounts, UserFortuneProfile};

/// Prepends a record, evicts from the tail past `cap`, and recomputes all
/// derived statistics. `offset` is the fixed engine timezone used to collapse
/// timestamps to calendar days for streaks.
pub fn push_record(
    profile: &mut UserFortuneProfile,
    record: DrawRecord,
    cap: usize,
    offset: FixedOffset,
) {
    profile.last_draw_at = Some(record.timestamp);
    profile.draws.insert(0, record);
    profile.draws.truncate(cap.max(1));
    profile.stats = recompute_stats(&profile.draws, offset);
}

/// Full stats recompute over a newest-first draw list.
pub fn recompute_stats(draws: &[DrawRecord], offset: FixedOffset) -> FortuneStats {
    let mut per_type_counts = TypeCounts::default();
    for record in draws {
        per_type_counts.bump(record.spread);
    }

    // Frequency in oldest-to-newest encounter order, so favorite-card ties
    // break toward the first-encountered id.
    let mut ordered_freq: Vec<(CardId, u32)> = Vec::new();
    for record in draws.iter().rev() {
        for card in &record.cards {
            match ordered_freq.iter_mut().find(|(id, _)| *id == card.card_id) {
                Some((_, n)) => *n += 1,
                None => ordered_freq.push((card.card_id, 1)),
            }
        }
    }
    let favorite_card = ordered_freq
        .iter()
        .fold(None, |best: Option<(CardId, u32)>, &(id, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((id, n)),
        })
        .map(|(id, _)| id);
    let per_card_frequency: HashMap<CardId, u32> = ordered_freq.into_iter().collect();

    let (current_streak, longest_streak) = streaks(draws, offset);

    FortuneStats {
        total_draws: draws.len() as u32,
        per_type_counts,
        per_card_frequency,
        favorite_card,
        current_streak,
        longest_streak,
    }
}

/// Collapses draw timestamps to unique local calendar dates and counts
/// consecutive-day runs. The current streak is the run containing the most
/// recent draw day; the longest is the maximum run anywhere in history.
fn streaks(draws: &[DrawRecord], offset: FixedOffset) -> (u32, u32) {
    let mut dates: Vec<NaiveDate> = draws
        .iter()
        .map(|r| r.timestamp.with_timezone(&offset).date_naive())
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse(); // newest first

    let mut runs: Vec<u32> = Vec::new();
    let mut prev: Option<NaiveDate> = None;
    for day in dates {
        match prev {
            Some(p) if (p - day).num_days() == 1 => {
                if let Some(last) = runs.last_mut() {
                    *last += 1;
                }
            }
            _ => runs.push(1),
        }
        prev = Some(day);
    }
    let current = runs.first().copied().unwrap_or(0);
    let longest = runs.iter().copied().max().unwrap_or(0);
    (current, longest)
}
