//! When the widget needs redrawing.
//!
//! The displayed content changes only at period boundaries and at the
//! next-day threshold, so an embedder can sleep until the next one instead
//! of polling.

use chrono::{NaiveDateTime, NaiveTime};

use crate::models::PeriodGrid;

/// Boundaries not covered by period starts: breaks and block ends.
const EXTRA_BOUNDARIES: [(u32, u32); 5] = [(10, 25), (10, 40), (12, 40), (13, 5), (15, 40)];

/// Sorted, distinct times of day at which the display may change.
pub fn update_times(grid: &PeriodGrid, show_next_day_at: NaiveTime) -> Vec<NaiveTime> {
    let mut times: Vec<NaiveTime> = grid
        .periods
        .iter()
        .chain(grid.lab_blocks.iter())
        .map(|slot| slot.start)
        .chain(
            EXTRA_BOUNDARIES
                .iter()
                .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
        )
        .chain(std::iter::once(show_next_day_at))
        .collect();
    times.sort();
    times.dedup();
    times
}

/// The next moment, at or after `now`, at which to refresh.
///
/// Once `now` has reached `show_next_day_at` the widget already shows
/// tomorrow, so the next refresh is tomorrow's first boundary.
pub fn next_wake_time(
    now: NaiveDateTime,
    show_next_day_at: NaiveTime,
    grid: &PeriodGrid,
) -> NaiveDateTime {
    let times = update_times(grid, show_next_day_at);
    let today = now.date();
    let time = now.time();

    if show_next_day_at > time {
        if let Some(&next) = times.iter().find(|&&t| time <= t) {
            return today.and_time(next);
        }
    }

    let first = times.first().copied().unwrap_or(NaiveTime::MIN);
    today
        .succ_opt()
        .unwrap_or(today)
        .and_time(first)
}
