//! Display entries produced for a renderer.

use chrono::NaiveTime;
use serde::Serialize;

use crate::models::PeriodSlot;

/// One block of a rendered day.
///
/// Ephemeral: rebuilt from the document, the day, and the user's choices
/// on every render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDisplayEntry {
    /// Subject name, or `"A / B"` for an unresolved slot.
    pub name: String,
    /// Short name, joined the same way.
    pub short_name: String,
    /// Clock time of the block.
    pub slot: PeriodSlot,
    /// First period-unit covered (0-indexed).
    pub start: usize,
    /// Last period-unit covered, inclusive.
    pub end: usize,
    /// Whether the block is a merged lab.
    pub lab: bool,
}

impl TimetableDisplayEntry {
    /// Number of period-units covered.
    #[inline]
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Human label for the covered periods, 1-indexed ("Period 2",
    /// "Period 1 → 3").
    pub fn period_label(&self) -> String {
        if self.start == self.end {
            format!("Period {}", self.start + 1)
        } else {
            format!("Period {} → {}", self.start + 1, self.end + 1)
        }
    }
}

/// The entry in progress at `now`.
pub fn current_entry(entries: &[TimetableDisplayEntry], now: NaiveTime) -> Option<&TimetableDisplayEntry> {
    entries.iter().find(|e| e.slot.contains(now))
}

/// The next entry to start after `now`.
///
/// `None` before the day's first entry has started and once the last entry
/// has started: there is no "next" outside the teaching day.
pub fn next_entry(entries: &[TimetableDisplayEntry], now: NaiveTime) -> Option<&TimetableDisplayEntry> {
    let first = entries.first()?;
    let last = entries.last()?;
    if now < first.slot.start || now >= last.slot.start {
        return None;
    }
    entries.iter().find(|e| now < e.slot.start)
}
