//! Day display: turns one schedule day into renderable blocks.
//!
//! Consecutive lab periods at the fixed lab offsets collapse into a single
//! block spanning the lab's clock time; slots resolve through the user's
//! elective choices, or show all their possible values when there are
//! none.

mod builder;
mod entry;

pub use builder::{build_display, DisplayBuilder, DisplayOptions};
pub use entry::{current_entry, next_entry, TimetableDisplayEntry};
