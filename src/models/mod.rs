//! Timetable domain models.
//!
//! Provides the document types consumed by the engine: the timetable
//! itself, its subjects, elective options, and conditional slots, plus the
//! fixed period grid used to place resolved entries on the clock.
//!
//! # Document Mapping
//!
//! | Type | JSON key | Role |
//! |------|----------|------|
//! | `Timetable` | root | whole week |
//! | `Subject` | `subjects.*` | what a cell shows |
//! | `ConfigOption` | `config.*` | elective choice offered to the user |
//! | `Slot` | `slots.*` | cell whose subject depends on choices |
//! | `DayOfWeek` | `schedule.*` | day key |

mod config;
mod day;
mod period;
mod slot;
mod subject;
pub(crate) mod time_format;
mod timetable;

pub use config::{ConfigOption, ConfigValue, ElectiveChoices};
pub use day::DayOfWeek;
pub use period::{lab_width, PeriodGrid, PeriodSlot, LAB_STARTS, PERIODS_PER_DAY};
pub use slot::{Slot, SlotChoice, WILDCARD};
pub use subject::{derive_short_name, is_lab, strip_lab, Subject, FREE, LAB_SUFFIX};
pub use timetable::{expand_compact_day, Timetable};
