//! Timetable resolution engine.
//!
//! Turns a declarative weekly timetable document (subjects, elective
//! options, conditional slots, and a per-day schedule) into the concrete
//! blocks a widget shows for one day and one user's elective choices.
//!
//! # Modules
//!
//! - **`models`**: Document types: `Timetable`, `Subject`, `ConfigOption`,
//!   `Slot`, `DayOfWeek`, plus the `PeriodGrid` of clock times
//! - **`validation`**: Structural checks that accumulate every problem
//! - **`analysis`**: Slot resolution and possible-values enumeration
//! - **`display`**: Lab merging and placement of a day on the clock
//! - **`widget`**: Persisted user configuration, its migrations, and
//!   refresh timing
//! - **`logging`**: Optional `tracing` subscriber setup
//!
//! # Architecture
//!
//! Everything here is synchronous and pure over its inputs. Fetching
//! documents, persisting configuration, rendering, and waking up on time
//! are left to the embedder; the engine only defines the data exchanged
//! with them.
//!
//! # Example
//!
//! ```
//! use timetable_engine::{build_display, validate};
//! use timetable_engine::models::{DayOfWeek, Timetable};
//!
//! let doc = r#"{
//!     "subjects": {
//!         "DSA": {"name": "Data Structures", "code": "CS201"},
//!         "OS": {"name": "Operating Systems", "code": "CS202"}
//!     },
//!     "schedule": {
//!         "Monday": ["DSA_LAB", "DSA_LAB", "DSA_LAB", "OS", "FREE", "OS", "FREE"]
//!     }
//! }"#;
//!
//! let tt = Timetable::from_json(doc).unwrap();
//! assert!(validate(&tt).is_empty());
//!
//! let day = build_display(DayOfWeek::Monday, &tt, false, None);
//! assert_eq!(day.len(), 3);
//! assert!(day[0].lab);
//! assert_eq!(day[0].slot.to_string(), "8:10-10:25");
//! ```

pub mod analysis;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod validation;
pub mod widget;

pub use analysis::{all_possible_values, resolve_slot};
pub use display::build_display;
pub use error::{EngineError, EngineResult};
pub use validation::{validate, validate_schedule};
pub use widget::migrate_config;
