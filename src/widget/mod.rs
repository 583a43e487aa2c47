//! Widget state: the persisted user configuration, its schema migration,
//! and refresh scheduling.
//!
//! The engine holds no state of its own. A store loads the raw record
//! through [`migrate_config`] (or [`load_or_default`]), applies the update
//! operations on [`WidgetConfig`], and writes the result back; a scheduler
//! sleeps until [`next_wake_time`] and then calls [`WidgetConfig::tick`].

mod config;
mod migration;
mod refresh;

pub use config::{choices_compatible, WidgetConfig};
pub use migration::{load_or_default, migrate_config, CURRENT_CONFIG_VERSION};
pub use refresh::{next_wake_time, update_times};
