//! Subscriber setup for embedders that don't install their own.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Directives used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_DIRECTIVES: &str =
    "warn,timetable::migration=info,timetable::widget=info";

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once. If another global subscriber is already
/// installed, that one is kept.
pub fn init_logging() {
    LOGGER_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true))
            .try_init();

        if installed.is_err() {
            tracing::debug!("global subscriber already set");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES).is_ok());
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging();
        init_logging();
        assert!(LOGGER_INIT.get().is_some());
    }
}
