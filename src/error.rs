//! Error types for the timetable engine.
//!
//! Structural problems in a timetable document are *not* errors here: they
//! are accumulated as [`ValidationError`](crate::validation::ValidationError)
//! values. `EngineError` covers the few conditions a caller has to branch on.

use thiserror::Error;
use tracing::warn;

/// Result alias used across the crate.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the engine entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The timetable document is not well-formed JSON or does not have the
    /// expected shape.
    #[error("failed to parse timetable document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A slot was resolved against a choice map that lacks one of the keys
    /// the slot matches on.
    #[error("no choice selected for config option '{key}'")]
    MissingChoice { key: String },

    /// A persisted widget configuration could not be parsed or migrated.
    /// Callers replace it with the default record.
    #[error("corrupt configuration: {reason}")]
    CorruptConfig { reason: String },
}

impl EngineError {
    pub fn missing_choice(key: impl Into<String>) -> Self {
        let key = key.into();
        warn!(target: "timetable::analysis", %key, "slot resolved without a required choice");
        EngineError::MissingChoice { key }
    }

    pub fn corrupt_config(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!(target: "timetable::migration", %reason, "corrupt widget configuration");
        EngineError::CorruptConfig { reason }
    }

    /// Whether the caller should discard the stored record and use defaults.
    pub fn is_corrupt_config(&self) -> bool {
        matches!(self, EngineError::CorruptConfig { .. })
    }
}
