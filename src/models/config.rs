//! Elective configuration options.
//!
//! A config option is a user-facing choice ("Which lab batch are you in?")
//! with an ordered list of values. Slots match on the chosen value ids.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user's selected value id per config option key.
pub type ElectiveChoices = BTreeMap<String, String>;

/// A named elective choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOption {
    /// Prompt shown to the user.
    pub label: String,
    /// Selectable values, in display order.
    pub values: Vec<ConfigValue>,
}

/// One selectable value of a [`ConfigOption`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValue {
    /// Identifier referenced by slot patterns and stored in choices.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
}

impl ConfigOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: Vec::new(),
        }
    }

    /// Appends a value.
    pub fn with_value(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.values.push(ConfigValue {
            id: id.into(),
            label: label.into(),
        });
        self
    }

    /// Value ids in document order (duplicates preserved).
    pub fn value_ids(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.id.as_str()).collect()
    }

    pub fn has_value(&self, id: &str) -> bool {
        self.values.iter().any(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_builder() {
        let opt = ConfigOption::new("Lab batch")
            .with_value("B1", "Batch 1")
            .with_value("B2", "Batch 2");
        assert_eq!(opt.value_ids(), vec!["B1", "B2"]);
        assert!(opt.has_value("B2"));
        assert!(!opt.has_value("B3"));
    }

    #[test]
    fn test_deserialize() {
        let opt: ConfigOption = serde_json::from_str(
            r#"{"label": "Elective", "values": [{"id": "ml", "label": "Machine Learning"}]}"#,
        )
        .unwrap();
        assert_eq!(opt.values[0].id, "ml");
    }
}
