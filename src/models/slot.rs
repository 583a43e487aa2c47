//! Conditional schedule cells.
//!
//! A slot defers the choice of subject until the user's elective choices
//! are known. It lists the config keys it depends on (`match`) and an
//! ordered list of choices, each pairing a pattern over those keys with the
//! resulting subject reference.
//!
//! # Serialized forms
//!
//! ```json
//! { "match": "batch", "choices": { "B1": "PHY_LAB", "B2": "CHEM_LAB" } }
//! { "match": ["batch", "elective"],
//!   "choices": [ { "pattern": ["B1", "*"], "value": "PHY_LAB" } ] }
//! ```
//!
//! Both forms deserialize into the same [`Slot`]. Serialization always
//! writes the general form.
//!
//! # Resolution
//!
//! Strict first match in document order. A pattern token matches when it
//! is [`WILDCARD`] or equals the chosen value id at the same position.
//! Nothing matching resolves to [`FREE`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ElectiveChoices, FREE};
use crate::error::{EngineError, EngineResult};

/// Pattern token matching any value.
pub const WILDCARD: &str = "*";

/// A conditional schedule cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlotRepr")]
pub struct Slot {
    /// Config keys this slot depends on, in pattern order.
    #[serde(rename = "match")]
    pub match_keys: Vec<String>,
    /// Candidate outcomes, in priority order.
    pub choices: Vec<SlotChoice>,
}

/// One outcome of a [`Slot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotChoice {
    /// One token per match key: a value id or [`WILDCARD`].
    pub pattern: Vec<String>,
    /// Subject reference (optionally lab-suffixed) or [`FREE`].
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlotRepr {
    Simple {
        #[serde(rename = "match")]
        key: String,
        choices: IndexMap<String, String>,
    },
    General {
        #[serde(rename = "match")]
        keys: Vec<String>,
        choices: Vec<SlotChoice>,
    },
}

impl From<SlotRepr> for Slot {
    fn from(repr: SlotRepr) -> Self {
        match repr {
            SlotRepr::Simple { key, choices } => Self {
                match_keys: vec![key],
                choices: choices
                    .into_iter()
                    .map(|(id, value)| SlotChoice::new(vec![id], value))
                    .collect(),
            },
            SlotRepr::General { keys, choices } => Self {
                match_keys: keys,
                choices,
            },
        }
    }
}

impl SlotChoice {
    pub fn new(pattern: Vec<String>, value: impl Into<String>) -> Self {
        Self {
            pattern,
            value: value.into(),
        }
    }

    /// Whether this choice's pattern accepts the given positional values.
    ///
    /// A position with no value only accepts the wildcard.
    pub fn matches(&self, values: &[&str]) -> bool {
        self.pattern.iter().enumerate().all(|(i, token)| {
            token == WILDCARD || values.get(i).is_some_and(|v| token.as_str() == *v)
        })
    }
}

impl Slot {
    /// Creates a slot matching on the given keys, with no choices.
    pub fn new<I, S>(match_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            match_keys: match_keys.into_iter().map(Into::into).collect(),
            choices: Vec::new(),
        }
    }

    /// Appends a choice.
    pub fn with_choice<I, S>(mut self, pattern: I, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices.push(SlotChoice::new(
            pattern.into_iter().map(Into::into).collect(),
            value,
        ));
        self
    }

    /// Resolves against a full set of elective choices.
    ///
    /// # Errors
    /// [`EngineError::MissingChoice`] when `choices` lacks one of the
    /// slot's match keys.
    pub fn resolve(&self, choices: &ElectiveChoices) -> EngineResult<&str> {
        let values = self
            .match_keys
            .iter()
            .map(|key| {
                choices
                    .get(key)
                    .map(String::as_str)
                    .ok_or_else(|| EngineError::missing_choice(key.as_str()))
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(self.resolve_values(&values))
    }

    /// Resolves against values given positionally, aligned with `match_keys`.
    pub fn resolve_values(&self, values: &[&str]) -> &str {
        self.choices
            .iter()
            .find(|choice| choice.matches(values))
            .map_or(FREE, |choice| choice.value.as_str())
    }

    /// Distinct choice values in first-appearance order.
    pub fn explicit_values(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.choices.len());
        for choice in &self.choices {
            if !out.contains(&choice.value.as_str()) {
                out.push(&choice.value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(pairs: &[(&str, &str)]) -> ElectiveChoices {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_form_normalizes() {
        let slot: Slot = serde_json::from_str(
            r#"{"match": "batch", "choices": {"B2": "CHEM_LAB", "B1": "PHY_LAB"}}"#,
        )
        .unwrap();
        assert_eq!(slot.match_keys, vec!["batch"]);
        // document order is kept
        assert_eq!(slot.choices[0], SlotChoice::new(vec!["B2".into()], "CHEM_LAB"));
        assert_eq!(slot.choices[1], SlotChoice::new(vec!["B1".into()], "PHY_LAB"));
    }

    #[test]
    fn test_general_form() {
        let slot: Slot = serde_json::from_str(
            r#"{"match": ["batch", "elective"],
                "choices": [{"pattern": ["B1", "*"], "value": "PHY"},
                            {"pattern": ["*", "ml"], "value": "ML"}]}"#,
        )
        .unwrap();
        assert_eq!(slot.match_keys.len(), 2);
        assert_eq!(slot.choices[1].pattern, vec!["*", "ml"]);
    }

    #[test]
    fn test_serialize_writes_general_form() {
        let slot = Slot::new(["batch"]).with_choice(["B1"], "PHY");
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"match": ["batch"], "choices": [{"pattern": ["B1"], "value": "PHY"}]})
        );
        let back: Slot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn test_first_match_wins() {
        let slot = Slot::new(["batch", "elective"])
            .with_choice(["B1", "ml"], "ML_LAB")
            .with_choice(["B1", "*"], "PHY")
            .with_choice(["*", "*"], "CHEM");

        let c = choices(&[("batch", "B1"), ("elective", "ml")]);
        assert_eq!(slot.resolve(&c).unwrap(), "ML_LAB");

        let c = choices(&[("batch", "B1"), ("elective", "ai")]);
        assert_eq!(slot.resolve(&c).unwrap(), "PHY");

        let c = choices(&[("batch", "B2"), ("elective", "ml")]);
        assert_eq!(slot.resolve(&c).unwrap(), "CHEM");
    }

    #[test]
    fn test_overlapping_order_matters() {
        let general_first = Slot::new(["batch"])
            .with_choice(["*"], "GENERAL")
            .with_choice(["B1"], "SPECIFIC");
        let c = choices(&[("batch", "B1")]);
        assert_eq!(general_first.resolve(&c).unwrap(), "GENERAL");
    }

    #[test]
    fn test_no_match_is_free() {
        let slot = Slot::new(["batch"]).with_choice(["B1"], "PHY");
        let c = choices(&[("batch", "B3")]);
        assert_eq!(slot.resolve(&c).unwrap(), FREE);
    }

    #[test]
    fn test_missing_key_is_error() {
        let slot = Slot::new(["batch"]).with_choice(["B1"], "PHY");
        let err = slot.resolve(&ElectiveChoices::new()).unwrap_err();
        assert!(matches!(err, EngineError::MissingChoice { ref key } if key == "batch"));
    }

    #[test]
    fn test_extra_choices_ignored() {
        let slot = Slot::new(["batch"]).with_choice(["B1"], "PHY");
        let c = choices(&[("batch", "B1"), ("unrelated", "x")]);
        assert_eq!(slot.resolve(&c).unwrap(), "PHY");
    }

    #[test]
    fn test_explicit_values_distinct() {
        let slot = Slot::new(["batch"])
            .with_choice(["B1"], "PHY")
            .with_choice(["B2"], "CHEM")
            .with_choice(["B3"], "PHY");
        assert_eq!(slot.explicit_values(), vec!["PHY", "CHEM"]);
    }
}
