//! Possible-values analysis.
//!
//! For each slot of a document, determines every subject reference the slot
//! could resolve to under *some* elective configuration. Used to show an
//! "A / B" cell before the user has picked their electives.
//!
//! # Algorithm
//!
//! 1. Collect the distinct choice values. If FREE is among them, nothing
//!    else can appear: done.
//! 2. Coverage: for each match position, if some value of that option is
//!    never mentioned (and no wildcard appears there), a configuration
//!    with that value matches no choice and falls through to FREE.
//! 3. A fully covered single-key slot never falls through: done.
//! 4. Otherwise enumerate the product of the slot's option domains and
//!    resolve each combination.
//!
//! # Complexity
//! Step 4 is O(Π |values(k)| · c) for the slot's match keys `k` and `c`
//! choices. Elective spaces are small in practice; past
//! [`MAX_ENUMERATED_COMBINATIONS`] the analyzer stops and assumes FREE is
//! reachable, which keeps the result a superset of the true answer.

use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::product::{cartesian_product, product_size};
use crate::models::{Slot, Timetable, FREE, WILDCARD};

/// Possible subject references per slot id.
pub type PossibleValues = IndexMap<String, Vec<String>>;

/// Upper bound on configurations enumerated for a single slot.
pub const MAX_ENUMERATED_COMBINATIONS: usize = 1 << 16;

/// Computes the possible values of every slot in `timetable`.
///
/// Pure in the document; independent of any user's choices.
pub fn all_possible_values(timetable: &Timetable) -> PossibleValues {
    let values: PossibleValues = timetable
        .slots
        .iter()
        .map(|(id, slot)| (id.clone(), possible_values(timetable, id, slot)))
        .collect();
    debug!(target: "timetable::analysis", slots = values.len(), "computed possible values");
    values
}

/// Computes the possible values of one slot.
///
/// The explicit choice values come first, in document order; FREE is
/// appended when some configuration matches no choice.
pub fn possible_values(timetable: &Timetable, slot_id: &str, slot: &Slot) -> Vec<String> {
    let explicit = slot.explicit_values();
    let mut out: Vec<String> = explicit.iter().map(|v| v.to_string()).collect();

    if explicit.contains(&FREE) {
        return out;
    }

    if can_fall_through(timetable, slot_id, slot) {
        out.push(FREE.to_string());
    }
    out
}

/// Whether some full configuration matches none of the slot's choices.
fn can_fall_through(timetable: &Timetable, slot_id: &str, slot: &Slot) -> bool {
    let mut domains: Vec<Vec<&str>> = Vec::with_capacity(slot.match_keys.len());
    for key in &slot.match_keys {
        match timetable.config.get(key) {
            Some(option) => domains.push(option.value_ids()),
            None => {
                debug!(target: "timetable::analysis", slot = slot_id, %key, "slot matches on unknown option");
                return true;
            }
        }
    }

    for (i, domain) in domains.iter().enumerate() {
        let mentioned: HashSet<&str> = slot
            .choices
            .iter()
            .filter_map(|choice| choice.pattern.get(i))
            .map(String::as_str)
            .collect();
        if mentioned.contains(WILDCARD) {
            continue;
        }
        if domain.iter().any(|value| !mentioned.contains(value)) {
            return true;
        }
    }

    if domains.len() == 1 && slot.choices.iter().all(|choice| choice.pattern.len() <= 1) {
        return false;
    }

    match product_size(&domains) {
        Some(size) if size <= MAX_ENUMERATED_COMBINATIONS => {}
        size => {
            warn!(
                target: "timetable::analysis",
                slot = slot_id,
                combinations = ?size,
                limit = MAX_ENUMERATED_COMBINATIONS,
                "configuration space too large to enumerate; assuming FREE is reachable"
            );
            return true;
        }
    }

    cartesian_product(&domains).any(|combination| slot.resolve_values(&combination) == FREE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConfigOption, ElectiveChoices, Slot, Subject};
    use proptest::prelude::*;

    fn base() -> Timetable {
        Timetable::new()
            .with_subject("PHY", Subject::new("Physics", "PH"))
            .with_subject("CHEM", Subject::new("Chemistry", "CH"))
            .with_subject("ML", Subject::new("Machine Learning", "ML"))
            .with_option(
                "batch",
                ConfigOption::new("Batch")
                    .with_value("B1", "1")
                    .with_value("B2", "2"),
            )
            .with_option(
                "elective",
                ConfigOption::new("Elective")
                    .with_value("ml", "ML")
                    .with_value("ai", "AI")
                    .with_value("nlp", "NLP"),
            )
    }

    fn values_of(tt: &Timetable, slot_id: &str) -> Vec<String> {
        all_possible_values(tt)[slot_id].clone()
    }

    #[test]
    fn test_explicit_free_short_circuits() {
        let tt = base().with_slot(
            "S",
            Slot::new(["batch"])
                .with_choice(["B1"], "PHY_LAB")
                .with_choice(["B2"], "FREE"),
        );
        assert_eq!(values_of(&tt, "S"), vec!["PHY_LAB", "FREE"]);
    }

    #[test]
    fn test_single_key_full_coverage() {
        let tt = base().with_slot(
            "S",
            Slot::new(["batch"])
                .with_choice(["B1"], "PHY_LAB")
                .with_choice(["B2"], "CHEM_LAB"),
        );
        assert_eq!(values_of(&tt, "S"), vec!["PHY_LAB", "CHEM_LAB"]);
    }

    #[test]
    fn test_single_key_partial_coverage() {
        let tt = base().with_slot("S", Slot::new(["batch"]).with_choice(["B1"], "PHY"));
        assert_eq!(values_of(&tt, "S"), vec!["PHY", "FREE"]);
    }

    #[test]
    fn test_wildcard_covers_position() {
        let tt = base().with_slot(
            "S",
            Slot::new(["batch", "elective"])
                .with_choice(["B1", "ml"], "ML")
                .with_choice(["*", "*"], "PHY"),
        );
        assert_eq!(values_of(&tt, "S"), vec!["ML", "PHY"]);
    }

    #[test]
    fn test_positionwise_coverage_is_not_enough() {
        // every value appears at its position, but (B2, ai) matches nothing
        let tt = base().with_slot(
            "S",
            Slot::new(["batch", "elective"])
                .with_choice(["B1", "ml"], "ML")
                .with_choice(["B1", "ai"], "PHY")
                .with_choice(["B2", "ml"], "CHEM")
                .with_choice(["B1", "nlp"], "CHEM"),
        );
        assert_eq!(values_of(&tt, "S"), vec!["ML", "PHY", "CHEM", "FREE"]);
    }

    #[test]
    fn test_multi_key_full_enumeration() {
        let tt = base().with_slot(
            "S",
            Slot::new(["batch", "elective"])
                .with_choice(["B1", "*"], "PHY")
                .with_choice(["B2", "ml"], "ML")
                .with_choice(["B2", "ai"], "CHEM")
                .with_choice(["B2", "nlp"], "CHEM"),
        );
        assert_eq!(values_of(&tt, "S"), vec!["PHY", "ML", "CHEM"]);
    }

    #[test]
    fn test_unknown_option_assumes_free() {
        let tt = base().with_slot("S", Slot::new(["stream"]).with_choice(["*"], "PHY"));
        assert_eq!(values_of(&tt, "S"), vec!["PHY", "FREE"]);
    }

    #[test]
    fn test_no_choices() {
        let tt = base().with_slot("S", Slot::new(["batch"]));
        assert_eq!(values_of(&tt, "S"), vec!["FREE"]);
    }

    #[test]
    fn test_slot_order_preserved() {
        let tt = base()
            .with_slot("Z", Slot::new(["batch"]).with_choice(["*"], "PHY"))
            .with_slot("A", Slot::new(["batch"]).with_choice(["*"], "CHEM"));
        let keys: Vec<String> = all_possible_values(&tt).keys().cloned().collect();
        assert_eq!(keys, vec!["Z", "A"]);
    }

    fn arb_slot() -> impl Strategy<Value = Slot> {
        let token = prop::sample::select(vec!["B1", "B2", "*"]);
        let token2 = prop::sample::select(vec!["ml", "ai", "nlp", "*"]);
        let value = prop::sample::select(vec!["PHY", "CHEM", "ML", "FREE"]);
        prop::collection::vec((token, token2, value), 0..6).prop_map(|choices| {
            choices
                .into_iter()
                .fold(Slot::new(["batch", "elective"]), |slot, (a, b, v)| {
                    slot.with_choice([a, b], v)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_possible_values_are_sound(slot in arb_slot()) {
            let tt = base().with_slot("S", slot.clone());
            let possible = values_of(&tt, "S");
            for batch in ["B1", "B2"] {
                for elective in ["ml", "ai", "nlp"] {
                    let mut choices = ElectiveChoices::new();
                    choices.insert("batch".into(), batch.into());
                    choices.insert("elective".into(), elective.into());
                    let resolved = slot.resolve(&choices).unwrap().to_string();
                    prop_assert!(possible.contains(&resolved));
                }
            }
        }

        #[test]
        fn prop_full_coverage_adds_no_free(
            b1 in prop::sample::select(vec!["PHY", "CHEM"]),
            b2 in prop::sample::select(vec!["PHY", "ML"]),
        ) {
            let slot = Slot::new(["batch"]).with_choice(["B1"], b1).with_choice(["B2"], b2);
            let tt = base().with_slot("S", slot.clone());
            let explicit: Vec<String> = slot.explicit_values().iter().map(|v| v.to_string()).collect();
            prop_assert_eq!(values_of(&tt, "S"), explicit);
        }
    }
}
