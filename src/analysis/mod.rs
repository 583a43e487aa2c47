//! Slot resolution and possible-values analysis.
//!
//! Two questions are asked of a slot:
//! - *Given* the user's choices, which subject does it show? Answered by
//!   [`resolve_slot`], a strict first-match over the slot's choices.
//! - *Before* any choice is made, which subjects could it show? Answered by
//!   [`all_possible_values`], memoized through [`PossibleValuesCache`] or
//!   [`LoadedTimetable`].
//!
//! Both are pure functions of their inputs and safe to call from any
//! thread.

mod cache;
mod possible;
mod product;

pub use cache::{DocumentKey, LoadedTimetable, PossibleValuesCache};
pub use possible::{all_possible_values, possible_values, PossibleValues, MAX_ENUMERATED_COMBINATIONS};
pub use product::{cartesian_product, product_size, CartesianProduct};

use crate::error::EngineResult;
use crate::models::{ElectiveChoices, Slot};

/// Resolves `slot` to a subject reference or FREE.
///
/// `choices` must contain every key in `slot.match_keys`; keys the slot
/// doesn't match on are ignored.
///
/// # Example
///
/// ```
/// use timetable_engine::analysis::resolve_slot;
/// use timetable_engine::models::{ElectiveChoices, Slot};
///
/// let slot = Slot::new(["batch"])
///     .with_choice(["B1"], "PHY_LAB")
///     .with_choice(["*"], "CHEM_LAB");
///
/// let mut choices = ElectiveChoices::new();
/// choices.insert("batch".into(), "B2".into());
/// assert_eq!(resolve_slot(&slot, &choices).unwrap(), "CHEM_LAB");
/// ```
pub fn resolve_slot<'a>(slot: &'a Slot, choices: &ElectiveChoices) -> EngineResult<&'a str> {
    slot.resolve(choices)
}
