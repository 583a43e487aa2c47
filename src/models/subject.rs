//! Subject model.
//!
//! A subject is what a schedule cell ultimately points at. Schedule entries
//! refer to subjects by id, optionally with the [`LAB_SUFFIX`] appended to
//! mark a lab occurrence.
//!
//! Two sentinels exist only for display: [`Subject::free`] and
//! [`Subject::unknown`]. They are never part of a document.

use serde::{Deserialize, Serialize};

/// Suffix marking a lab occurrence of a subject (`"CS101_LAB"`).
pub const LAB_SUFFIX: &str = "_LAB";

/// Schedule value for an empty period.
pub const FREE: &str = "FREE";

/// A subject taught in the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SubjectRepr", rename_all = "camelCase")]
pub struct Subject {
    /// Full subject name.
    pub name: String,
    /// Course code.
    pub code: String,
    /// Faculty members teaching the subject.
    pub faculty: Vec<String>,
    /// Abbreviation shown in compact layouts.
    pub short_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectRepr {
    name: String,
    code: String,
    #[serde(default)]
    faculty: Vec<String>,
    short_name: Option<String>,
}

impl From<SubjectRepr> for Subject {
    fn from(repr: SubjectRepr) -> Self {
        let short_name = repr
            .short_name
            .unwrap_or_else(|| derive_short_name(&repr.name));
        Self {
            name: repr.name,
            code: repr.code,
            faculty: repr.faculty,
            short_name,
        }
    }
}

impl Subject {
    /// Creates a subject, deriving the short name from `name`.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            short_name: derive_short_name(&name),
            name,
            code: code.into(),
            faculty: Vec::new(),
        }
    }

    /// Overrides the derived short name.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty.push(faculty.into());
        self
    }

    /// Sentinel shown for free periods.
    pub fn free() -> Self {
        Self {
            name: "Free".into(),
            code: String::new(),
            faculty: Vec::new(),
            short_name: FREE.into(),
        }
    }

    /// Sentinel shown when a reference cannot be resolved.
    pub fn unknown() -> Self {
        Self {
            name: "⚠️ Unknown".into(),
            code: String::new(),
            faculty: Vec::new(),
            short_name: "⚠️ UNK".into(),
        }
    }

    /// Whether this is the free-period sentinel.
    pub fn is_free(&self) -> bool {
        *self == Self::free()
    }
}

/// Uppercase initials of the words in `name`.
///
/// "Data Structures and Algorithms" becomes "DSA".
pub fn derive_short_name(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_uppercase())
        .collect()
}

/// Whether a schedule token carries the lab marker.
#[inline]
pub fn is_lab(token: &str) -> bool {
    token.ends_with(LAB_SUFFIX)
}

/// Removes the lab marker, if present.
#[inline]
pub fn strip_lab(token: &str) -> &str {
    token.strip_suffix(LAB_SUFFIX).unwrap_or(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_derivation() {
        assert_eq!(derive_short_name("Data Structures and Algorithms"), "DSA");
        assert_eq!(derive_short_name("Physics"), "P");
        assert_eq!(derive_short_name("  Double  Spaced "), "DS");
        assert_eq!(derive_short_name(""), "");
    }

    #[test]
    fn test_deserialize_defaults_short_name() {
        let s: Subject =
            serde_json::from_str(r#"{"name": "Operating Systems", "code": "CS202", "faculty": ["Dr. A"]}"#)
                .unwrap();
        assert_eq!(s.short_name, "OS");
        assert_eq!(s.faculty, vec!["Dr. A"]);

        let s: Subject =
            serde_json::from_str(r#"{"name": "Operating Systems", "code": "CS202", "faculty": [], "shortName": "OPS"}"#)
                .unwrap();
        assert_eq!(s.short_name, "OPS");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let s = Subject::new("Linear Algebra", "MA101").with_faculty("Dr. B");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["shortName"], "LA");
        assert_eq!(json["faculty"][0], "Dr. B");
    }

    #[test]
    fn test_lab_helpers() {
        assert!(is_lab("CS101_LAB"));
        assert!(!is_lab("CS101"));
        assert_eq!(strip_lab("CS101_LAB"), "CS101");
        assert_eq!(strip_lab("CS101"), "CS101");
    }

    #[test]
    fn test_sentinels() {
        assert!(Subject::free().is_free());
        assert!(!Subject::unknown().is_free());
        assert_eq!(Subject::free().short_name, "FREE");
    }
}
