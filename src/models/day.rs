//! Day-of-week keys used by the `schedule` map.
//!
//! Documents spell days out in full (`"Monday"`). The three-letter forms are
//! accepted on input; output always uses the full name.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(alias = "Mon")]
    Monday,
    #[serde(alias = "Tue")]
    Tuesday,
    #[serde(alias = "Wed")]
    Wednesday,
    #[serde(alias = "Thu")]
    Thursday,
    #[serde(alias = "Fri")]
    Friday,
    #[serde(alias = "Sat")]
    Saturday,
    #[serde(alias = "Sun")]
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday to Sunday.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Full English name.
    pub fn long_name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Three-letter abbreviation.
    pub fn short_name(self) -> &'static str {
        &self.long_name()[..3]
    }

    /// The following day, wrapping Sunday to Monday.
    pub fn succ(self) -> Self {
        Self::from(Weekday::from(self).succ())
    }

    /// Day of week of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        let day: DayOfWeek = serde_json::from_str("\"Wednesday\"").unwrap();
        assert_eq!(day, DayOfWeek::Wednesday);
        let short: DayOfWeek = serde_json::from_str("\"Fri\"").unwrap();
        assert_eq!(short, DayOfWeek::Friday);
        assert_eq!(serde_json::to_string(&short).unwrap(), "\"Friday\"");
        assert!(serde_json::from_str::<DayOfWeek>("\"Funday\"").is_err());
    }

    #[test]
    fn test_succ_wraps() {
        assert_eq!(DayOfWeek::Monday.succ(), DayOfWeek::Tuesday);
        assert_eq!(DayOfWeek::Sunday.succ(), DayOfWeek::Monday);
    }

    #[test]
    fn test_of_date() {
        // 2024-01-01 was a Monday
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(DayOfWeek::of(date), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::Thursday.short_name(), "Thu");
    }
}
