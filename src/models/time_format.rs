//! `serde(with)` adapter for times of day.
//!
//! Writes `"HH:MM"`. Reads `"HH:MM"`, `"HH:MM:SS"` and fractional seconds.

use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serializer};

const OUTPUT_FORMAT: &str = "%H:%M";
const INPUT_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format(OUTPUT_FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid time of day: {raw:?}")))
}

/// Parses a time of day in any accepted input format.
pub fn parse(raw: &str) -> Option<NaiveTime> {
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
}
