//! Lap and race time formatting.
//!
//! Times are displayed the way timing screens show them: `1:20:48.233` for a
//! race distance, `1:24.319` for a lap and `2.456` for anything under a minute.
//! The same text form is accepted when reading fixture data.

use std::time::Duration;

const MILLIS_PER_SECOND: u128 = 1_000;
const MILLIS_PER_MINUTE: u128 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u128 = 60 * MILLIS_PER_MINUTE;

/// Format a duration with millisecond precision.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_millis();
    let hours = total / MILLIS_PER_HOUR;
    let minutes = (total % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (total % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let millis = total % MILLIS_PER_SECOND;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else if minutes > 0 {
        format!("{}:{:02}.{:03}", minutes, seconds, millis)
    } else {
        format!("{}.{:03}", seconds, millis)
    }
}

/// Format an optional time for display.
///
/// A zero duration is treated the same as a missing one.
pub fn format_optional(duration: Option<Duration>) -> Option<String> {
    duration.filter(|d| !d.is_zero()).map(format_duration)
}

/// Parse `H:MM:SS.fff`, `M:SS.fff` or `S.fff` into a duration.
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    let text = text.trim();
    let parts: Vec<&str> = text.split(':').collect();
    if text.is_empty() || parts.len() > 3 {
        return Err(format!("invalid time '{}'", text));
    }

    let (whole_parts, seconds_part) = parts.split_at(parts.len() - 1);
    let mut total_seconds: u64 = 0;
    for part in whole_parts {
        let value: u64 = part.parse().map_err(|_| format!("invalid time component '{}'", part))?;
        total_seconds = total_seconds * 60 + value;
    }

    let (secs, fraction) = match seconds_part[0].split_once('.') {
        Some((secs, fraction)) => (secs, fraction),
        None => (seconds_part[0], ""),
    };
    let secs: u64 = secs.parse().map_err(|_| format!("invalid seconds '{}'", seconds_part[0]))?;
    if !whole_parts.is_empty() && secs >= 60 {
        return Err(format!("seconds out of range in '{}'", text));
    }
    if fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("invalid fractional seconds '{}'", fraction));
    }
    let nanos = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<9}", fraction);
        padded.parse::<u32>().map_err(|_| format!("invalid fractional seconds '{}'", fraction))?
    };

    Ok(Duration::new(total_seconds * 60 + secs, nanos))
}

/// Serde adapter for optional durations stored in their display form.
pub mod optional_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_str(&super::format_duration(*duration)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: Option<String> = Option::deserialize(deserializer)?;
        text.map(|t| super::parse_duration(&t).map_err(serde::de::Error::custom)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_race_lap_and_stop_times() {
        let race = Duration::from_millis(((60 + 20) * 60 + 48) * 1000 + 233);
        assert_eq!(format_duration(race), "1:20:48.233");
        assert_eq!(format_duration(Duration::from_millis(84_319)), "1:24.319");
        assert_eq!(format_duration(Duration::from_millis(2_456)), "2.456");
        assert_eq!(format_duration(Duration::from_millis(60_005)), "1:00.005");
    }

    #[test]
    fn zero_time_is_not_displayed() {
        assert_eq!(format_optional(Some(Duration::ZERO)), None);
        assert_eq!(format_optional(None), None);
        assert_eq!(format_optional(Some(Duration::from_millis(1))), Some("0.001".to_string()));
    }

    #[test]
    fn parses_display_forms() {
        assert_eq!(parse_duration("1:24.319"), Ok(Duration::from_millis(84_319)));
        assert_eq!(parse_duration("2.4"), Ok(Duration::from_millis(2_400)));
        assert_eq!(parse_duration("1:00:00"), Ok(Duration::from_secs(3_600)));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("1:75.000").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
    }

    proptest! {
        #[test]
        fn display_form_parses_back(millis in 0u64..(30 * 3_600_000)) {
            let duration = Duration::from_millis(millis);
            prop_assert_eq!(parse_duration(&format_duration(duration)), Ok(duration));
        }
    }
}
