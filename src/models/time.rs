use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Slot granularity in minutes.
///
/// Applied uniformly to window expansion, booking-interval expansion and
/// feasibility stepping.
pub const SLOT_MINUTES: u16 = 30;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Time of day as a minute offset from midnight (0..1440).
///
/// Serialized as `"HH:MM"` on the wire; all slot arithmetic happens on the
/// integer offset, never on formatted strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Create from a raw minute offset. `None` if the offset falls outside the day.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Create from hour and minute components.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    /// Minute offset from midnight.
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Hour component (0..24).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Minute component (0..60).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Error returned when an `"HH:MM"` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day: {0:?}")]
pub struct ParseTimeError(pub String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ParseTimeError(s.to_string()))?;
        let hour: u16 = h.parse().map_err(|_| ParseTimeError(s.to_string()))?;
        let minute: u16 = m.parse().map_err(|_| ParseTimeError(s.to_string()))?;
        Self::from_hm(hour, minute).ok_or_else(|| ParseTimeError(s.to_string()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hm() {
        let t = TimeOfDay::from_hm(9, 30).unwrap();
        assert_eq!(t.minutes(), 570);
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn test_from_hm_rejects_out_of_range() {
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(9, 60).is_none());
    }

    #[test]
    fn test_from_minutes_bounds() {
        assert!(TimeOfDay::from_minutes(0).is_some());
        assert!(TimeOfDay::from_minutes(1439).is_some());
        assert!(TimeOfDay::from_minutes(1440).is_none());
    }

    #[test]
    fn test_display_pads_components() {
        let t = TimeOfDay::from_hm(8, 5).unwrap();
        assert_eq!(t.to_string(), "08:05");
    }

    #[test]
    fn test_parse_roundtrip() {
        let t: TimeOfDay = "14:00".parse().unwrap();
        assert_eq!(t, TimeOfDay::from_hm(14, 0).unwrap());
        assert_eq!(t.to_string(), "14:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<TimeOfDay>().is_err());
        assert!("9".parse::<TimeOfDay>().is_err());
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("10:xx".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_ordering_follows_clock() {
        let a: TimeOfDay = "09:00".parse().unwrap();
        let b: TimeOfDay = "09:30".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_serde_as_string() {
        let t = TimeOfDay::from_hm(10, 30).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"10:30\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
