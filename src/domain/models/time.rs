use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, Error)]
#[error("invalid time '{0}': expected HH:MM between 00:00 and 23:59")]
pub struct TimeParseError(pub String);

/// Wall-clock time of day, stored as minutes since midnight.
///
/// All slot and conflict arithmetic happens on this integer representation;
/// "HH:MM" strings exist only at the API and storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn plus_minutes(self, minutes: u16) -> Option<Self> {
        Self::from_minutes(self.0.checked_add(minutes)?)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeParseError(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(err)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(err());
        }
        let hours: u16 = h.parse().map_err(|_| err())?;
        let mins: u16 = m.parse().map_err(|_| err())?;
        if hours > 23 || mins > 59 {
            return Err(err());
        }
        Ok(Self(hours * 60 + mins))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Half-open `[start, end)` window within one day. Transient: generated as a
/// candidate slot or built from a reservation's times, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn duration_min(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// The single authoritative overlap predicate: half-open intervals,
    /// windows sharing only a boundary point do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(t("08:00").minutes(), 480);
        assert_eq!(t("9:05").minutes(), 545);
        assert_eq!(t("23:59").to_string(), "23:59");
        assert_eq!(t("9:05").to_string(), "09:05");

        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
        assert!("12".parse::<TimeOfDay>().is_err());
        assert!("ab:cd".parse::<TimeOfDay>().is_err());
        assert!("12:5".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_numeric_not_lexicographic_ordering() {
        assert!(t("9:00") < t("10:00"));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = TimeWindow::new(t("09:00"), t("10:30"));
        let b = TimeWindow::new(t("10:00"), t("11:00"));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_boundary_touch_does_not_overlap() {
        let a = TimeWindow::new(t("09:00"), t("10:00"));
        let b = TimeWindow::new(t("10:00"), t("11:00"));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = TimeWindow::new(t("08:00"), t("12:00"));
        let inner = TimeWindow::new(t("09:00"), t("10:00"));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
