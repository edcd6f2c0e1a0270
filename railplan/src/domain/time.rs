//! Scheduled-time handling for the train catalog.
//!
//! The catalog provides scheduled times as `HHMM` integers, occasionally
//! malformed: missing leading zeros (`495`), minutes of 60 or more, or hour
//! overflow past midnight. This module owns all normalization of raw times;
//! no other module is permitted to interpret them.

use std::fmt;

/// Minutes in one nominal day, used for day-offset arithmetic.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when a raw or textual scheduled time cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scheduled time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A canonical scheduled time of day.
///
/// Canonical means the hour is 0–23 and the minute is 0–59; any value of this
/// type is valid by construction. The canonical text form is the 4-character
/// `HHMM` string produced by [`Display`](fmt::Display).
///
/// # Examples
///
/// ```
/// use railplan::domain::SchedTime;
///
/// let t = SchedTime::parse("0930").unwrap();
/// assert_eq!(t.hour(), 9);
/// assert_eq!(t.minute(), 30);
/// assert_eq!(t.to_string(), "0930");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchedTime {
    hour: u8,
    minute: u8,
}

/// The outcome of normalizing a raw catalog time.
///
/// Normalization may carry an overflowing minute into the hour, and an
/// overflowing hour wraps past midnight. The wrap cannot be represented in a
/// time of day alone, so it is reported here and the caller must add one to
/// the relevant day offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedTime {
    /// The canonical time of day.
    pub time: SchedTime,
    /// True when hour overflow wrapped past midnight.
    pub wrapped_midnight: bool,
}

impl SchedTime {
    /// Create a time from hour and minute components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self { hour, minute })
    }

    /// Normalize a raw `HHMM` catalog integer.
    ///
    /// The raw value is read as if left-zero-padded to four digits: the first
    /// two digits are hours, the last two are minutes. A minute value of 60
    /// or more carries into the hour; an hour of 24 or more wraps modulo 24
    /// and is reported via [`NormalizedTime::wrapped_midnight`].
    ///
    /// # Examples
    ///
    /// ```
    /// use railplan::domain::SchedTime;
    ///
    /// // 495 reads as "0495": 95 minutes carries into the hour.
    /// let n = SchedTime::from_raw(495).unwrap();
    /// assert_eq!(n.time.to_string(), "0535");
    /// assert!(!n.wrapped_midnight);
    ///
    /// // 2460 carries to hour 25, which wraps past midnight.
    /// let n = SchedTime::from_raw(2460).unwrap();
    /// assert_eq!(n.time.to_string(), "0100");
    /// assert!(n.wrapped_midnight);
    ///
    /// // Negative and five-digit values are malformed.
    /// assert!(SchedTime::from_raw(-1).is_err());
    /// assert!(SchedTime::from_raw(10000).is_err());
    /// ```
    pub fn from_raw(raw: i64) -> Result<NormalizedTime, TimeError> {
        if raw < 0 {
            return Err(TimeError::new("raw time must not be negative"));
        }
        if raw > 9999 {
            return Err(TimeError::new("raw time must have at most four digits"));
        }

        // Splitting the zero-padded digit string "HHMM" into halves is the
        // same as dividing by 100.
        let mut hour = raw / 100;
        let mut minute = raw % 100;

        if minute >= 60 {
            minute -= 60;
            hour += 1;
        }

        let wrapped_midnight = hour >= 24;
        if wrapped_midnight {
            hour %= 24;
        }

        Ok(NormalizedTime {
            time: Self {
                hour: hour as u8,
                minute: minute as u8,
            },
            wrapped_midnight,
        })
    }

    /// Parse a canonical `HHMM` string.
    ///
    /// The input must be exactly four ASCII digits with hour 00-23 and
    /// minute 00-59. Raw catalog integers go through [`SchedTime::from_raw`]
    /// instead; this parser is strict so that canonical strings stay
    /// canonical.
    ///
    /// # Examples
    ///
    /// ```
    /// use railplan::domain::SchedTime;
    ///
    /// assert!(SchedTime::parse("0000").is_ok());
    /// assert!(SchedTime::parse("2359").is_ok());
    ///
    /// assert!(SchedTime::parse("930").is_err());
    /// assert!(SchedTime::parse("09:30").is_err());
    /// assert!(SchedTime::parse("2460").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 {
            return Err(TimeError::new("expected HHMM format"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[2..4])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::new(hour as u8, minute as u8)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes from midnight (0-1439).
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Debug for SchedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchedTime({:02}{:02})", self.hour, self.minute)
    }
}

impl fmt::Display for SchedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour, self.minute)
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Minutes spanned from a departure to an arrival, honoring day offsets.
///
/// Day offsets are the 1-based `day` values the catalog attaches to each
/// stop. The span is `(to_day - from_day) * 1440` plus the intra-day minute
/// difference, and is negative when the endpoints are not in chronological
/// order.
///
/// # Examples
///
/// ```
/// use railplan::domain::{SchedTime, span_minutes};
///
/// let dep = SchedTime::parse("2300").unwrap();
/// let arr = SchedTime::parse("0100").unwrap();
/// assert_eq!(span_minutes(dep, 1, arr, 2), 120);
/// ```
pub fn span_minutes(departure: SchedTime, from_day: u8, arrival: SchedTime, to_day: u8) -> i64 {
    let days = i64::from(to_day) - i64::from(from_day);
    let intra = i64::from(arrival.minutes_from_midnight())
        - i64::from(departure.minutes_from_midnight());
    days * MINUTES_PER_DAY + intra
}

/// The unsigned same-day gap between two times, as a duration string.
///
/// Both times are read on the same nominal day; day offsets are the caller's
/// business ([`span_minutes`] handles them).
pub fn duration_between(arrival: SchedTime, departure: SchedTime) -> String {
    let gap = arrival
        .minutes_from_midnight()
        .abs_diff(departure.minutes_from_midnight());
    format_duration(i64::from(gap))
}

/// Render a duration in minutes as `"{h}h {m}m"`.
///
/// Every duration string in the crate comes from this function. Negative
/// inputs are clamped to zero; callers reject non-chronological data before
/// formatting.
pub fn format_duration(total_minutes: i64) -> String {
    let total = total_minutes.max(0);
    format!("{}h {}m", total / 60, total % 60)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u8..24, minute in 0u8..60) -> SchedTime {
            SchedTime::new(hour, minute).unwrap()
        }
    }

    proptest! {
        /// Every four-digit raw value normalizes to a canonical time.
        #[test]
        fn raw_always_normalizes(raw in 0i64..=9999) {
            let n = SchedTime::from_raw(raw).unwrap();
            prop_assert!(n.time.hour() < 24);
            prop_assert!(n.time.minute() < 60);
        }

        /// Normalization is idempotent: a canonical result is a fixed point.
        #[test]
        fn normalization_idempotent(raw in 0i64..=9999) {
            let once = SchedTime::from_raw(raw).unwrap();
            let as_raw = i64::from(once.time.hour()) * 100 + i64::from(once.time.minute());
            let twice = SchedTime::from_raw(as_raw).unwrap();
            prop_assert_eq!(once.time, twice.time);
            prop_assert!(!twice.wrapped_midnight);
        }

        /// Parse and display round-trip through the canonical string form.
        #[test]
        fn parse_display_roundtrip(time in valid_time()) {
            let s = time.to_string();
            prop_assert_eq!(SchedTime::parse(&s).unwrap(), time);
        }

        /// Out-of-range raw values never normalize.
        #[test]
        fn out_of_range_raw_rejected(raw in prop_oneof![i64::MIN..0, 10000..i64::MAX]) {
            prop_assert!(SchedTime::from_raw(raw).is_err());
        }

        /// Minutes from midnight stay in range and agree with ordering.
        #[test]
        fn minutes_consistent_with_ordering(a in valid_time(), b in valid_time()) {
            prop_assert!(a.minutes_from_midnight() < 1440);
            prop_assert_eq!(
                a.cmp(&b),
                a.minutes_from_midnight().cmp(&b.minutes_from_midnight())
            );
        }

        /// Same-day spans equal the minute difference; each day adds 1440.
        #[test]
        fn span_day_arithmetic(dep in valid_time(), arr in valid_time(), days in 0u8..4) {
            let base = span_minutes(dep, 1, arr, 1);
            let expected = i64::from(arr.minutes_from_midnight())
                - i64::from(dep.minutes_from_midnight());
            prop_assert_eq!(base, expected);
            prop_assert_eq!(span_minutes(dep, 1, arr, 1 + days), base + i64::from(days) * 1440);
        }
    }
}
