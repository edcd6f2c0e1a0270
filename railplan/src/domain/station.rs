//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// Longest station code accepted from the catalog.
const MAX_LEN: usize = 8;

/// A validated station code.
///
/// Station codes are short alphanumeric tokens of one to eight characters
/// (`NDLS`, `BCT`, `SBC`). The catalog is not consistent about letter case,
/// so parsing normalizes to uppercase; two codes that differ only in case are
/// the same station. Any `StationCode` value is valid by construction.
///
/// Ordering is lexicographic on the canonical (uppercase) form, which gives
/// graph traversal a deterministic station order.
///
/// # Examples
///
/// ```
/// use railplan::domain::StationCode;
///
/// let ndls = StationCode::parse("NDLS").unwrap();
/// assert_eq!(ndls.as_str(), "NDLS");
///
/// // Lowercase is normalized, not rejected
/// assert_eq!(StationCode::parse("ndls").unwrap(), ndls);
///
/// // Empty, oversized, and non-alphanumeric codes are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("VERYLONGCODE").is_err());
/// assert!(StationCode::parse("ND-LS").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    // Unused tail bytes are zero, so derived equality and lexicographic
    // ordering on the array match the string forms.
    bytes: [u8; MAX_LEN],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1-8 ASCII alphanumeric characters. Lowercase
    /// letters are uppercased.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let raw = s.as_bytes();

        if raw.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }
        if raw.len() > MAX_LEN {
            return Err(InvalidStationCode {
                reason: "must be at most 8 characters",
            });
        }

        let mut bytes = [0u8; MAX_LEN];
        for (i, &b) in raw.iter().enumerate() {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidStationCode {
                    reason: "must be ASCII letters or digits",
                });
            }
            bytes[i] = b.to_ascii_uppercase();
        }

        Ok(Self {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the canonical (uppercase) code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumeric bytes are stored
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for valid station codes: 1-8 alphanumeric characters.
    fn valid_code_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Za-z0-9]{1,8}").unwrap()
    }

    proptest! {
        /// Any syntactically valid code parses.
        #[test]
        fn valid_always_parses(s in valid_code_string()) {
            prop_assert!(StationCode::parse(&s).is_ok());
        }

        /// Parsing is case-insensitive and canonicalizes to uppercase.
        #[test]
        fn case_insensitive(s in valid_code_string()) {
            let lower = StationCode::parse(&s.to_ascii_lowercase()).unwrap();
            let upper = StationCode::parse(&s.to_ascii_uppercase()).unwrap();
            prop_assert_eq!(lower, upper);
            let expected = s.to_ascii_uppercase();
            prop_assert_eq!(lower.as_str(), expected.as_str());
        }

        /// Oversized codes are always rejected.
        #[test]
        fn oversized_rejected(s in "[A-Z0-9]{9,16}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// Codes with punctuation or whitespace are rejected.
        #[test]
        fn punctuation_rejected(
            s in "[A-Z0-9]{0,3}[-_ .][A-Z0-9]{0,3}"
        ) {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// Ordering agrees with ordering of the canonical strings.
        #[test]
        fn ordering_matches_strings(a in valid_code_string(), b in valid_code_string()) {
            let ca = StationCode::parse(&a).unwrap();
            let cb = StationCode::parse(&b).unwrap();
            prop_assert_eq!(ca.cmp(&cb), ca.as_str().cmp(cb.as_str()));
        }
    }
}
