//! Train identity types.

use std::fmt;

/// Error returned when parsing an invalid train number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid train number: {reason}")]
pub struct InvalidTrainNumber {
    reason: &'static str,
}

/// Longest train number accepted from the catalog.
const MAX_LEN: usize = 8;

/// A validated train number.
///
/// Train numbers are short tokens, typically five digits (`12951`) but
/// occasionally letter-suffixed for specials. Leading zeros are significant,
/// so the number is kept as text rather than an integer. Parsing uppercases
/// any letters; any `TrainNumber` value is valid by construction.
///
/// # Examples
///
/// ```
/// use railplan::domain::TrainNumber;
///
/// let rajdhani = TrainNumber::parse("12951").unwrap();
/// assert_eq!(rajdhani.as_str(), "12951");
///
/// // Leading zeros survive
/// assert_eq!(TrainNumber::parse("04620").unwrap().as_str(), "04620");
///
/// assert!(TrainNumber::parse("").is_err());
/// assert!(TrainNumber::parse("12 951").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrainNumber {
    bytes: [u8; MAX_LEN],
    len: u8,
}

impl TrainNumber {
    /// Parse a train number from a string.
    ///
    /// The input must be 1-8 ASCII alphanumeric characters; letters are
    /// uppercased.
    pub fn parse(s: &str) -> Result<Self, InvalidTrainNumber> {
        let raw = s.as_bytes();

        if raw.is_empty() {
            return Err(InvalidTrainNumber {
                reason: "must not be empty",
            });
        }
        if raw.len() > MAX_LEN {
            return Err(InvalidTrainNumber {
                reason: "must be at most 8 characters",
            });
        }

        let mut bytes = [0u8; MAX_LEN];
        for (i, &b) in raw.iter().enumerate() {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidTrainNumber {
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

    /// Returns the train number as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumeric bytes are stored
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap()
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.as_str())
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A train's number and display name, as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainIdentity {
    /// Unique number within one catalog snapshot.
    pub number: TrainNumber,
    /// Human-readable name, e.g. "MUMBAI RAJDHANI".
    pub name: String,
}

impl TrainIdentity {
    /// Create a train identity.
    pub fn new(number: TrainNumber, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }
}

impl fmt::Display for TrainIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.name)
    }
}
