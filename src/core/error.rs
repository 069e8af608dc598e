use std::fmt;

/// Returned when an accumulator is asked to cover a domain it cannot represent.
///
/// This happens when `min > max`, or when `[min, max]` is too wide for its
/// backing array to be addressed on the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidRangeError {
    pub min: i64,
    pub max: i64,
}

impl fmt::Display for InvalidRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min > self.max {
            write!(
                f,
                "invalid range [{}, {}]: min is greater than max",
                self.min, self.max
            )
        } else {
            write!(
                f,
                "invalid range [{}, {}]: domain is too wide to index",
                self.min, self.max
            )
        }
    }
}

impl std::error::Error for InvalidRangeError {}

/// Returned when a deserialized accumulator does not describe a valid tree.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// The stored domain is itself invalid.
    Range(InvalidRangeError),
    /// The stored array does not have `max - min + 2` slots.
    Length { expected: usize, actual: usize },
    /// Slot 0 is a sentinel and must hold zero.
    Sentinel(i64),
}

#[cfg(feature = "serde")]
impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(err) => write!(f, "{err}"),
            Self::Length { expected, actual } => write!(
                f,
                "tree length mismatch: expected {expected} slots, found {actual}"
            ),
            Self::Sentinel(value) => write!(f, "tree sentinel slot holds {value}, expected 0"),
        }
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Range(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl From<InvalidRangeError> for SnapshotError {
    fn from(err: InvalidRangeError) -> Self {
        Self::Range(err)
    }
}
