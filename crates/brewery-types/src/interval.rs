//! Inclusive integer ranges used for randomized magnitudes and durations.
//!
//! The compact text form is `min;max`, or a single `n` for `[n, n]`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use ts_rs::TS;

/// Errors produced while building or parsing an [`Interval`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// The lower bound exceeds the upper bound.
    #[error("interval minimum {min} is greater than maximum {max}")]
    Inverted {
        /// Requested lower bound.
        min: i64,
        /// Requested upper bound.
        max: i64,
    },

    /// A bound could not be read as an integer.
    #[error("invalid interval bound '{value}'")]
    InvalidBound {
        /// The text that failed to parse.
        value: String,
    },

    /// The text had more than two `;`-separated parts.
    #[error("interval '{raw}' has too many parts")]
    TooManyParts {
        /// The rejected input.
        raw: String,
    },
}

/// An inclusive `[min, max]` range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Interval {
    min: i64,
    max: i64,
}

impl Interval {
    /// Build an interval, rejecting `min > max`.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::Inverted`] if the bounds are out of order.
    pub const fn new(min: i64, max: i64) -> Result<Self, IntervalError> {
        if min > max {
            return Err(IntervalError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// An interval holding exactly one value.
    pub const fn single(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Parse the compact text form (`min;max` or `n`).
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError`] for non-integer bounds, extra parts, or
    /// inverted bounds.
    pub fn parse(raw: &str) -> Result<Self, IntervalError> {
        let mut parts = raw.split(';');
        let min = parse_bound(parts.next().unwrap_or_default())?;
        let max = match parts.next() {
            Some(part) => parse_bound(part)?,
            None => min,
        };
        if parts.next().is_some() {
            return Err(IntervalError::TooManyParts {
                raw: raw.to_owned(),
            });
        }
        Self::new(min, max)
    }

    /// Lower bound.
    pub const fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    pub const fn max(&self) -> i64 {
        self.max
    }

    /// Whether `value` falls within the bounds.
    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whether both bounds are equal.
    pub const fn is_single(&self) -> bool {
        self.min == self.max
    }
}

fn parse_bound(part: &str) -> Result<i64, IntervalError> {
    let trimmed = part.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .ok_or_else(|| IntervalError::InvalidBound {
            value: trimmed.to_owned(),
        })
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{};{}", self.min, self.max)
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_and_single() {
        let range = Interval::parse("1;3").unwrap();
        assert_eq!((range.min(), range.max()), (1, 3));
        let single = Interval::parse(" 5 ").unwrap();
        assert_eq!(single, Interval::single(5));
        assert_eq!(Interval::parse("-2; 4").unwrap().min(), -2);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Interval::single(200).to_string(), "200");
        assert_eq!(Interval::new(1, 3).unwrap().to_string(), "1;3");
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            Interval::parse("5;1"),
            Err(IntervalError::Inverted { min: 5, max: 1 })
        );
        assert!(Interval::new(2, 1).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            Interval::parse("one;two"),
            Err(IntervalError::InvalidBound { .. })
        ));
        assert!(matches!(
            Interval::parse(""),
            Err(IntervalError::InvalidBound { .. })
        ));
        assert!(matches!(
            Interval::parse("1;2;3"),
            Err(IntervalError::TooManyParts { .. })
        ));
    }

    #[test]
    fn contains_is_inclusive() {
        let interval = Interval::new(10, 20).unwrap();
        assert!(interval.contains(10));
        assert!(interval.contains(20));
        assert!(!interval.contains(21));
    }
}
