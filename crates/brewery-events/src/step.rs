//! The closed set of step kinds an event is made of.
//!
//! [`EventStep`] is a sum type; both the resolver and the serializer match
//! on it exhaustively, so adding a variant forces both directions to be
//! updated before the crate compiles.

use std::sync::Arc;

use brewery_types::{
    Interval, NamespacedKey, SenderKind, TICKS_PER_SECOND, UnknownVariant, WaitCondition, moment,
};

use crate::event::Event;
use crate::location::LocationSupplier;

/// Default potion amplifier range.
pub const DEFAULT_AMPLIFIER: Interval = Interval::single(1);

/// Default potion duration range: ten seconds, in ticks.
pub const DEFAULT_EFFECT_DURATION: Interval = Interval::single(10 * TICKS_PER_SECOND);

/// One unit of scripted behaviour inside an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventStep {
    /// A pre-registered builtin drunk event, by key.
    Builtin(NamespacedKey),
    /// Another custom event, fully resolved. Every step referencing the
    /// same event shares one value.
    Event(Arc<Event>),
    /// Run a command.
    Command(RunCommand),
    /// Pause for a fixed number of ticks.
    Wait(FixedWait),
    /// Pause until a condition is met.
    ConditionalWait(ConditionalWait),
    /// Apply a potion effect.
    ApplyEffect(ApplyEffect),
    /// Change the player's alcohol and toxin levels.
    Consume(Consume),
    /// Move the player to a location evaluated at execution time.
    Teleport(Teleport),
}

impl EventStep {
    /// The `type` string this step is written with.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Builtin(key) => key.name(),
            Self::Event(_) => "event",
            Self::Command(_) => "command",
            Self::Wait(_) | Self::ConditionalWait(_) => "wait",
            Self::ApplyEffect(_) => "potion",
            Self::Consume(_) => "consume",
            Self::Teleport(_) => "teleport",
        }
    }
}

/// A command run on behalf of a sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    /// The command line, without a leading slash requirement.
    pub command: String,
    /// Who runs the command.
    pub sender: SenderKind,
}

/// Errors produced while parsing a wait duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    /// The duration text was empty.
    #[error("duration can not be empty")]
    Empty,

    /// The duration was not `<integer>` followed by `t`, `s`, or `m`.
    #[error("invalid duration '{value}', expected e.g. '20t'")]
    Invalid {
        /// The rejected input.
        value: String,
    },

    /// The duration does not fit in a tick count.
    #[error("duration '{value}' is too large")]
    Overflow {
        /// The rejected input.
        value: String,
    },
}

/// A fixed pause, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWait {
    /// Number of ticks to wait.
    pub duration_ticks: u64,
}

impl FixedWait {
    /// Parse a duration such as `20t`, `5s`, `1m`, or a bare tick count.
    ///
    /// # Errors
    ///
    /// Returns [`ParseDurationError`] for empty, negative, malformed, or
    /// overflowing input.
    pub fn parse(raw: &str) -> Result<Self, ParseDurationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseDurationError::Empty);
        }
        let lower = trimmed.to_ascii_lowercase();
        let (digits, unit) = match lower.char_indices().last() {
            Some((index, unit @ ('t' | 's' | 'm'))) => (lower.get(..index).unwrap_or_default(), unit),
            _ => (lower.as_str(), 't'),
        };
        let invalid = || ParseDurationError::Invalid {
            value: trimmed.to_owned(),
        };
        let amount: i64 = digits.trim().parse().ok().ok_or_else(invalid)?;
        if amount < 0 {
            return Err(invalid());
        }
        let ticks = match unit {
            's' => moment::seconds(amount),
            'm' => moment::minutes(amount),
            _ => Some(amount),
        };
        let ticks = ticks
            .and_then(|t| u64::try_from(t).ok())
            .ok_or_else(|| ParseDurationError::Overflow {
                value: trimmed.to_owned(),
            })?;
        Ok(Self {
            duration_ticks: ticks,
        })
    }

    /// Canonical text form, `<ticks>t`.
    pub fn to_duration_string(&self) -> String {
        format!("{}t", self.duration_ticks)
    }
}

/// A pause that lasts until a condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalWait {
    /// The condition to wait for.
    pub condition: WaitCondition,
}

impl ConditionalWait {
    /// Parse a condition name such as `join`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] if the name is not a known condition.
    pub fn parse(raw: &str) -> Result<Self, UnknownVariant> {
        raw.parse().map(|condition| Self { condition })
    }
}

/// A potion effect with randomised strength and length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyEffect {
    /// Effect name, as understood by the server.
    pub effect: String,
    /// Amplifier range.
    pub amplifier: Interval,
    /// Duration range in ticks.
    pub duration: Interval,
}

/// A change to the player's accumulated alcohol and toxins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Consume {
    /// Alcohol to add (negative to remove).
    pub alcohol: i64,
    /// Toxins to add (negative to remove).
    pub toxins: i64,
}

/// A teleport to a lazily evaluated location.
#[derive(Debug, Clone, PartialEq)]
pub struct Teleport {
    /// Where to go; evaluated by the interpreter, not at load time.
    pub location: LocationSupplier,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_tick_durations() {
        assert_eq!(FixedWait::parse("20t").unwrap().duration_ticks, 20);
        assert_eq!(FixedWait::parse(" 0t ").unwrap().duration_ticks, 0);
        assert_eq!(FixedWait::parse("40").unwrap().duration_ticks, 40);
    }

    #[test]
    fn parses_second_and_minute_durations() {
        assert_eq!(FixedWait::parse("5s").unwrap().duration_ticks, 100);
        assert_eq!(FixedWait::parse("1M").unwrap().duration_ticks, 1200);
    }

    #[test]
    fn rejects_bad_durations() {
        assert_eq!(FixedWait::parse(""), Err(ParseDurationError::Empty));
        assert!(matches!(
            FixedWait::parse("soon"),
            Err(ParseDurationError::Invalid { .. })
        ));
        assert!(matches!(
            FixedWait::parse("-5t"),
            Err(ParseDurationError::Invalid { .. })
        ));
        assert!(matches!(
            FixedWait::parse("9223372036854775807m"),
            Err(ParseDurationError::Overflow { .. })
        ));
    }

    #[test]
    fn duration_string_uses_ticks() {
        let wait = FixedWait::parse("2s").unwrap();
        assert_eq!(wait.to_duration_string(), "40t");
    }

    #[test]
    fn conditional_wait_parse() {
        assert_eq!(
            ConditionalWait::parse("JOIN").unwrap().condition,
            WaitCondition::Join
        );
        assert!(ConditionalWait::parse("never").is_err());
    }

    #[test]
    fn default_effect_duration_is_ten_seconds() {
        assert_eq!(DEFAULT_EFFECT_DURATION, Interval::single(200));
        assert_eq!(DEFAULT_AMPLIFIER, Interval::single(1));
    }

    #[test]
    fn type_names() {
        let builtin = EventStep::Builtin(NamespacedKey::parse("puke").unwrap());
        assert_eq!(builtin.type_name(), "puke");
        let wait = EventStep::Wait(FixedWait { duration_ticks: 1 });
        assert_eq!(wait.type_name(), "wait");
    }
}
