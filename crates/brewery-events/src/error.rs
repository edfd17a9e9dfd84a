//! Error types for the `brewery-events` crate.
//!
//! [`EventError`] covers every structural problem the resolver can find in
//! an event definition. Each variant that belongs to a specific event names
//! it, so authors can locate the offending entry.

use brewery_types::{IntervalError, KeyError, NamespacedKey, UnknownVariant};

use crate::location::SupplierError;
use crate::step::ParseDurationError;

/// Structural errors raised while turning a configuration tree into events.
///
/// Any of these aborts the current event entirely; no partial event or
/// partial registry is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The root of the events tree is not a mapping.
    #[error("custom events root must be a mapping of event name to event body")]
    InvalidRoot,

    /// An event name was empty.
    #[error("undefined event name")]
    UndefinedName,

    /// An event name could not be turned into a key.
    #[error("event '{event}' has an invalid name: {source}")]
    InvalidName {
        /// The offending event name.
        event: String,
        /// Why the key was rejected.
        source: KeyError,
    },

    /// A nested reference names an event that is not defined.
    #[error("event '{event}' is not defined")]
    UnknownEvent {
        /// The missing event name.
        event: String,
    },

    /// Event references form a loop.
    #[error(
        "there's an infinite loop in your events, the following events are involved: {}",
        .chain.join(" -> ")
    )]
    Cycle {
        /// Event names in traversal order, ending with the repeated one.
        chain: Vec<String>,
    },

    /// Event references nest deeper than the resolver allows.
    #[error(
        "events nest more than {limit} levels deep: {}",
        .chain.join(" -> ")
    )]
    TooDeep {
        /// Event names from the outermost event down to where the limit hit.
        chain: Vec<String>,
        /// The nesting limit.
        limit: usize,
    },

    /// The event body is not a mapping.
    #[error("event '{event}' must be a mapping")]
    InvalidEventBody {
        /// The offending event.
        event: String,
    },

    /// A numeric field holds something other than an integer.
    #[error("event '{event}': field '{field}' must be an integer")]
    InvalidInteger {
        /// The offending event.
        event: String,
        /// The field that failed to parse.
        field: &'static str,
    },

    /// `steps` is present but is not a list.
    #[error("event '{event}': steps must be a list")]
    InvalidSteps {
        /// The offending event.
        event: String,
    },

    /// A step entry is not a mapping.
    #[error("event '{event}': step {index} must be a mapping")]
    InvalidStepNode {
        /// The offending event.
        event: String,
        /// Zero-based position of the step in the list.
        index: usize,
    },

    /// A step has no `type`.
    #[error("event '{event}': step has to have a type")]
    MissingStepType {
        /// The offending event.
        event: String,
    },

    /// A step `type` is neither builtin nor a known step kind.
    #[error("event '{event}': unknown step type '{step_type}'")]
    UnknownStepType {
        /// The offending event.
        event: String,
        /// The unrecognised type.
        step_type: String,
    },

    /// A mandatory field of a step is absent.
    #[error("event '{event}': {step_type} step requires field '{field}'")]
    MissingField {
        /// The offending event.
        event: String,
        /// Kind of the step being read.
        step_type: &'static str,
        /// The absent field.
        field: &'static str,
    },

    /// A field is present but null, empty, or not a scalar.
    #[error("event '{event}': field '{field}' can not be empty")]
    EmptyField {
        /// The offending event.
        event: String,
        /// The empty field.
        field: &'static str,
    },

    /// A command step names an unknown sender.
    #[error("event '{event}': {source}")]
    UnknownSender {
        /// The offending event.
        event: String,
        /// The rejected sender.
        source: UnknownVariant,
    },

    /// A wait step names an unknown condition.
    #[error("event '{event}': {source}")]
    UnknownCondition {
        /// The offending event.
        event: String,
        /// The rejected condition.
        source: UnknownVariant,
    },

    /// A wait step has neither `duration` nor `condition`.
    #[error("event '{event}': expected duration or condition to be specified")]
    MissingWaitTarget {
        /// The offending event.
        event: String,
    },

    /// A wait duration could not be parsed.
    #[error("event '{event}': {source}")]
    InvalidDuration {
        /// The offending event.
        event: String,
        /// Why the duration was rejected.
        source: ParseDurationError,
    },

    /// An interval field could not be parsed.
    #[error("event '{event}': invalid {field} interval: {source}")]
    InvalidInterval {
        /// The offending event.
        event: String,
        /// The interval field.
        field: &'static str,
        /// Why the interval was rejected.
        source: IntervalError,
    },

    /// A teleport location could not be parsed.
    #[error("event '{event}': invalid location: {source}")]
    InvalidLocation {
        /// The offending event.
        event: String,
        /// Why the location was rejected.
        source: SupplierError,
    },

    /// An event resolved to zero steps.
    #[error("event '{event}' has no steps")]
    NoSteps {
        /// The offending event.
        event: String,
    },

    /// A step field holds a list or mapping where a scalar is expected.
    #[error("event '{event}': field '{field}' must be {expected}, not a list or mapping")]
    WrongFieldType {
        /// The offending event.
        event: String,
        /// The field name.
        field: &'static str,
        /// What the field should hold.
        expected: &'static str,
    },

    /// Two top-level entries normalise to the same key.
    #[error("duplicate event key: {key}")]
    DuplicateEvent {
        /// The colliding key.
        key: NamespacedKey,
    },
}

impl EventError {
    /// Name of the event this error belongs to, when there is one.
    pub fn event_name(&self) -> Option<&str> {
        match self {
            Self::InvalidRoot | Self::UndefinedName | Self::DuplicateEvent { .. } => None,
            Self::Cycle { chain } | Self::TooDeep { chain, .. } => {
                chain.first().map(String::as_str)
            }
            Self::InvalidName { event, .. }
            | Self::UnknownEvent { event }
            | Self::InvalidEventBody { event }
            | Self::InvalidInteger { event, .. }
            | Self::InvalidSteps { event }
            | Self::InvalidStepNode { event, .. }
            | Self::MissingStepType { event }
            | Self::UnknownStepType { event, .. }
            | Self::MissingField { event, .. }
            | Self::EmptyField { event, .. }
            | Self::WrongFieldType { event, .. }
            | Self::UnknownSender { event, .. }
            | Self::UnknownCondition { event, .. }
            | Self::MissingWaitTarget { event }
            | Self::InvalidDuration { event, .. }
            | Self::InvalidInterval { event, .. }
            | Self::InvalidLocation { event, .. }
            | Self::NoSteps { event } => Some(event.as_str()),
        }
    }
}
