//! Shared value types for Brewery custom event definitions.
//!
//! These are the leaf types every other crate in the workspace builds on.
//! The serializable ones derive `ts-rs` bindings for the web editor.
//!
//! # Modules
//!
//! - [`key`] -- `namespace:name` identifiers used as lookup tokens
//! - [`interval`] -- Inclusive `[min, max]` ranges with a compact text form
//! - [`moment`] -- Tick constants and conversions
//! - [`enums`] -- Command sender kinds and wait conditions
//! - [`location`] -- World positions for teleport steps

pub mod enums;
pub mod interval;
pub mod key;
pub mod location;
pub mod moment;

// Re-export all public types at crate root for convenience.
pub use enums::{SenderKind, UnknownVariant, WaitCondition};
pub use interval::{Interval, IntervalError};
pub use key::{DEFAULT_NAMESPACE, KeyError, NamespacedKey};
pub use location::{BreweryLocation, LocationError};
pub use moment::{TICKS_PER_MINUTE, TICKS_PER_SECOND};
