//! Custom drunk event definitions for Brewery.
//!
//! Server operators describe events as YAML: each top-level entry names an
//! event with optional alcohol and toxin thresholds, a probability weight,
//! and an ordered list of steps. This crate reads such a tree into an
//! immutable [`EventRegistry`], detecting reference cycles and rejecting
//! malformed definitions, and writes a registry back out in canonical form.
//!
//! # Modules
//!
//! - [`builtin`] -- Builtin drunk events and the [`BuiltinLookup`] seam
//! - [`config`] -- Configuration loading from `brewery-config.yaml`
//! - [`error`] -- [`EventError`], one variant per way a definition can fail
//! - [`event`] -- The resolved [`Event`] value
//! - [`loader`] -- Reading and writing event files
//! - [`location`] -- Teleport destinations, fixed or named
//! - [`node`] -- Read-only navigation over a parsed YAML tree
//! - [`registry`] -- [`EventRegistry`] and the [`deserialize`] entry point
//! - [`resolver`] -- Recursive resolution of one named event
//! - [`serializer`] -- [`serialize`], the inverse of [`deserialize`]
//! - [`shared`] -- Swappable process-wide registry and reloading
//! - [`step`] -- The closed set of step kinds
//! - [`writer`] -- Deterministic YAML and JSON output

pub mod builtin;
pub mod config;
pub mod error;
pub mod event;
pub mod loader;
pub mod location;
pub mod node;
pub mod registry;
pub mod resolver;
pub mod serializer;
pub mod shared;
pub mod step;
pub mod writer;

pub use builtin::{BuiltinEvent, BuiltinLookup, BuiltinRegistry};
pub use config::{BreweryConfig, ConfigError};
pub use error::EventError;
pub use event::Event;
pub use loader::{LoadError, load_events_file, parse_events, save_events_file};
pub use location::{LocationRegistry, LocationSupplier, SupplierError};
pub use registry::{EventRegistry, EventRegistryBuilder, deserialize};
pub use resolver::{EventResolver, MAX_NESTING_DEPTH, ResolveOptions};
pub use serializer::serialize;
pub use shared::{EventLoader, SharedEventRegistry};
pub use step::{
    ApplyEffect, ConditionalWait, Consume, EventStep, FixedWait, ParseDurationError, RunCommand,
    Teleport,
};
pub use writer::{TextFormat, WriteError};
