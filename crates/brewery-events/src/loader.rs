//! Reading and writing event files.
//!
//! These functions glue the text layer (YAML parsing and the canonical
//! writer) to [`deserialize`] and [`serialize`].

use std::path::Path;

use serde_yml::Value;
use tracing::{debug, info};

use crate::builtin::BuiltinLookup;
use crate::error::EventError;
use crate::registry::{EventRegistry, deserialize};
use crate::resolver::ResolveOptions;
use crate::serializer::serialize;
use crate::writer::{TextFormat, WriteError, write_canonical_file};

/// Errors raised while loading or saving an event file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read events file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid YAML.
    #[error("failed to parse events YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },

    /// The YAML parsed but an event in it is invalid.
    #[error(transparent)]
    Event(#[from] EventError),

    /// The canonical output could not be written.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Parse YAML text and resolve it into a registry.
///
/// # Errors
///
/// Returns [`LoadError::Yaml`] for malformed YAML and
/// [`LoadError::Event`] for invalid event definitions.
pub fn parse_events(
    yaml: &str,
    builtins: &dyn BuiltinLookup,
    options: ResolveOptions,
) -> Result<EventRegistry, LoadError> {
    let root: Value = serde_yml::from_str(yaml)?;
    Ok(deserialize(&root, builtins, options)?)
}

/// Read and resolve the event file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
/// same errors as [`parse_events`].
pub fn load_events_file(
    path: &Path,
    builtins: &dyn BuiltinLookup,
    options: ResolveOptions,
) -> Result<EventRegistry, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = text.len(), "Read events file");
    let registry = parse_events(&text, builtins, options)?;
    info!(path = %path.display(), events = registry.len(), "Loaded events file");
    Ok(registry)
}

/// Write the canonical form of `registry` to `path`.
///
/// # Errors
///
/// Returns [`LoadError::Write`] if rendering or writing fails.
pub fn save_events_file(
    registry: &EventRegistry,
    path: &Path,
    format: TextFormat,
) -> Result<(), LoadError> {
    write_canonical_file(&serialize(registry), format, path)?;
    info!(
        path = %path.display(),
        events = registry.len(),
        format = %format,
        "Saved events file"
    );
    Ok(())
}
