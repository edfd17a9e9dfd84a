//! Deterministic text output for canonical trees.
//!
//! Both formats indent by two spaces and end with exactly one newline, so
//! re-saving an unchanged registry produces an identical file.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yml::Value;

/// Errors produced while rendering or writing canonical text.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// YAML rendering failed.
    #[error("failed to render YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        #[from]
        source: serde_yml::Error,
    },

    /// JSON rendering failed.
    #[error("failed to render JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing to the destination failed.
    #[error("failed to write output: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Output text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// YAML, the format event files are authored in.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for TextFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Render a tree as canonical text.
///
/// # Errors
///
/// Returns [`WriteError`] if the tree cannot be rendered.
pub fn to_canonical_text(tree: &Value, format: TextFormat) -> Result<String, WriteError> {
    let rendered = match format {
        TextFormat::Yaml => serde_yml::to_string(tree)?,
        TextFormat::Json => serde_json::to_string_pretty(tree)?,
    };
    let mut text = rendered.trim_end_matches('\n').to_owned();
    text.push('\n');
    Ok(text)
}

/// Render a tree and write it to `writer`.
///
/// # Errors
///
/// Returns [`WriteError`] if rendering or writing fails.
pub fn write_canonical<W: Write>(
    tree: &Value,
    format: TextFormat,
    writer: &mut W,
) -> Result<(), WriteError> {
    let text = to_canonical_text(tree, format)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Render a tree and replace the file at `path` with it.
///
/// # Errors
///
/// Returns [`WriteError`] if rendering or writing fails.
pub fn write_canonical_file(tree: &Value, format: TextFormat, path: &Path) -> Result<(), WriteError> {
    let text = to_canonical_text(tree, format)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Value {
        serde_yml::from_str("sad:\n  alcohol: 5\n  steps:\n  - type: puke\n").unwrap()
    }

    #[test]
    fn yaml_output_ends_with_one_newline() {
        let text = to_canonical_text(&sample(), TextFormat::Yaml).unwrap();
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
        assert!(text.starts_with("sad:\n  alcohol: 5\n"));
    }

    #[test]
    fn json_output_uses_two_space_indent() {
        let text = to_canonical_text(&sample(), TextFormat::Json).unwrap();
        assert!(text.starts_with("{\n  \"sad\": {\n    \"alcohol\": 5,"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn output_is_deterministic() {
        let first = to_canonical_text(&sample(), TextFormat::Yaml).unwrap();
        let second = to_canonical_text(&sample(), TextFormat::Yaml).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn writes_to_any_writer() {
        let mut buffer = Vec::new();
        write_canonical(&sample(), TextFormat::Yaml, &mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(written, to_canonical_text(&sample(), TextFormat::Yaml).unwrap());
    }

    #[test]
    fn writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        write_canonical_file(&sample(), TextFormat::Json, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"steps\""));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("YML".parse::<TextFormat>(), Ok(TextFormat::Yaml));
        assert_eq!("json".parse::<TextFormat>(), Ok(TextFormat::Json));
        assert!("toml".parse::<TextFormat>().is_err());
        assert_eq!(TextFormat::default().to_string(), "yaml");
    }
}
