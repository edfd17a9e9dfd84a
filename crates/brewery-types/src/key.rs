//! Namespaced identifiers used as lookup tokens for events and builtins.
//!
//! A key is written as `namespace:name`. When the namespace is omitted the
//! key belongs to [`DEFAULT_NAMESPACE`], so `puke` and `brewery:puke` name
//! the same entry. Keys are normalised to ASCII lowercase on parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Namespace assumed when a key is written without one.
pub const DEFAULT_NAMESPACE: &str = "brewery";

/// Errors produced while parsing a [`NamespacedKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The input was empty or only whitespace.
    #[error("key can not be empty")]
    Empty,

    /// One side of the `namespace:name` separator was empty.
    #[error("key '{raw}' has an empty namespace or name")]
    EmptyPart {
        /// The rejected input.
        raw: String,
    },

    /// The input contained more than one `:` separator.
    #[error("key '{raw}' contains more than one ':'")]
    TooManySeparators {
        /// The rejected input.
        raw: String,
    },

    /// A character outside the allowed set was found.
    #[error("key '{raw}' contains invalid character '{character}'")]
    InvalidCharacter {
        /// The rejected input.
        raw: String,
        /// The first offending character.
        character: char,
    },
}

/// A `namespace:name` identifier.
///
/// Equality, ordering, and hashing consider both parts. Construct through
/// [`NamespacedKey::parse`] or [`NamespacedKey::new`]; both validate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NamespacedKey {
    namespace: String,
    name: String,
}

impl NamespacedKey {
    /// Build a key from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if either part is empty or holds characters
    /// outside `[a-z0-9_.-]` (the name additionally allows `/`).
    pub fn new(namespace: &str, name: &str) -> Result<Self, KeyError> {
        let raw = format!("{namespace}:{name}");
        Self::from_parts(&raw, namespace, name)
    }

    /// Build a key in the [`DEFAULT_NAMESPACE`].
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if `name` is not a valid key name.
    pub fn brewery(name: &str) -> Result<Self, KeyError> {
        Self::new(DEFAULT_NAMESPACE, name)
    }

    /// Parse `namespace:name`, or a bare `name` in the default namespace.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] for empty input, empty parts, repeated
    /// separators, or disallowed characters.
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Empty);
        }
        let mut parts = trimmed.split(':');
        let first = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (None, _) => Self::from_parts(trimmed, DEFAULT_NAMESPACE, first),
            (Some(name), None) => Self::from_parts(trimmed, first, name),
            (Some(_), Some(_)) => Err(KeyError::TooManySeparators {
                raw: trimmed.to_owned(),
            }),
        }
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this key lives in the [`DEFAULT_NAMESPACE`].
    pub fn is_default_namespace(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE
    }

    /// Render the shortest form that parses back to this key.
    ///
    /// Keys in the default namespace render as their bare name.
    pub fn to_minimal_string(&self) -> String {
        if self.is_default_namespace() {
            self.name.clone()
        } else {
            self.to_string()
        }
    }

    fn from_parts(raw: &str, namespace: &str, name: &str) -> Result<Self, KeyError> {
        let namespace = namespace.trim().to_ascii_lowercase();
        let name = name.trim().to_ascii_lowercase();
        if namespace.is_empty() || name.is_empty() {
            return Err(KeyError::EmptyPart {
                raw: raw.to_owned(),
            });
        }
        if let Some(character) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(KeyError::InvalidCharacter {
                raw: raw.to_owned(),
                character,
            });
        }
        if let Some(character) = name.chars().find(|c| !is_name_char(*c)) {
            return Err(KeyError::InvalidCharacter {
                raw: raw.to_owned(),
                character,
            });
        }
        Ok(Self { namespace, name })
    }
}

const fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

const fn is_name_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for NamespacedKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NamespacedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NamespacedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
