//! Lazily evaluated teleport destinations.
//!
//! A teleport step does not hold a position; it holds a supplier that the
//! interpreter evaluates when the step runs. Named suppliers are reference
//! cells filled in at runtime by whatever owns the [`LocationRegistry`]
//! (player homes, the world spawn, and so on).

use std::fmt;

use brewery_types::{BreweryLocation, KeyError, LocationError, NamespacedKey};

use crate::node::Node;

/// Source of runtime locations for named suppliers.
pub trait LocationRegistry {
    /// Current value of the named location, if any.
    fn location(&self, key: &NamespacedKey) -> Option<BreweryLocation>;
}

/// Errors produced while reading a location supplier from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupplierError {
    /// The node is not a string or a `{world, x, y, z}` mapping.
    #[error("location must be text or a mapping with world, x, y and z")]
    WrongType,

    /// A fixed location was malformed.
    #[error(transparent)]
    Location(#[from] LocationError),

    /// A named location was not a valid key.
    #[error("invalid location reference: {0}")]
    Reference(#[from] KeyError),
}

/// Where a teleport goes, evaluated at execution time.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSupplier {
    /// A position fixed at load time.
    Fixed(BreweryLocation),
    /// A position looked up by key when the step runs.
    Named(NamespacedKey),
}

impl LocationSupplier {
    /// Read a supplier from a configuration node.
    ///
    /// Text containing a comma is a fixed `world, x, y, z` position; other
    /// text is a named reference. A mapping must carry `world`, `x`, `y`,
    /// and `z`.
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError`] if the node has the wrong shape or holds
    /// an invalid position or key.
    pub fn from_node(node: Node<'_>) -> Result<Self, SupplierError> {
        if let Some(text) = node.as_string() {
            return Self::parse(&text);
        }
        if !node.is_map() {
            return Err(SupplierError::WrongType);
        }
        let world = node
            .get("world")
            .and_then(|n| n.as_string())
            .ok_or(SupplierError::WrongType)?;
        let coordinate = |axis: &'static str| -> Result<f64, SupplierError> {
            let value = node
                .get(axis)
                .and_then(|n| n.as_string())
                .ok_or(SupplierError::WrongType)?;
            let parsed = value.trim().parse::<f64>().ok();
            parsed.ok_or_else(|| {
                SupplierError::Location(LocationError::InvalidCoordinate { axis, value })
            })
        };
        let location = BreweryLocation::new(
            &world,
            coordinate("x")?,
            coordinate("y")?,
            coordinate("z")?,
        )?;
        Ok(Self::Fixed(location))
    }

    /// Parse the text form.
    ///
    /// # Errors
    ///
    /// Returns [`SupplierError`] for a malformed position or key.
    pub fn parse(raw: &str) -> Result<Self, SupplierError> {
        if raw.contains(',') {
            Ok(Self::Fixed(BreweryLocation::parse(raw)?))
        } else {
            Ok(Self::Named(NamespacedKey::parse(raw)?))
        }
    }

    /// Evaluate the supplier against the runtime registry.
    pub fn get(&self, registry: &dyn LocationRegistry) -> Option<BreweryLocation> {
        match self {
            Self::Fixed(location) => Some(location.clone()),
            Self::Named(key) => registry.location(key),
        }
    }
}

impl fmt::Display for LocationSupplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(location) => write!(f, "{location}"),
            Self::Named(key) => f.write_str(&key.to_minimal_string()),
        }
    }
}
