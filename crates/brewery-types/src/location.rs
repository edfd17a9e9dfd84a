//! World positions targeted by teleport steps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Errors produced while parsing a [`BreweryLocation`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The text did not have exactly four comma-separated parts.
    #[error("expected 'world, x, y, z' but got '{raw}'")]
    WrongShape {
        /// The rejected input.
        raw: String,
    },

    /// The world name was empty.
    #[error("location world can not be empty")]
    EmptyWorld,

    /// The world name contains the `,` separator of the text form.
    #[error("location world '{world}' can not contain ','")]
    InvalidWorld {
        /// The rejected world name.
        world: String,
    },

    /// A coordinate was not a finite number.
    #[error("invalid {axis} coordinate '{value}'")]
    InvalidCoordinate {
        /// Which axis failed.
        axis: &'static str,
        /// The text that failed to parse.
        value: String,
    },
}

/// A position in a named world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BreweryLocation {
    /// Name of the world the position is in.
    pub world: String,
    /// East-west coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// North-south coordinate.
    pub z: f64,
}

impl BreweryLocation {
    /// Build a location, validating the world name and coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] for an empty world, a world containing
    /// `,`, or non-finite coordinates.
    pub fn new(world: &str, x: f64, y: f64, z: f64) -> Result<Self, LocationError> {
        let world = world.trim();
        if world.is_empty() {
            return Err(LocationError::EmptyWorld);
        }
        if world.contains(',') {
            return Err(LocationError::InvalidWorld {
                world: world.to_owned(),
            });
        }
        for (axis, value) in [("x", x), ("y", y), ("z", z)] {
            if !value.is_finite() {
                return Err(LocationError::InvalidCoordinate {
                    axis,
                    value: value.to_string(),
                });
            }
        }
        Ok(Self {
            world: world.to_owned(),
            x,
            y,
            z,
        })
    }

    /// Parse `world, x, y, z`.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError`] if the shape or any coordinate is invalid.
    pub fn parse(raw: &str) -> Result<Self, LocationError> {
        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        let [world, x, y, z] = parts.as_slice() else {
            return Err(LocationError::WrongShape {
                raw: raw.to_owned(),
            });
        };
        Self::new(
            world,
            parse_coordinate("x", x)?,
            parse_coordinate("y", y)?,
            parse_coordinate("z", z)?,
        )
    }
}

fn parse_coordinate(axis: &'static str, value: &str) -> Result<f64, LocationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LocationError::InvalidCoordinate {
            axis,
            value: value.to_owned(),
        })
}

impl fmt::Display for BreweryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}, {}", self.world, self.x, self.y, self.z)
    }
}

impl FromStr for BreweryLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
