//! Small closed enumerations referenced by event steps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Returned when a string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Who executes a command step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum SenderKind {
    /// The server itself, with full permissions.
    #[default]
    Server,
    /// The player the event is running for.
    Player,
    /// The server console.
    Console,
}

impl SenderKind {
    /// Lowercase name as written in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Player => "player",
            Self::Console => "console",
        }
    }
}

impl FromStr for SenderKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "player" => Ok(Self::Player),
            "console" => Ok(Self::Console),
            _ => Err(UnknownVariant {
                kind: "command sender",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SenderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The predicate a conditional wait blocks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum WaitCondition {
    /// Until the player joins the server again.
    Join,
    /// Until the player takes damage.
    Damage,
    /// Until the player respawns.
    Respawn,
    /// Until the player sneaks.
    Sneak,
}

impl WaitCondition {
    /// Lowercase name as written in configuration.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Damage => "damage",
            Self::Respawn => "respawn",
            Self::Sneak => "sneak",
        }
    }
}

impl FromStr for WaitCondition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "join" => Ok(Self::Join),
            "damage" => Ok(Self::Damage),
            "respawn" => Ok(Self::Respawn),
            "sneak" => Ok(Self::Sneak),
            _ => Err(UnknownVariant {
                kind: "wait condition",
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
