//! Builtin drunk events that custom events can reference by key.
//!
//! The resolver only needs to know whether a key is registered, which is
//! what [`BuiltinLookup`] exposes. [`BuiltinRegistry`] is the concrete
//! table the plugin ships with.

use std::collections::BTreeMap;

use brewery_types::NamespacedKey;
use tracing::debug;

/// Read-only view of the builtin step registry.
pub trait BuiltinLookup {
    /// Whether `key` names a registered builtin step.
    fn contains(&self, key: &NamespacedKey) -> bool;
}

/// A pre-registered drunk event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinEvent {
    /// Registry key.
    pub key: NamespacedKey,
    /// Minimum alcohol level for the event to be eligible on its own.
    pub alcohol_requirement: i64,
    /// Minimum toxin level for the event to be eligible on its own.
    pub toxin_requirement: i64,
    /// Relative selection weight.
    pub probability_weight: i64,
}

/// `(name, alcohol, toxins, weight)` for every event shipped by default.
const DEFAULT_BUILTINS: &[(&str, i64, i64, i64)] = &[
    ("puke", 60, 0, 10),
    ("pass_out", 90, 0, 5),
    ("stumble", 25, 0, 20),
    ("chicken", 40, 0, 2),
    ("kaboom", 0, 60, 1),
    ("hallucination", 30, 30, 5),
    ("fever", 0, 40, 8),
    ("nausea", 20, 10, 15),
    ("drunken_walk", 35, 0, 15),
    ("drunk_message", 30, 0, 10),
];

/// Table of builtin drunk events keyed by [`NamespacedKey`].
#[derive(Debug, Clone, Default)]
pub struct BuiltinRegistry {
    events: BTreeMap<NamespacedKey, BuiltinEvent>,
}

impl BuiltinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the default drunk events.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(name, alcohol, toxins, weight) in DEFAULT_BUILTINS {
            let Ok(key) = NamespacedKey::brewery(name) else {
                continue;
            };
            registry.register(BuiltinEvent {
                key,
                alcohol_requirement: alcohol,
                toxin_requirement: toxins,
                probability_weight: weight,
            });
        }
        debug!(count = registry.len(), "Default builtin events registered");
        registry
    }

    /// Register an event, returning the one it replaced.
    pub fn register(&mut self, event: BuiltinEvent) -> Option<BuiltinEvent> {
        self.events.insert(event.key.clone(), event)
    }

    /// Look up a builtin event.
    pub fn get(&self, key: &NamespacedKey) -> Option<&BuiltinEvent> {
        self.events.get(key)
    }

    /// All registered events, ordered by key.
    pub fn events(&self) -> impl Iterator<Item = &BuiltinEvent> {
        self.events.values()
    }

    /// Number of registered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl BuiltinLookup for BuiltinRegistry {
    fn contains(&self, key: &NamespacedKey) -> bool {
        self.events.contains_key(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_registered() {
        let registry = BuiltinRegistry::with_defaults();
        assert_eq!(registry.len(), DEFAULT_BUILTINS.len());
        assert!(registry.contains(&NamespacedKey::parse("puke").unwrap()));
        assert!(registry.contains(&NamespacedKey::parse("brewery:pass_out").unwrap()));
        assert!(!registry.contains(&NamespacedKey::parse("other:puke").unwrap()));
    }

    #[test]
    fn step_type_names_are_not_builtins() {
        let registry = BuiltinRegistry::with_defaults();
        for name in ["event", "command", "wait", "potion", "consume", "teleport"] {
            assert!(!registry.contains(&NamespacedKey::brewery(name).unwrap()));
        }
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = BuiltinRegistry::new();
        let key = NamespacedKey::parse("myplugin:hiccup").unwrap();
        let event = BuiltinEvent {
            key: key.clone(),
            alcohol_requirement: 10,
            toxin_requirement: 0,
            probability_weight: 1,
        };
        assert!(registry.register(event.clone()).is_none());
        let replaced = registry.register(BuiltinEvent {
            probability_weight: 3,
            ..event
        });
        assert_eq!(replaced.map(|e| e.probability_weight), Some(1));
        assert_eq!(registry.get(&key).map(|e| e.probability_weight), Some(3));
    }
}
