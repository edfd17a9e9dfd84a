//! The immutable collection of resolved custom events.
//!
//! [`deserialize`] runs the resolver over every top-level entry of an
//! events tree and freezes the result into an [`EventRegistry`]. The load
//! is all-or-nothing: one malformed event fails the whole registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use brewery_types::NamespacedKey;
use serde_yml::Value;
use tracing::info;

use crate::builtin::BuiltinLookup;
use crate::error::EventError;
use crate::event::Event;
use crate::node::Node;
use crate::resolver::{EventResolver, ResolveOptions};

/// Read-only mapping from event key to resolved [`Event`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRegistry {
    events: BTreeMap<NamespacedKey, Arc<Event>>,
}

impl EventRegistry {
    /// Look up an event by key.
    pub fn get(&self, key: &NamespacedKey) -> Option<&Event> {
        self.events.get(key).map(Arc::as_ref)
    }

    /// Look up an event by its written name (`sad`, `brewery:sad`, ...).
    pub fn get_by_name(&self, name: &str) -> Option<&Event> {
        let key = NamespacedKey::parse(name).ok()?;
        self.get(&key)
    }

    /// All events, ordered by key.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values().map(Arc::as_ref)
    }

    /// All keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &NamespacedKey> {
        self.events.keys()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the registry holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Mutable staging area for a single load pass.
///
/// Only [`EventRegistryBuilder::build`] produces an [`EventRegistry`];
/// after that nothing can be added or removed.
#[derive(Debug, Default)]
pub struct EventRegistryBuilder {
    events: BTreeMap<NamespacedKey, Arc<Event>>,
}

impl EventRegistryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::DuplicateEvent`] if an event with the same key
    /// is already staged.
    pub fn insert(&mut self, event: Arc<Event>) -> Result<(), EventError> {
        if self.events.contains_key(&event.key) {
            return Err(EventError::DuplicateEvent {
                key: event.key.clone(),
            });
        }
        self.events.insert(event.key.clone(), event);
        Ok(())
    }

    /// Freeze the staged events.
    pub fn build(self) -> EventRegistry {
        EventRegistry {
            events: self.events,
        }
    }
}

/// Resolve every top-level entry of `root` into a registry.
///
/// A null root (an empty file) yields an empty registry.
///
/// # Errors
///
/// Returns the first [`EventError`] encountered; no partial registry is
/// returned.
pub fn deserialize(
    root: &Value,
    builtins: &dyn BuiltinLookup,
    options: ResolveOptions,
) -> Result<EventRegistry, EventError> {
    let root = Node::new(root);
    if root.is_null() {
        return Ok(EventRegistry::default());
    }
    let resolver = EventResolver::new(root, builtins, options)?;
    let mut builder = EventRegistryBuilder::new();
    for name in resolver.event_names()? {
        builder.insert(resolver.resolve(&name, &[])?)?;
    }
    let registry = builder.build();
    info!(events = registry.len(), "Custom events resolved");
    Ok(registry)
}
