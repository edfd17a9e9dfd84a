//! Resolved custom events.

use std::collections::BTreeMap;

use brewery_types::NamespacedKey;

use crate::step::EventStep;

/// A named, ordered sequence of steps.
///
/// Steps are stored in authoring order, which is the order the interpreter
/// runs them in. The three thresholds are consumed by the event selection
/// mechanism and default to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Lookup key, parsed from the event name.
    pub key: NamespacedKey,
    /// The event name as written in configuration.
    pub display_name: String,
    /// Steps in execution order.
    pub steps: Vec<EventStep>,
    /// Minimum alcohol level for the event to be eligible.
    pub alcohol_requirement: i64,
    /// Minimum toxin level for the event to be eligible.
    pub toxin_requirement: i64,
    /// Relative weight when picking among eligible events.
    pub probability_weight: i64,
}

impl Event {
    /// Total number of steps, counting the steps of nested events
    /// instead of the nested event itself.
    ///
    /// Shared nested events are counted once per reference but only walked
    /// once. The count saturates at `usize::MAX`.
    pub fn flattened_len(&self) -> usize {
        self.flattened_len_with(&mut BTreeMap::new())
    }

    fn flattened_len_with<'a>(&'a self, seen: &mut BTreeMap<&'a NamespacedKey, usize>) -> usize {
        self.steps.iter().fold(0, |total: usize, step| {
            let len = match step {
                EventStep::Event(nested) => {
                    let cached = seen.get(&nested.key).copied();
                    cached.unwrap_or_else(|| {
                        let len = nested.flattened_len_with(seen);
                        seen.insert(&nested.key, len);
                        len
                    })
                }
                _ => 1,
            };
            total.saturating_add(len)
        })
    }

    /// Keys of the events this event embeds directly.
    pub fn nested_keys(&self) -> impl Iterator<Item = &NamespacedKey> {
        self.steps.iter().filter_map(|step| match step {
            EventStep::Event(nested) => Some(&nested.key),
            _ => None,
        })
    }
}
