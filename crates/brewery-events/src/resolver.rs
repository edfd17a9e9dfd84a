//! Recursive-descent resolution of custom event definitions.
//!
//! The resolver turns one named entry of the events tree into a fully
//! materialised [`Event`]. Nested `event` steps are resolved eagerly by
//! recursing into the same algorithm, threading the path of event names
//! visited so far; finding a name already on that path means the
//! definitions loop, and the whole path is reported.
//!
//! Each event is resolved once per resolver and shared by every step that
//! references it, so diamond-shaped reference graphs stay linear in size.
//! Nesting is capped at [`MAX_NESTING_DEPTH`] levels.
//!
//! Every field violation is fatal for the event being read. There is no
//! partial recovery: either a complete event comes back or an
//! [`EventError`] does.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use brewery_types::{Interval, NamespacedKey, SenderKind};
use serde_yml::Value;
use tracing::{debug, warn};

use crate::builtin::BuiltinLookup;
use crate::error::EventError;
use crate::event::Event;
use crate::location::LocationSupplier;
use crate::node::Node;
use crate::step::{
    ApplyEffect, ConditionalWait, Consume, DEFAULT_AMPLIFIER, DEFAULT_EFFECT_DURATION, EventStep,
    FixedWait, RunCommand, Teleport,
};

/// Deepest chain of nested `event` references accepted.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Policy switches for resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Accept events whose `steps` resolve to nothing.
    ///
    /// Off by default: an event without steps is almost always a
    /// mistake in the file.
    pub allow_empty_events: bool,
}

/// Resolves named events out of a configuration tree.
pub struct EventResolver<'a> {
    root: Node<'a>,
    builtins: &'a dyn BuiltinLookup,
    options: ResolveOptions,
    /// Entry name to resolved event and its nesting height.
    resolved: RefCell<BTreeMap<String, Resolved>>,
}

/// A finished event plus how many levels of nested events sit below it.
#[derive(Clone)]
struct Resolved {
    event: Arc<Event>,
    height: usize,
}

impl<'a> EventResolver<'a> {
    /// Create a resolver over the root of an events tree.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidRoot`] if `root` is not a mapping.
    pub fn new(
        root: Node<'a>,
        builtins: &'a dyn BuiltinLookup,
        options: ResolveOptions,
    ) -> Result<Self, EventError> {
        if !root.is_map() {
            return Err(EventError::InvalidRoot);
        }
        Ok(Self {
            root,
            builtins,
            options,
            resolved: RefCell::new(BTreeMap::new()),
        })
    }

    /// Top-level event names in authoring order.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UndefinedName`] if an entry's key is null or a
    /// collection.
    pub fn event_names(&self) -> Result<Vec<String>, EventError> {
        let Value::Mapping(map) = self.root.raw() else {
            return Err(EventError::InvalidRoot);
        };
        map.keys()
            .map(|key| Node::new(key).as_string().ok_or(EventError::UndefinedName))
            .collect()
    }

    /// Resolve `event_name`, given the names already on the reference path.
    ///
    /// Top-level callers pass an empty `visited` slice.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] for any structural problem in this event or
    /// in an event it references, including reference cycles.
    pub fn resolve(&self, event_name: &str, visited: &[String]) -> Result<Arc<Event>, EventError> {
        self.resolve_logged(event_name, visited)
            .map(|resolved| resolved.event)
    }

    fn resolve_logged(&self, name: &str, visited: &[String]) -> Result<Resolved, EventError> {
        let result = self.resolve_entry(name, visited);
        if let Err(e) = &result {
            warn!(event = name, error = %e, "Failed to read custom event");
        }
        result
    }

    fn resolve_entry(&self, name: &str, visited: &[String]) -> Result<Resolved, EventError> {
        if name.trim().is_empty() {
            return Err(EventError::UndefinedName);
        }
        let chain = || {
            let mut chain = visited.to_vec();
            chain.push(name.to_owned());
            chain
        };
        if visited.iter().any(|v| v == name) {
            return Err(EventError::Cycle { chain: chain() });
        }
        let cached = self.resolved.borrow().get(name).cloned();
        let resolved = match cached {
            Some(resolved) => resolved,
            None if visited.len() >= MAX_NESTING_DEPTH => {
                return Err(EventError::TooDeep {
                    chain: chain(),
                    limit: MAX_NESTING_DEPTH,
                });
            }
            None => {
                let resolved = self.read_event(name, visited)?;
                self.resolved
                    .borrow_mut()
                    .insert(name.to_owned(), resolved.clone());
                resolved
            }
        };
        // A cached event may be reused further down than where it was built.
        if visited.len().saturating_add(resolved.height) >= MAX_NESTING_DEPTH {
            return Err(EventError::TooDeep {
                chain: chain(),
                limit: MAX_NESTING_DEPTH,
            });
        }
        Ok(resolved)
    }

    fn read_event(&self, name: &str, visited: &[String]) -> Result<Resolved, EventError> {
        let body = self.root.get(name).ok_or_else(|| EventError::UnknownEvent {
            event: name.to_owned(),
        })?;
        if !body.is_map() {
            return Err(EventError::InvalidEventBody {
                event: name.to_owned(),
            });
        }
        let key = NamespacedKey::parse(name).map_err(|source| EventError::InvalidName {
            event: name.to_owned(),
            source,
        })?;

        let alcohol_requirement = read_int(body, "alcohol", name)?;
        let toxin_requirement = read_int(body, "toxins", name)?;
        let probability_weight = read_int(body, "probability-weight", name)?;

        let raw_steps = match body.get("steps") {
            None => Vec::new(),
            Some(node) if node.is_null() => Vec::new(),
            Some(node) => node.as_list().ok_or_else(|| EventError::InvalidSteps {
                event: name.to_owned(),
            })?,
        };

        let mut path = visited.to_vec();
        path.push(name.to_owned());

        let mut steps = Vec::with_capacity(raw_steps.len());
        let mut height = 0;
        for (index, raw_step) in raw_steps.into_iter().enumerate() {
            if !raw_step.is_map() {
                return Err(EventError::InvalidStepNode {
                    event: name.to_owned(),
                    index,
                });
            }
            let (read, nested_height) = self.read_step(raw_step, &path, name)?;
            height = height.max(nested_height);
            steps.extend(read);
        }

        if steps.is_empty() && !self.options.allow_empty_events {
            return Err(EventError::NoSteps {
                event: name.to_owned(),
            });
        }

        debug!(event = name, steps = steps.len(), "Custom event resolved");
        Ok(Resolved {
            event: Arc::new(Event {
                key,
                display_name: name.to_owned(),
                steps,
                alcohol_requirement,
                toxin_requirement,
                probability_weight,
            }),
            height,
        })
    }

    /// Read one step node, returning the steps it expands to (a `wait` node
    /// may yield two) and the levels of nesting it adds.
    fn read_step(
        &self,
        step: Node<'_>,
        path: &[String],
        event: &str,
    ) -> Result<(Vec<EventStep>, usize), EventError> {
        let step_type = step
            .get("type")
            .and_then(|n| n.as_string())
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| EventError::MissingStepType {
                event: event.to_owned(),
            })?;

        if let Ok(key) = NamespacedKey::parse(&step_type)
            && self.builtins.contains(&key)
        {
            return Ok((vec![EventStep::Builtin(key)], 0));
        }

        let steps: Vec<EventStep> = match step_type.as_str() {
            "event" => {
                let reference = required_string(step, event, "event", "event")?;
                let target = self.entry_name(&reference).ok_or(EventError::UnknownEvent {
                    event: reference,
                })?;
                let nested = self.resolve_logged(&target, path)?;
                return Ok((
                    vec![EventStep::Event(nested.event)],
                    nested.height.saturating_add(1),
                ));
            }
            "command" => {
                let sender = match optional_string(step, event, "as")? {
                    None => SenderKind::default(),
                    Some(raw) => raw
                        .parse()
                        .map_err(|source| EventError::UnknownSender {
                            event: event.to_owned(),
                            source,
                        })?,
                };
                let command = required_string(step, event, "command", "command")?;
                Ok(vec![EventStep::Command(RunCommand { command, sender })])
            }
            "wait" => {
                let mut output = Vec::with_capacity(2);
                if let Some(raw) = optional_string(step, event, "condition")? {
                    let wait = ConditionalWait::parse(&raw).map_err(|source| {
                        EventError::UnknownCondition {
                            event: event.to_owned(),
                            source,
                        }
                    })?;
                    output.push(EventStep::ConditionalWait(wait));
                }
                if let Some(raw) = optional_string(step, event, "duration")? {
                    let wait = FixedWait::parse(&raw).map_err(|source| {
                        EventError::InvalidDuration {
                            event: event.to_owned(),
                            source,
                        }
                    })?;
                    output.push(EventStep::Wait(wait));
                }
                if output.is_empty() {
                    return Err(EventError::MissingWaitTarget {
                        event: event.to_owned(),
                    });
                }
                Ok(output)
            }
            "potion" => {
                let effect = required_string(step, event, "potion", "effect")?;
                let amplifier = read_interval(step, event, "amplifier", DEFAULT_AMPLIFIER)?;
                let duration = read_interval(step, event, "duration", DEFAULT_EFFECT_DURATION)?;
                Ok(vec![EventStep::ApplyEffect(ApplyEffect {
                    effect,
                    amplifier,
                    duration,
                })])
            }
            "consume" => Ok(vec![EventStep::Consume(Consume {
                alcohol: read_int(step, "alcohol", event)?,
                toxins: read_int(step, "toxins", event)?,
            })]),
            "teleport" => {
                let node = step.get("location").ok_or_else(|| EventError::MissingField {
                    event: event.to_owned(),
                    step_type: "teleport",
                    field: "location",
                })?;
                if node.is_null() {
                    return Err(EventError::EmptyField {
                        event: event.to_owned(),
                        field: "location",
                    });
                }
                let location =
                    LocationSupplier::from_node(node).map_err(|source| EventError::InvalidLocation {
                        event: event.to_owned(),
                        source,
                    })?;
                Ok(vec![EventStep::Teleport(Teleport { location })])
            }
            _ => Err(EventError::UnknownStepType {
                event: event.to_owned(),
                step_type,
            }),
        }?;
        Ok((steps, 0))
    }

    /// Find the top-level entry a reference points at.
    ///
    /// An exact name match wins; otherwise the first entry whose key equals
    /// the reference's key (so `Sad`, `sad`, and `brewery:sad` agree).
    fn entry_name(&self, reference: &str) -> Option<String> {
        if self.root.contains(reference) {
            return Some(reference.to_owned());
        }
        let wanted = NamespacedKey::parse(reference).ok()?;
        self.event_names()
            .ok()?
            .into_iter()
            .find(|name| NamespacedKey::parse(name).is_ok_and(|key| key == wanted))
    }
}

/// Integer field: absent or null means 0, anything non-integer is fatal.
fn read_int(node: Node<'_>, field: &'static str, event: &str) -> Result<i64, EventError> {
    match node.get(field) {
        None => Ok(0),
        Some(value) if value.is_null() => Ok(0),
        Some(value) => value.as_int().ok_or_else(|| EventError::InvalidInteger {
            event: event.to_owned(),
            field,
        }),
    }
}

/// Mandatory non-empty scalar field.
fn required_string(
    step: Node<'_>,
    event: &str,
    step_type: &'static str,
    field: &'static str,
) -> Result<String, EventError> {
    optional_string(step, event, field)?.ok_or_else(|| EventError::MissingField {
        event: event.to_owned(),
        step_type,
        field,
    })
}

/// Optional scalar field: absent is `None`, present-but-empty is fatal.
fn optional_string(
    step: Node<'_>,
    event: &str,
    field: &'static str,
) -> Result<Option<String>, EventError> {
    scalar_field(step, event, field, "text")
}

/// Scalar field read as text. Null and blank are [`EventError::EmptyField`];
/// a list or mapping is [`EventError::WrongFieldType`].
fn scalar_field(
    step: Node<'_>,
    event: &str,
    field: &'static str,
    expected: &'static str,
) -> Result<Option<String>, EventError> {
    let Some(node) = step.get(field) else {
        return Ok(None);
    };
    if !node.is_null() && node.as_string().is_none() {
        return Err(EventError::WrongFieldType {
            event: event.to_owned(),
            field,
            expected,
        });
    }
    node.as_string()
        .filter(|s| !s.trim().is_empty())
        .map(Some)
        .ok_or_else(|| EventError::EmptyField {
            event: event.to_owned(),
            field,
        })
}

/// Interval field with a default for absence.
fn read_interval(
    step: Node<'_>,
    event: &str,
    field: &'static str,
    default: Interval,
) -> Result<Interval, EventError> {
    match step.get(field) {
        None => Ok(default),
        Some(node) if node.is_null() => Ok(default),
        Some(_) => {
            let raw = scalar_field(step, event, field, "an interval such as '1;3'")?
                .unwrap_or_default();
            Interval::parse(&raw).map_err(|source| EventError::InvalidInterval {
                event: event.to_owned(),
                field,
                source,
            })
        }
    }
}
