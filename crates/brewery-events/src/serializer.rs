//! Canonical serialization of an [`EventRegistry`] back into a tree.
//!
//! The output has the same shape the resolver reads. Zero-valued
//! thresholds are omitted, so an explicit `alcohol: 0` and an absent one
//! both come back as absent after a round trip.

use serde_yml::{Mapping, Value};

use crate::event::Event;
use crate::registry::EventRegistry;
use crate::step::EventStep;

/// Serialize every event, ordered by key.
pub fn serialize(registry: &EventRegistry) -> Value {
    let mut output = Mapping::new();
    for event in registry.events() {
        output.insert(
            Value::from(event.key.to_minimal_string()),
            Value::Mapping(event_to_mapping(event)),
        );
    }
    Value::Mapping(output)
}

fn event_to_mapping(event: &Event) -> Mapping {
    let mut data = Mapping::new();
    for (field, value) in [
        ("alcohol", event.alcohol_requirement),
        ("toxins", event.toxin_requirement),
        ("probability-weight", event.probability_weight),
    ] {
        if value != 0 {
            data.insert(Value::from(field), Value::from(value));
        }
    }
    let steps = event.steps.iter().map(step_to_value).collect();
    data.insert(Value::from("steps"), Value::Sequence(steps));
    data
}

/// Inverse of the resolver's step dispatch.
fn step_to_value(step: &EventStep) -> Value {
    let fields: Vec<(&str, Value)> = match step {
        EventStep::Builtin(key) => vec![("type", Value::from(key.to_minimal_string()))],
        EventStep::Event(nested) => vec![
            ("type", Value::from("event")),
            ("event", Value::from(nested.key.to_minimal_string())),
        ],
        EventStep::Command(command) => vec![
            ("type", Value::from("command")),
            ("as", Value::from(command.sender.as_str())),
            ("command", Value::from(command.command.as_str())),
        ],
        EventStep::Wait(wait) => vec![
            ("type", Value::from("wait")),
            ("duration", Value::from(wait.to_duration_string())),
        ],
        EventStep::ConditionalWait(wait) => vec![
            ("type", Value::from("wait")),
            ("condition", Value::from(wait.condition.as_str())),
        ],
        EventStep::ApplyEffect(effect) => vec![
            ("type", Value::from("potion")),
            ("effect", Value::from(effect.effect.as_str())),
            ("duration", Value::from(effect.duration.to_string())),
            ("amplifier", Value::from(effect.amplifier.to_string())),
        ],
        EventStep::Consume(consume) => vec![
            ("type", Value::from("consume")),
            ("alcohol", Value::from(consume.alcohol)),
            ("toxins", Value::from(consume.toxins)),
        ],
        EventStep::Teleport(teleport) => vec![
            ("type", Value::from("teleport")),
            ("location", Value::from(teleport.location.to_string())),
        ],
    };
    let mut map = Mapping::new();
    for (key, value) in fields {
        map.insert(Value::from(key), value);
    }
    Value::Mapping(map)
}
