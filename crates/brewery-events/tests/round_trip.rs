//! End-to-end tests for loading, resolving, and re-writing event files.
//!
//! Everything goes through the public API: YAML text in, registry out, and
//! back to text through the canonical writer.

#![allow(clippy::unwrap_used)]

use brewery_events::writer::to_canonical_text;
use brewery_events::{
    BuiltinRegistry, EventError, EventLoader, EventRegistry, EventStep, FixedWait, LoadError,
    ResolveOptions, RunCommand, TextFormat, load_events_file, parse_events, save_events_file,
    serialize,
};
use brewery_types::{NamespacedKey, SenderKind, WaitCondition};

fn load(yaml: &str) -> Result<EventRegistry, LoadError> {
    parse_events(
        yaml,
        &BuiltinRegistry::with_defaults(),
        ResolveOptions::default(),
    )
}

fn event_error(yaml: &str) -> EventError {
    match load(yaml) {
        Err(LoadError::Event(e)) => e,
        other => panic!("expected an event error, got {other:?}"),
    }
}

/// Resolve, render to text, and resolve the text again.
fn reparse(registry: &EventRegistry, format: TextFormat) -> EventRegistry {
    let text = to_canonical_text(&serialize(registry), format).unwrap();
    load(&text).unwrap()
}

const TAVERN: &str = r"
sad:
  alcohol: 5
  steps:
    - type: command
      command: say hi
    - type: wait
      duration: 20t
tipsy:
  alcohol: 20
  probability-weight: 4
  steps:
    - type: stumble
    - type: event
      event: sad
wasted:
  alcohol: 80
  toxins: 10
  steps:
    - type: event
      event: tipsy
    - type: potion
      effect: nausea
      duration: 5;10
    - type: event
      event: sad
    - type: wait
      condition: join
    - type: teleport
      location: world, 0, 64, 0
    - type: consume
      alcohol: -30
      toxins: -5
    - type: command
      as: player
      command: spawn
";

#[test]
fn nested_steps_match_independently_resolved_events() {
    let registry = load(TAVERN).unwrap();
    assert_eq!(registry.len(), 3);

    for event in registry.events() {
        for step in &event.steps {
            if let EventStep::Event(nested) = step {
                let standalone = registry.get(&nested.key).unwrap();
                assert_eq!(&**nested, standalone);
            }
        }
    }

    let wasted = registry.get_by_name("wasted").unwrap();
    let nested: Vec<String> = wasted.nested_keys().map(ToString::to_string).collect();
    assert_eq!(nested, vec!["brewery:tipsy", "brewery:sad"]);
    // tipsy (stumble + sad's two steps) + 5 direct steps + sad's two steps.
    assert_eq!(wasted.flattened_len(), 3 + 5 + 2);
}

#[test]
fn mutual_reference_names_both_events() {
    let err = event_error(
        r"
a:
  steps: [{type: event, event: b}]
b:
  steps: [{type: event, event: a}]
",
    );
    let EventError::Cycle { chain } = &err else {
        panic!("expected a cycle, got {err:?}");
    };
    assert!(chain.contains(&"a".to_owned()));
    assert!(chain.contains(&"b".to_owned()));
    let message = err.to_string();
    assert!(message.contains("infinite loop"));
    assert!(message.contains("a -> b -> a"));
}

#[test]
fn self_reference_fails() {
    let err = event_error("loop:\n  steps: [{type: event, event: loop}]");
    assert_eq!(
        err,
        EventError::Cycle {
            chain: vec!["loop".to_owned(), "loop".to_owned()]
        }
    );
}

#[test]
fn thresholds_default_to_zero_and_zero_is_lossy() {
    let absent = load("calm:\n  steps: [{type: puke}]").unwrap();
    let calm = absent.get_by_name("calm").unwrap();
    assert_eq!(calm.alcohol_requirement, 0);
    assert_eq!(calm.toxin_requirement, 0);
    assert_eq!(calm.probability_weight, 0);

    let explicit = load(
        "calm:\n  alcohol: 0\n  toxins: 0\n  probability-weight: 0\n  steps: [{type: puke}]",
    )
    .unwrap();
    assert_eq!(explicit, absent);

    let absent_text = to_canonical_text(&serialize(&absent), TextFormat::Yaml).unwrap();
    let explicit_text = to_canonical_text(&serialize(&explicit), TextFormat::Yaml).unwrap();
    assert_eq!(absent_text, explicit_text);
    assert!(!explicit_text.contains("alcohol"));
}

#[test]
fn wait_step_expansion() {
    let registry = load(
        r"
only-condition:
  steps: [{type: wait, condition: sneak}]
only-duration:
  steps: [{type: wait, duration: 3s}]
both:
  steps: [{type: wait, duration: 40t, condition: respawn}]
",
    )
    .unwrap();

    let steps = |name: &str| registry.get_by_name(name).unwrap().steps.clone();

    assert!(matches!(
        steps("only-condition").as_slice(),
        [EventStep::ConditionalWait(wait)] if wait.condition == WaitCondition::Sneak
    ));
    assert_eq!(
        steps("only-duration"),
        vec![EventStep::Wait(FixedWait { duration_ticks: 60 })]
    );
    assert!(matches!(
        steps("both").as_slice(),
        [
            EventStep::ConditionalWait(wait),
            EventStep::Wait(FixedWait { duration_ticks: 40 })
        ] if wait.condition == WaitCondition::Respawn
    ));

    let err = event_error("neither:\n  steps: [{type: wait}]");
    assert_eq!(
        err,
        EventError::MissingWaitTarget {
            event: "neither".to_owned()
        }
    );
}

#[test]
fn unknown_step_type_returns_no_event() {
    let err = event_error("odd:\n  steps: [{type: puke}, {type: bogus}]");
    assert!(matches!(
        &err,
        EventError::UnknownStepType { step_type, .. } if step_type == "bogus"
    ));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn canonical_text_round_trips() {
    let registry = load(TAVERN).unwrap();
    for format in [TextFormat::Yaml, TextFormat::Json] {
        let reloaded = reparse(&registry, format);
        assert_eq!(reloaded, registry);

        let keys: Vec<&NamespacedKey> = reloaded.keys().collect();
        let original: Vec<&NamespacedKey> = registry.keys().collect();
        assert_eq!(keys, original);
    }

    // Writing the re-read registry gives byte-identical text.
    let once = to_canonical_text(&serialize(&registry), TextFormat::Yaml).unwrap();
    let twice = to_canonical_text(&serialize(&reparse(&registry, TextFormat::Yaml)), TextFormat::Yaml)
        .unwrap();
    assert_eq!(once, twice);
}

#[test]
fn sad_scenario() {
    let registry = load(
        r#"{"sad": {"alcohol": 5, "steps": [{"type":"command","command":"say hi"}, {"type":"wait","duration":"20t"}]}}"#,
    )
    .unwrap();
    assert_eq!(registry.len(), 1);

    let sad = registry
        .get(&NamespacedKey::brewery("sad").unwrap())
        .unwrap();
    assert_eq!(sad.alcohol_requirement, 5);
    assert_eq!(
        sad.steps,
        vec![
            EventStep::Command(RunCommand {
                command: "say hi".to_owned(),
                sender: SenderKind::Server,
            }),
            EventStep::Wait(FixedWait { duration_ticks: 20 }),
        ]
    );
}

#[test]
fn files_load_save_and_reload() {
    let builtins = BuiltinRegistry::with_defaults();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("events.yml");
    let output = dir.path().join("formatted.yml");
    std::fs::write(&source, TAVERN).unwrap();

    let registry = load_events_file(&source, &builtins, ResolveOptions::default()).unwrap();
    save_events_file(&registry, &output, TextFormat::Yaml).unwrap();
    let formatted = load_events_file(&output, &builtins, ResolveOptions::default()).unwrap();
    assert_eq!(formatted, registry);

    let loader = EventLoader::new(&source, builtins, ResolveOptions::default());
    let handle = loader.shared();
    loader.reload().unwrap();
    let good = handle.snapshot();

    std::fs::write(&source, "broken:\n  steps: [{type: command}]").unwrap();
    let err = loader.reload().unwrap_err();
    assert!(matches!(
        err,
        LoadError::Event(EventError::MissingField { .. })
    ));
    assert_eq!(handle.snapshot(), good);
}

#[test]
fn empty_events_need_an_opt_in() {
    let yaml = "quiet:\n  alcohol: 10";
    assert_eq!(
        event_error(yaml),
        EventError::NoSteps {
            event: "quiet".to_owned()
        }
    );

    let registry = parse_events(
        yaml,
        &BuiltinRegistry::with_defaults(),
        ResolveOptions {
            allow_empty_events: true,
        },
    )
    .unwrap();
    assert!(registry.get_by_name("quiet").unwrap().steps.is_empty());
}

#[test]
fn long_reference_chains_fail_cleanly() {
    let yaml: String = (0..200_usize)
        .map(|i| {
            format!(
                "e{i}:\n  steps: [{{type: event, event: e{}}}]\n",
                i.saturating_add(1)
            )
        })
        .chain(std::iter::once("e200:\n  steps: [{type: puke}]\n".to_owned()))
        .collect();
    let err = event_error(&yaml);
    assert!(matches!(
        &err,
        EventError::TooDeep { limit, .. } if *limit == brewery_events::MAX_NESTING_DEPTH
    ));
    assert_eq!(err.event_name(), Some("e0"));
    assert!(err.to_string().contains("e0 -> e1 -> e2"));
}

#[test]
fn layered_diamonds_stay_linear() {
    const LEVELS: u32 = 40;
    let mut yaml = String::new();
    for level in 0..LEVELS {
        let next = level.saturating_add(1);
        for side in ["a", "b"] {
            if next == LEVELS {
                yaml.push_str(&format!("{side}{level}:\n  steps: [{{type: puke}}]\n"));
            } else {
                yaml.push_str(&format!(
                    "{side}{level}:\n  steps: [{{type: event, event: a{next}}}, {{type: event, event: b{next}}}]\n"
                ));
            }
        }
    }

    let registry = load(&yaml).unwrap();
    assert_eq!(registry.len(), 80);
    let top = registry.get_by_name("a0").unwrap();
    assert_eq!(top.flattened_len(), 2_usize.checked_pow(LEVELS.saturating_sub(1)).unwrap());

    let text = to_canonical_text(&serialize(&registry), TextFormat::Yaml).unwrap();
    assert!(text.len() < 16_384);
    let reloaded = load(&text).unwrap();
    assert_eq!(reloaded.len(), 80);
}

#[test]
fn mapping_locations_round_trip() {
    let registry = load(
        "hop:\n  steps:\n    - type: teleport\n      location: {world: nether, x: 1, y: 2, z: 3}",
    )
    .unwrap();
    let reloaded = reparse(&registry, TextFormat::Yaml);
    assert_eq!(reloaded, registry);
    let [EventStep::Teleport(teleport)] = reloaded.get_by_name("hop").unwrap().steps.as_slice()
    else {
        panic!("expected a single teleport step");
    };
    assert_eq!(teleport.location.to_string(), "nether, 1, 2, 3");

    let err = event_error(
        "hop:\n  steps:\n    - type: teleport\n      location: {world: 'my,world', x: 1, y: 2, z: 3}",
    );
    assert!(matches!(err, EventError::InvalidLocation { .. }));
}
