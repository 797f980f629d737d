use super::*;

#[test]
fn parses_steps_with_defaults() {
    let json = r#"{
        "config": { "segment_count": 3, "duration_secs": 2.0 },
        "steps": [
            { "op": "start" },
            { "op": "advance", "secs": 1.5, "step": 0.5 },
            { "op": "goto", "index": 2 },
            { "op": "lifecycle", "event": "did_enter_background" },
            { "op": "tap", "x": 10.0, "y": 2.0 },
            { "op": "sample" }
        ]
    }"#;
    let script = Script::from_json(json).unwrap();
    assert_eq!(script.width, 320.0);
    assert_eq!(script.height, 4.0);
    assert_eq!(
        script.steps,
        vec![
            Step::Start,
            Step::Advance {
                secs: 1.5,
                step: Some(0.5)
            },
            Step::Goto {
                index: 2,
                notify: true
            },
            Step::Lifecycle {
                event: LifecycleEvent::DidEnterBackground
            },
            Step::Tap { x: 10.0, y: 2.0 },
            Step::Sample,
        ]
    );
}

#[test]
fn unknown_op_fails_to_parse() {
    let json = r#"{ "config": { "segment_count": 1 }, "steps": [ { "op": "rewind" } ] }"#;
    assert!(matches!(
        Script::from_json(json),
        Err(StorybarError::Serde(_))
    ));
}

#[test]
fn invalid_advance_is_rejected() {
    let base = Script::new(TimelineConfig::new(2, 1.0));
    let negative = base.clone().step(Step::Advance {
        secs: -1.0,
        step: None,
    });
    assert!(matches!(
        negative.validate(),
        Err(StorybarError::Validation(_))
    ));

    let zero_step = base.clone().step(Step::Advance {
        secs: 1.0,
        step: Some(0.0),
    });
    assert!(zero_step.validate().is_err());

    assert!(base.step(Step::Start).validate().is_ok());
}

#[test]
fn invalid_config_is_rejected() {
    let script = Script::new(TimelineConfig::new(0, 1.0));
    assert!(matches!(
        script.validate(),
        Err(StorybarError::Validation(_))
    ));
}

#[test]
fn serializes_goto_with_explicit_notify() {
    let json = serde_json::to_value(Step::Goto {
        index: -1,
        notify: false,
    })
    .unwrap();
    assert_eq!(json["op"], "goto");
    assert_eq!(json["index"], -1);
    assert_eq!(json["notify"], false);
}

#[test]
fn advance_needing_too_many_ticks_is_rejected() {
    let script = Script::new(TimelineConfig::new(2, 1.0)).step(Step::Advance {
        secs: 1e17,
        step: Some(1.0),
    });
    assert!(matches!(
        script.validate(),
        Err(StorybarError::Validation(_))
    ));
    assert_eq!(advance_ticks(1.0, Some(0.3)).unwrap(), 4);
    assert_eq!(advance_ticks(5.0, None).unwrap(), 1);
    assert_eq!(advance_ticks(0.0, Some(0.5)).unwrap(), 1);
}
