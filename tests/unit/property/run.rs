use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::property::node::{PropertyKind, RegisterOpts};
use crate::property::sequence::Sequence;

fn iterated(ap: &mut AnimatedProperty, name: &str, values: Vec<i32>, end_action: EndAction) {
    ap.register_with(
        name,
        Sequence::from(values),
        RegisterOpts::new()
            .kind(PropertyKind::Iterated)
            .end_action(end_action),
    )
    .unwrap();
}

fn collect(ap: &AnimatedProperty) -> Vec<PropertyFrame> {
    ap.run().collect::<SceneframeResult<Vec<_>>>().unwrap()
}

#[test]
fn end_actions_apply_per_property() {
    let mut ap = AnimatedProperty::new();
    iterated(&mut ap, "terminate", vec![1, 2, 3], EndAction::Terminate);
    iterated(&mut ap, "keep", vec![1, 2], EndAction::Keep);
    iterated(&mut ap, "end_value", vec![1, 2], EndAction::EndValue(Value::from(99)));
    iterated(&mut ap, "drop", vec![1, 2], EndAction::Drop);

    let frames = collect(&ap);
    assert_eq!(frames.len(), 3);

    let f1 = &frames[1];
    assert_eq!(f1.value("drop").unwrap(), &Value::Int(2));

    let f2 = &frames[2];
    assert_eq!(f2.frame_num(), 2);
    assert_eq!(f2.value("terminate").unwrap(), &Value::Int(3));
    assert_eq!(f2.value("keep").unwrap(), &Value::Int(2));
    assert_eq!(f2.value("end_value").unwrap(), &Value::Int(99));
    assert!(!f2.contains("drop"));
    assert_eq!(
        f2.names().collect::<Vec<_>>(),
        vec!["terminate", "keep", "end_value"]
    );
}

#[test]
fn terminate_discards_the_tick_without_running_terminators() {
    let calls = Rc::new(Cell::new(0u32));
    let mut ap = AnimatedProperty::new();
    iterated(&mut ap, "seq", vec![1, 2], EndAction::Terminate);
    let seen = Rc::clone(&calls);
    ap.register_terminator(move |_| {
        seen.set(seen.get() + 1);
        false
    });

    assert_eq!(collect(&ap).len(), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn terminators_run_in_registration_order_and_stop_at_the_first_hit() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut ap = AnimatedProperty::new();
    ap.register("value", 1).unwrap();
    for (idx, fires) in [(0, false), (1, true), (2, false), (3, true)] {
        let log = Rc::clone(&calls);
        ap.register_terminator(move |_| {
            log.borrow_mut().push(idx);
            fires
        });
    }

    assert!(collect(&ap).is_empty());
    assert_eq!(*calls.borrow(), vec![0, 1]);
}

#[test]
fn keep_without_any_value_is_null() {
    let mut ap = AnimatedProperty::new();
    iterated(&mut ap, "empty", vec![], EndAction::Keep);
    ap.terminate_at(2);

    let frames = collect(&ap);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].value("empty").unwrap(), &Value::Null);
}

#[test]
fn dynamic_updates_see_the_previous_frame_only() {
    let mut ap = AnimatedProperty::new();
    iterated(&mut ap, "tick", vec![10, 20, 30, 40], EndAction::Terminate);
    // Copies the sibling's value from the previous frame.
    ap.dynamic_property("lagged", -1, |pf| Ok(pf.value("tick")?.clone()))
        .unwrap();
    ap.dynamic_property("seen_frame", -1, |pf| Ok(Value::from(pf.frame_num() as i64)))
        .unwrap();

    let frames = collect(&ap);
    let lagged: Vec<_> = frames
        .iter()
        .map(|f| f.value("lagged").unwrap().clone())
        .collect();
    assert_eq!(
        lagged,
        vec![Value::Int(-1), Value::Int(10), Value::Int(20), Value::Int(30)]
    );
    assert_eq!(frames[3].value("seen_frame").unwrap(), &Value::Int(2));
}

#[test]
fn updater_failures_surface_on_the_next_pull_and_fuse_the_run() {
    let mut ap = AnimatedProperty::new();
    ap.register("label", "eye").unwrap();
    ap.dynamic_property("broken", 0, |pf| pf.value("label")?.checked_add(&Value::from(1)))
        .unwrap();

    let mut run = ap.run();
    assert!(run.next_frame().unwrap().is_some());
    let err = run.next_frame().unwrap_err();
    assert!(err.to_string().contains("updating dynamic property [broken] from frame 0"));
    assert!(run.is_finished());
    assert!(run.next_frame().unwrap().is_none());
    assert!(run.next().is_none());
}

#[test]
fn runs_are_independent_and_restartable() {
    let mut ap = AnimatedProperty::new();
    iterated(&mut ap, "seq", vec![1, 2, 3], EndAction::Terminate);
    ap.dynamic_property("acc", 0, |pf| pf.value("acc")?.checked_add(pf.value("seq")?))
        .unwrap();

    let first = collect(&ap);
    let second = collect(&ap);
    assert_eq!(first, second);
    assert_eq!(first[2].value("acc").unwrap(), &Value::Int(3));

    let mut abandoned = ap.run();
    abandoned.next_frame().unwrap();
    drop(abandoned);
    assert_eq!(collect(&ap), first);
}

#[test]
fn nested_property_exhaustion_applies_parent_end_action() {
    let mut child = AnimatedProperty::new();
    iterated(&mut child, "v", vec![1, 2], EndAction::Terminate);

    let mut parent = AnimatedProperty::new();
    parent
        .register_with(
            "child",
            child,
            RegisterOpts::new().end_action(EndAction::Keep),
        )
        .unwrap();
    parent.terminate_at(4);

    let frames = collect(&parent);
    assert_eq!(frames.len(), 4);
    let last_child = frames[3].frame("child").unwrap();
    assert_eq!(last_child.frame_num(), 1);
    assert_eq!(last_child.value("v").unwrap(), &Value::Int(2));
}

#[test]
fn appended_nested_properties_restart_frame_numbers() {
    let mut first = AnimatedProperty::new();
    iterated(&mut first, "v", vec![1, 2], EndAction::Terminate);
    let mut second = AnimatedProperty::new();
    iterated(&mut second, "v", vec![3], EndAction::Terminate);

    let mut parent = AnimatedProperty::new();
    parent.register("child", first).unwrap();
    parent.append("child", second).unwrap();

    let frames = collect(&parent);
    let seen: Vec<_> = frames
        .iter()
        .map(|f| {
            let c = f.frame("child").unwrap();
            (c.frame_num(), c.value("v").unwrap().clone())
        })
        .collect();
    assert_eq!(
        seen,
        vec![(0, Value::Int(1)), (1, Value::Int(2)), (0, Value::Int(3))]
    );
    assert_eq!(frames[2].frame_num(), 2);
}

#[test]
fn empty_property_runs_forever_until_terminated() {
    let mut ap = AnimatedProperty::new();
    ap.terminate_at(5);
    let frames = collect(&ap);
    assert_eq!(frames.len(), 5);
    assert!(frames.iter().all(PropertyFrame::is_empty));
}

#[test]
fn frames_produced_counts_yielded_frames() {
    let mut ap = AnimatedProperty::new();
    ap.register("c", 1).unwrap();
    ap.register_terminator(|pf| pf.frame_num() >= 3);
    let mut run = ap.run();
    while run.next_frame().unwrap().is_some() {}
    assert_eq!(run.frames_produced(), 3);
}
