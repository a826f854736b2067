use super::*;

fn leaf_frame() -> PropertyFrame {
    PropertyFrame::new(
        4,
        vec![
            ("speed".to_string(), FrameEntry::Value(Value::from(2.5))),
            (
                "eye".to_string(),
                FrameEntry::Value(Value::from(Point3::new(1.0, 2.0, 3.0))),
            ),
        ],
        None,
    )
}

#[test]
fn typed_accessors_report_mismatches() {
    let f = leaf_frame();
    assert_eq!(f.frame_num(), 4);
    assert_eq!(f.f64("speed").unwrap(), 2.5);
    assert_eq!(f.point("eye").unwrap(), Point3::new(1.0, 2.0, 3.0));

    assert!(f.point("speed").unwrap_err().to_string().contains("expected a point"));
    assert!(f.value("missing").unwrap_err().to_string().contains("frame 4 has no property [missing]"));
    assert!(f.frame("speed").unwrap_err().to_string().contains("not a nested frame"));
}

#[test]
fn default_frame_data_keeps_registration_order() {
    let inner = PropertyFrame::new(
        4,
        vec![("z".to_string(), FrameEntry::Value(Value::from(1)))],
        None,
    );
    let f = PropertyFrame::new(
        4,
        vec![
            ("b".to_string(), FrameEntry::Value(Value::from(1))),
            ("a".to_string(), FrameEntry::Frame(inner)),
        ],
        None,
    );
    assert_eq!(f.names().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(
        serde_json::to_string(&f.frame_data().unwrap()).unwrap(),
        r#"{"b":1,"a":{"z":1}}"#
    );
}

#[test]
fn nested_frames_use_their_own_hook() {
    let hook: FrameDataHook = Rc::new(|pf| Ok(serde_json::to_value(pf.value("v")?)?));
    let inner = PropertyFrame::new(
        0,
        vec![("v".to_string(), FrameEntry::Value(Value::from(7)))],
        Some(hook),
    );
    let outer = PropertyFrame::new(
        0,
        vec![("child".to_string(), FrameEntry::Frame(inner.clone()))],
        None,
    );
    assert_eq!(inner.frame_data().unwrap(), serde_json::json!(7));
    assert_eq!(
        outer.frame_data().unwrap(),
        serde_json::json!({ "child": 7 })
    );
}
