use super::*;

fn params(end: Point3, speed: f64, max_frames: Option<u64>) -> PlanetParams {
    PlanetParams {
        camera_start_point: Point3::ZERO,
        camera_end_point: end,
        speed,
        max_frames,
        eye_end_action: "terminate".to_string(),
    }
}

#[test]
fn eye_flies_at_speed_toward_the_end_point() {
    let ap = build(&params(Point3::new(10.0, 0.0, 0.0), 2.0, None)).unwrap();
    let docs: Vec<serde_json::Value> = ap
        .run()
        .map(|f| f.unwrap().frame_data().unwrap())
        .collect();
    assert_eq!(docs.len(), 6);
    assert_eq!(docs[1]["camera"]["eye"], json!([2.0, 0.0, 0.0]));
    assert_eq!(docs[5]["camera"]["eye"], json!([10.0, 0.0, 0.0]));
    assert_eq!(docs[5]["camera"]["target"], json!([20.0, 0.0, 0.0]));
    assert_eq!(docs[0]["surfaces"].as_array().unwrap().len(), 8);
}

#[test]
fn long_flights_are_capped() {
    let far = Point3::new(5000.0, 0.0, 0.0);
    assert_eq!(build(&params(far, 1.0, None)).unwrap().run().count(), 1000);
    assert_eq!(build(&params(far, 1.0, Some(3))).unwrap().run().count(), 3);
}

#[test]
fn bad_speed_is_rejected() {
    assert!(build(&params(Point3::new(1.0, 0.0, 0.0), 0.0, None)).is_err());
    assert!(build(&params(Point3::new(f64::NAN, 0.0, 0.0), 1.0, None)).is_err());
}

#[test]
fn kept_eye_hovers_at_the_end_point_until_the_cap() {
    let mut p = params(Point3::new(4.0, 0.0, 0.0), 2.0, Some(6));
    p.eye_end_action = "keep".to_string();
    let docs: Vec<serde_json::Value> = build(&p)
        .unwrap()
        .run()
        .map(|f| f.unwrap().frame_data().unwrap())
        .collect();
    assert_eq!(docs.len(), 6);
    for doc in &docs[2..] {
        assert_eq!(doc["camera"]["eye"], json!([4.0, 0.0, 0.0]));
    }
}

#[test]
fn eye_end_action_must_keep_the_eye_frame() {
    for name in ["drop", "end_value", "explode"] {
        let mut p = params(Point3::new(4.0, 0.0, 0.0), 2.0, None);
        p.eye_end_action = name.to_string();
        let err = build(&p).unwrap_err();
        assert!(err.to_string().contains("eyeEndAction"), "{name}: {err}");
    }
}

#[test]
fn vanishing_speed_is_a_validation_error() {
    let err = build(&params(Point3::new(1.0, 0.0, 0.0), 1e-300, None)).unwrap_err();
    assert!(matches!(err, SceneframeError::Validation(_)));
}
