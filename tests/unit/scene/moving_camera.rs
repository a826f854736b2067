use super::*;

fn xyz(doc: &serde_json::Value) -> [f64; 3] {
    let arr = doc.as_array().unwrap();
    [
        arr[0].as_f64().unwrap(),
        arr[1].as_f64().unwrap(),
        arr[2].as_f64().unwrap(),
    ]
}

fn assert_near(got: [f64; 3], want: [f64; 3]) {
    for (g, w) in got.iter().zip(want) {
        assert!((g - w).abs() < 1e-9, "{got:?} != {want:?}");
    }
}

#[test]
fn eye_runs_two_legs_while_target_pans() {
    let ap = build(&MovingCameraParams { frames_per_leg: 3 }).unwrap();
    let docs: Vec<serde_json::Value> = ap
        .run()
        .map(|f| f.unwrap().frame_data().unwrap())
        .collect();
    assert_eq!(docs.len(), 6);

    assert_near(xyz(&docs[0]["camera"]["eye"]), [22.0, 0.0, 50.0]);
    assert_near(xyz(&docs[2]["camera"]["eye"]), [22.0, 20.0, 0.0]);
    assert_near(xyz(&docs[5]["camera"]["eye"]), [22.0, 0.0, -50.0]);
    assert_near(xyz(&docs[0]["camera"]["target"]), [-20.0, 0.0, 0.0]);
    assert_near(xyz(&docs[5]["camera"]["target"]), [40.0, 0.0, 0.0]);
}

#[test]
fn document_carries_planets_and_sun() {
    let ap = build(&MovingCameraParams { frames_per_leg: 1 }).unwrap();
    let doc = ap.run().next().unwrap().unwrap().frame_data().unwrap();
    assert_eq!(doc["surfaces"].as_array().unwrap().len(), 8);
    assert_eq!(doc["surfaces"][4]["size"], serde_json::json!(8.0));
    assert_eq!(doc["lights"][0]["type"], "direction");
}

#[test]
fn default_flight_is_a_thousand_frames() {
    let ap = build(&MovingCameraParams::default()).unwrap();
    assert_eq!(ap.run().count(), 1000);
}

#[test]
fn zero_frame_legs_are_rejected() {
    assert!(build(&MovingCameraParams { frames_per_leg: 0 }).is_err());
}
