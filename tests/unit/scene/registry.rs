use super::*;
use serde_json::json;

#[test]
fn every_listed_scene_builds() {
    let params = json!({
        "cameraStartPoint": [0, 0, 0],
        "cameraEndPoint": {"x": 3, "y": 4, "z": 0},
    });
    for name in SCENE_NAMES {
        let p = if *name == "PlanetScene" {
            params.clone()
        } else {
            serde_json::Value::Null
        };
        let scene = build_scene(name, &p).unwrap();
        assert!(scene.run().next().is_some(), "{name} produced no frame");
    }
}

#[test]
fn unknown_scene_lists_known_names() {
    let err = build_scene("Nope", &serde_json::Value::Null).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("unknown scene [Nope]"));
    for name in SCENE_NAMES {
        assert!(msg.contains(name));
    }
}

#[test]
fn params_must_be_an_object() {
    let err = build_scene("MovingCamera", &json!([1, 2])).unwrap_err();
    assert!(err.to_string().contains("must be a JSON object"));
}

#[test]
fn unknown_and_missing_params_are_rejected() {
    let err = build_scene("MovingCamera", &json!({"framesPerLegs": 3})).unwrap_err();
    assert!(err.to_string().contains("invalid params for scene [MovingCamera]"));

    let err = build_scene("PlanetScene", &json!({})).unwrap_err();
    assert!(err.to_string().contains("cameraStartPoint"));
}

#[test]
fn planet_with_vanishing_speed_fails_cleanly() {
    let params = json!({
        "cameraStartPoint": [0, 0, 0],
        "cameraEndPoint": [1, 0, 0],
        "speed": 1e-300,
    });
    let err = build_scene("PlanetScene", &params).unwrap_err();
    assert!(err.to_string().contains("too small"));
}
