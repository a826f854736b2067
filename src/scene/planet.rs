use serde::Deserialize;
use serde_json::json;

use crate::animation::lerp::LerpPoint;
use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::value::Value;
use crate::property::animated::AnimatedProperty;
use crate::property::node::{EndAction, RegisterOpts};
use crate::scene::document;

const DEFAULT_MAX_FRAMES: u64 = 1000;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct PlanetParams {
    pub(crate) camera_start_point: Point3,
    pub(crate) camera_end_point: Point3,
    /// Distance the eye covers per frame.
    #[serde(default = "default_speed")]
    pub(crate) speed: f64,
    #[serde(default)]
    pub(crate) max_frames: Option<u64>,
    /// What the eye does on arrival: `terminate` ends the scene, `keep` hovers until
    /// `maxFrames`.
    #[serde(default = "default_eye_end_action")]
    pub(crate) eye_end_action: String,
}

fn default_speed() -> f64 {
    1.0
}

fn default_eye_end_action() -> String {
    "terminate".to_string()
}

/// The eye flies from `cameraStartPoint` to `cameraEndPoint` looking at the planet row.
pub(crate) fn build(params: &PlanetParams) -> SceneframeResult<AnimatedProperty> {
    if !(params.camera_start_point.is_finite() && params.camera_end_point.is_finite()) {
        return Err(SceneframeError::validation(
            "PlanetScene camera points must be finite",
        ));
    }

    // The document hook needs the eye frame, so it can only end the run or hold still.
    let end_action = match EndAction::from_name(&params.eye_end_action, Value::Null) {
        Ok(action @ (EndAction::Terminate | EndAction::Keep)) => action,
        _ => {
            return Err(SceneframeError::validation(format!(
                "PlanetScene eyeEndAction must be \"terminate\" or \"keep\", got \"{}\"",
                params.eye_end_action
            )));
        }
    };

    let mut ap = AnimatedProperty::new();
    ap.register_with(
        "cameraEye",
        LerpPoint::with_speed(
            params.camera_start_point,
            params.camera_end_point,
            params.speed,
        )?,
        RegisterOpts::new().end_action(end_action),
    )?;
    ap.terminate_at(params.max_frames.unwrap_or(DEFAULT_MAX_FRAMES));

    Ok(ap.with_frame_data(|pf| {
        Ok(document::planet_scene(
            pf.frame("cameraEye")?.frame_data()?,
            json!([20.0, 0.0, 0.0]),
        ))
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/planet.rs"]
mod tests;
