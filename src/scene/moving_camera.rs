use serde::Deserialize;

use crate::animation::lerp::LerpPoint;
use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::property::animated::AnimatedProperty;
use crate::scene::document;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub(crate) struct MovingCameraParams {
    /// Frames spent on each of the two legs of the eye's path.
    pub(crate) frames_per_leg: u64,
}

impl Default for MovingCameraParams {
    fn default() -> Self {
        Self {
            frames_per_leg: 500,
        }
    }
}

/// The camera eye swoops over the planet row in two legs while its target pans along it.
pub(crate) fn build(params: &MovingCameraParams) -> SceneframeResult<AnimatedProperty> {
    let leg = params.frames_per_leg;
    if leg == 0 {
        return Err(SceneframeError::validation(
            "MovingCamera framesPerLeg must be at least 1",
        ));
    }
    let above = Point3::new(22.0, 20.0, 0.0);

    let mut ap = AnimatedProperty::new();
    ap.register(
        "cameraEye",
        LerpPoint::from_interval(Point3::new(22.0, 0.0, 50.0), above, leg)?,
    )?;
    ap.append(
        "cameraEye",
        LerpPoint::from_interval(above, Point3::new(22.0, 0.0, -50.0), leg)?,
    )?;
    ap.register(
        "cameraTarget",
        LerpPoint::from_interval(
            Point3::new(-20.0, 0.0, 0.0),
            Point3::new(40.0, 0.0, 0.0),
            leg.saturating_mul(2),
        )?,
    )?;

    Ok(ap.with_frame_data(|pf| {
        Ok(document::planet_scene(
            pf.frame("cameraEye")?.frame_data()?,
            pf.frame("cameraTarget")?.frame_data()?,
        ))
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/moving_camera.rs"]
mod tests;
