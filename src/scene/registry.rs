use serde::de::DeserializeOwned;

use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::property::animated::AnimatedProperty;
use crate::scene::{bouncing_balls, moving_camera, planet};

/// Names accepted by [`build_scene`].
pub const SCENE_NAMES: &[&str] = &["MovingCamera", "BouncingBalls", "PlanetScene"];

/// Build a scene by name. `params` must be a JSON object, or `null` for all defaults.
#[tracing::instrument(skip(params))]
pub fn build_scene(
    name: &str,
    params: &serde_json::Value,
) -> SceneframeResult<AnimatedProperty> {
    match name {
        "MovingCamera" => moving_camera::build(&parse_params(name, params)?),
        "BouncingBalls" => bouncing_balls::build(&parse_params(name, params)?),
        "PlanetScene" => planet::build(&parse_params(name, params)?),
        other => Err(SceneframeError::validation(format!(
            "unknown scene [{other}], expected one of: {}",
            SCENE_NAMES.join(", ")
        ))),
    }
}

fn parse_params<P: DeserializeOwned>(
    scene: &str,
    params: &serde_json::Value,
) -> SceneframeResult<P> {
    let params = match params {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        serde_json::Value::Object(_) => params.clone(),
        other => {
            return Err(SceneframeError::validation(format!(
                "params for scene [{scene}] must be a JSON object, got {other}"
            )));
        }
    };
    serde_json::from_value(params).map_err(|e| {
        SceneframeError::validation(format!("invalid params for scene [{scene}]: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
