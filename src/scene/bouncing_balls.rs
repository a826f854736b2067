use serde::Deserialize;
use serde_json::{Value as Json, json};

use crate::animation::bounce::BouncingPoint;
use crate::foundation::core::Point3;
use crate::foundation::error::SceneframeResult;
use crate::foundation::math::SplitMix64;
use crate::property::animated::AnimatedProperty;
use crate::scene::document::{directional_light, sphere};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub(crate) struct BouncingBallsParams {
    /// Seed for the scattered small balls.
    pub(crate) seed: u64,
    pub(crate) small_balls: u32,
    pub(crate) bounces: u32,
}

impl Default for BouncingBallsParams {
    fn default() -> Self {
        Self {
            seed: 0,
            small_balls: 10,
            bounces: 5,
        }
    }
}

/// A glass ball dropped onto a grass floor between a mirror ball and a matte one.
pub(crate) fn build(params: &BouncingBallsParams) -> SceneframeResult<AnimatedProperty> {
    let mut ap = AnimatedProperty::new();
    ap.register(
        "ballPosition",
        BouncingPoint::new(Point3::new(0.0, 10.0, 0.0))
            .bounces(params.bounces)
            .build()?,
    )?;

    let small = small_balls(params.seed, params.small_balls);
    Ok(ap.with_frame_data(move |pf| {
        let mut surfaces = vec![
            sphere(
                json!([0.0, -1001.0, 0.0]),
                1000.0,
                json!({ "kd": [0.5, 1.0, 0.0], "ks": [0.0, 0.0, 0.0], "n": 100 }),
            ),
            sphere(
                pf.frame("ballPosition")?.frame_data()?,
                1.0,
                json!({
                    "kd": [0.0, 0.0, 0.0],
                    "ks": [0.0, 0.0, 0.0],
                    "kr": [0.1, 0.1, 0.1],
                    "kt": [0.9, 0.9, 0.9],
                    "nr": 1.6,
                }),
            ),
            sphere(
                json!([3.0, 0.0, 0.0]),
                1.0,
                json!({ "kd": [0.0, 0.0, 0.0], "ks": [0.0, 0.0, 0.0], "kr": [0.9, 0.9, 0.9] }),
            ),
            sphere(
                json!([-3.0, 0.0, 0.0]),
                1.0,
                json!({ "kd": [0.5, 0.1, 0.2], "ks": [0.5, 0.1, 0.2] }),
            ),
        ];
        surfaces.extend(small.iter().cloned());

        Ok(json!({
            "camera": { "eye": [0.0, 2.0, -10.0] },
            "backgroundIntensity": [0.5, 0.8, 0.9],
            "surfaces": surfaces,
            "lights": [directional_light([4.0, -10.0, 0.0], [0.5, 0.5, 0.5])],
        }))
    }))
}

/// Small balls resting on the floor within `[-count, count]` on x and z, with random colours.
fn small_balls(seed: u64, count: u32) -> Vec<Json> {
    let mut rng = SplitMix64::new(seed);
    let spread = i64::from(count);
    (0..count)
        .map(|_| {
            let x = rng.range_i64(-spread, spread) as f64;
            let z = rng.range_i64(-spread, spread) as f64;
            let mut colour = || [rng.next_f64(), rng.next_f64(), rng.next_f64()];
            let kd = colour();
            let ks = colour();
            sphere(json!([x, -0.8, z]), 0.2, json!({ "kd": kd, "ks": ks }))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/bouncing_balls.rs"]
mod tests;
