use crate::foundation::error::SceneframeResult;
use crate::foundation::value::Value;
use crate::property::animated::AnimatedProperty;

/// Constant-acceleration integrator.
///
/// Properties: static `acceleration`, dynamic `velocity` (`velocity + acceleration`) and dynamic
/// `value` (`value + velocity`, using the previous frame's velocity). Numbers and points both
/// work. Frame data is the bare `value`.
pub struct Accelerated;

impl Accelerated {
    pub fn new(
        start_value: impl Into<Value>,
        start_velocity: impl Into<Value>,
        acceleration: impl Into<Value>,
        max_frame: Option<u64>,
    ) -> SceneframeResult<AnimatedProperty> {
        let mut ap = AnimatedProperty::new();
        ap.register("acceleration", acceleration.into())?;
        ap.dynamic_property("velocity", start_velocity, |pf| {
            pf.value("velocity")?.checked_add(pf.value("acceleration")?)
        })?;
        ap.dynamic_property("value", start_value, |pf| {
            pf.value("value")?.checked_add(pf.value("velocity")?)
        })?;
        if let Some(max_frame) = max_frame {
            ap.terminate_at(max_frame);
        }
        Ok(ap.with_frame_data(|pf| Ok(serde_json::to_value(pf.value("value")?)?)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/accel.rs"]
mod tests;
