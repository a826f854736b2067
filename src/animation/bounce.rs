use std::rc::Rc;

use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::value::Value;
use crate::property::animated::AnimatedProperty;
use crate::property::frame::PropertyFrame;

type FloorTest = Rc<dyn Fn(Point3) -> bool>;

/// A point falling under constant acceleration that bounces off a floor.
///
/// Each tick the velocity gains `acceleration`; when the point is on or below the floor while
/// moving down, its vertical velocity is reversed and scaled by `1 - velocity_loss` instead.
/// The run ends once the point has bounced `bounces` times. Frame data is `[x, y, z]`.
#[derive(Clone)]
pub struct BouncingPoint {
    start: Point3,
    start_velocity: Point3,
    acceleration: Point3,
    bounces: u32,
    velocity_loss: f64,
    touch_floor: FloorTest,
}

impl BouncingPoint {
    pub fn new(start: Point3) -> Self {
        Self {
            start,
            start_velocity: Point3::ZERO,
            acceleration: Point3::new(0.0, -1.0, 0.0),
            bounces: 5,
            velocity_loss: 0.1,
            touch_floor: Rc::new(|p| p.y < 0.0),
        }
    }

    pub fn start_velocity(mut self, velocity: Point3) -> Self {
        self.start_velocity = velocity;
        self
    }

    pub fn acceleration(mut self, acceleration: Point3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn bounces(mut self, bounces: u32) -> Self {
        self.bounces = bounces;
        self
    }

    /// Fraction of vertical speed lost on each bounce, in `[0, 1]`.
    pub fn velocity_loss(mut self, loss: f64) -> Self {
        self.velocity_loss = loss;
        self
    }

    /// Replace the default floor test (`y < 0`).
    pub fn touch_floor<F>(mut self, touch_floor: F) -> Self
    where
        F: Fn(Point3) -> bool + 'static,
    {
        self.touch_floor = Rc::new(touch_floor);
        self
    }

    pub fn build(&self) -> SceneframeResult<AnimatedProperty> {
        if !(0.0..=1.0).contains(&self.velocity_loss) {
            return Err(SceneframeError::validation(format!(
                "bouncing velocity loss must be within [0, 1], got {}",
                self.velocity_loss
            )));
        }
        let vectors = [self.start, self.start_velocity, self.acceleration];
        if !vectors.iter().all(|v| v.is_finite()) {
            return Err(SceneframeError::validation(
                "bouncing point vectors must be finite",
            ));
        }

        let mut ap = AnimatedProperty::new();
        ap.register("acceleration", self.acceleration)?;
        ap.register("retain", 1.0 - self.velocity_loss)?;

        let touch = Rc::clone(&self.touch_floor);
        ap.dynamic_property("velocity", self.start_velocity, move |pf| {
            Ok(Value::from(next_velocity(pf, &*touch)?.0))
        })?;

        let touch = Rc::clone(&self.touch_floor);
        ap.dynamic_property("value", self.start, move |pf| {
            let (velocity, _) = next_velocity(pf, &*touch)?;
            Ok(Value::from(pf.point("value")? + velocity))
        })?;

        let touch = Rc::clone(&self.touch_floor);
        ap.dynamic_property("bounced", 0, move |pf| {
            let (_, bounced) = next_velocity(pf, &*touch)?;
            pf.value("bounced")?.checked_add(&Value::from(i64::from(bounced)))
        })?;

        let limit = i64::from(self.bounces);
        ap.register_terminator(move |pf| {
            pf.value("bounced")
                .ok()
                .and_then(Value::as_i64)
                .is_some_and(|n| n >= limit)
        });

        Ok(ap.with_frame_data(|pf| Ok(serde_json::to_value(pf.point("value")?)?)))
    }
}

/// Velocity for the next frame, and whether it came from a bounce.
fn next_velocity(
    pf: &PropertyFrame,
    touch_floor: &dyn Fn(Point3) -> bool,
) -> SceneframeResult<(Point3, bool)> {
    let velocity = pf.point("velocity")?;
    let position = pf.point("value")?;
    if touch_floor(position) && velocity.y < 0.0 {
        let retain = pf.f64("retain")?;
        return Ok((
            Point3::new(velocity.x, -velocity.y * retain, velocity.z),
            true,
        ));
    }
    Ok((velocity + pf.point("acceleration")?, false))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/bounce.rs"]
mod tests;
