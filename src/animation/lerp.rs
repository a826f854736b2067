use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::math::approx_eq;
use crate::foundation::value::Value;
use crate::property::animated::AnimatedProperty;
use crate::property::frame::PropertyFrame;

/// Stepwise linear interpolation of a single value.
///
/// The returned property has a static `start`, a static `increment` and a dynamic `value`
/// (`value + increment` per tick). Its frame data is the bare `value`.
pub struct Lerp;

impl Lerp {
    /// Never ends on its own unless `max_frame` is given. Works for numbers and points.
    pub fn unbounded(
        start: impl Into<Value>,
        increment: impl Into<Value>,
        max_frame: Option<u64>,
    ) -> SceneframeResult<AnimatedProperty> {
        let start = start.into();
        let mut ap = AnimatedProperty::new();
        ap.register("start", start.clone())?;
        ap.register("increment", increment.into())?;
        ap.dynamic_property("value", start, |pf| {
            pf.value("value")?.checked_add(pf.value("increment")?)
        })?;
        if let Some(max_frame) = max_frame {
            ap.terminate_at(max_frame);
        }
        Ok(ap.with_frame_data(|pf| Ok(serde_json::to_value(pf.value("value")?)?)))
    }

    /// Step from `start` toward `end`, ending right before a value would pass `end`.
    pub fn toward(start: f64, end: f64, step: f64) -> SceneframeResult<AnimatedProperty> {
        if !(start.is_finite() && end.is_finite() && step.is_finite()) {
            return Err(SceneframeError::validation(
                "lerp start, end and step must be finite",
            ));
        }
        if step == 0.0 {
            return Err(SceneframeError::validation("lerp step must be non-zero"));
        }
        if (end - start) * step < 0.0 {
            return Err(SceneframeError::validation(format!(
                "lerp step {step} points away from {end} (start {start})"
            )));
        }

        let mut ap = Self::unbounded(start, step, None)?;
        ap.register_terminator(move |pf| {
            pf.f64("value").is_ok_and(|v| {
                let past = if step > 0.0 { v > end } else { v < end };
                past && !approx_eq(v, end)
            })
        });
        Ok(ap)
    }

    /// Exactly `num_frames` frames from `start` to `end` inclusive.
    pub fn from_interval(
        start: f64,
        end: f64,
        num_frames: u64,
    ) -> SceneframeResult<AnimatedProperty> {
        if num_frames == 0 {
            return Err(SceneframeError::validation(
                "lerp interval needs at least one frame",
            ));
        }
        let increment = if num_frames == 1 {
            0.0
        } else {
            (end - start) / (num_frames - 1) as f64
        };
        Self::unbounded(start, increment, Some(num_frames))
    }
}

/// Stepwise interpolation of a [`Point3`], paced independently per axis.
///
/// The property holds three animated children `x`, `y` and `z` (each a scalar [`Lerp`]); its
/// frame data is `[x, y, z]`. Because the axes share a frame count they finish together even
/// when their deltas differ.
pub struct LerpPoint;

impl LerpPoint {
    pub fn unbounded(
        start: Point3,
        increment: Point3,
        max_frame: Option<u64>,
    ) -> SceneframeResult<AnimatedProperty> {
        Self::compose(
            Lerp::unbounded(start.x, increment.x, max_frame)?,
            Lerp::unbounded(start.y, increment.y, max_frame)?,
            Lerp::unbounded(start.z, increment.z, max_frame)?,
        )
    }

    pub fn from_interval(
        start: Point3,
        end: Point3,
        num_frames: u64,
    ) -> SceneframeResult<AnimatedProperty> {
        Self::compose(
            Lerp::from_interval(start.x, end.x, num_frames)?,
            Lerp::from_interval(start.y, end.y, num_frames)?,
            Lerp::from_interval(start.z, end.z, num_frames)?,
        )
    }

    /// Move at roughly `speed` units per frame; the frame count is derived from the distance.
    pub fn with_speed(
        start: Point3,
        end: Point3,
        speed: f64,
    ) -> SceneframeResult<AnimatedProperty> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(SceneframeError::validation(format!(
                "lerp speed must be positive, got {speed}"
            )));
        }
        // The cast saturates for huge ratios; the extra frame must still fit.
        let steps = ((end - start).length() / speed).ceil() as u64;
        let num_frames = steps.checked_add(1).ok_or_else(|| {
            SceneframeError::validation(format!(
                "lerp speed {speed} is too small to cover {} units",
                (end - start).length()
            ))
        })?;
        Self::from_interval(start, end, num_frames)
    }

    /// Current point of a frame produced by a `LerpPoint` property.
    pub fn point_of(frame: &PropertyFrame) -> SceneframeResult<Point3> {
        Ok(Point3::new(
            frame.frame("x")?.f64("value")?,
            frame.frame("y")?.f64("value")?,
            frame.frame("z")?.f64("value")?,
        ))
    }

    fn compose(
        x: AnimatedProperty,
        y: AnimatedProperty,
        z: AnimatedProperty,
    ) -> SceneframeResult<AnimatedProperty> {
        let mut ap = AnimatedProperty::new();
        ap.register("x", x)?;
        ap.register("y", y)?;
        ap.register("z", z)?;
        Ok(ap.with_frame_data(|pf| Ok(serde_json::to_value(Self::point_of(pf)?)?)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
