use std::fmt;
use std::rc::Rc;

use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::value::Value;

/// Shapes the serializable document emitted for a frame of a particular [`crate::AnimatedProperty`].
pub type FrameDataHook = Rc<dyn Fn(&PropertyFrame) -> SceneframeResult<serde_json::Value>>;

/// One entry of a frame: a leaf value, or the frame of a nested animated property.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEntry {
    Value(Value),
    Frame(PropertyFrame),
}

impl FrameEntry {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Frame(_) => None,
        }
    }

    pub fn as_frame(&self) -> Option<&PropertyFrame> {
        match self {
            Self::Frame(f) => Some(f),
            Self::Value(_) => None,
        }
    }
}

/// Immutable snapshot of every property of an [`crate::AnimatedProperty`] at one tick.
///
/// Entries keep registration order. The frame remembers its owner's frame-data hook so that
/// [`PropertyFrame::frame_data`] works on nested frames without access to the owner.
#[derive(Clone)]
pub struct PropertyFrame {
    frame_num: u64,
    props: Vec<(String, FrameEntry)>,
    hook: Option<FrameDataHook>,
}

impl PropertyFrame {
    pub(crate) fn new(
        frame_num: u64,
        props: Vec<(String, FrameEntry)>,
        hook: Option<FrameDataHook>,
    ) -> Self {
        Self {
            frame_num,
            props,
            hook,
        }
    }

    /// 0-based index of this frame within its run.
    pub fn frame_num(&self) -> u64 {
        self.frame_num
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&FrameEntry> {
        self.props
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameEntry)> {
        self.props.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    fn entry(&self, name: &str) -> SceneframeResult<&FrameEntry> {
        self.get(name).ok_or_else(|| {
            SceneframeError::evaluation(format!(
                "frame {} has no property [{name}]",
                self.frame_num
            ))
        })
    }

    /// Leaf value of `name`; fails if missing or if it is a nested frame.
    pub fn value(&self, name: &str) -> SceneframeResult<&Value> {
        match self.entry(name)? {
            FrameEntry::Value(v) => Ok(v),
            FrameEntry::Frame(_) => Err(SceneframeError::evaluation(format!(
                "property [{name}] is a nested frame, not a value"
            ))),
        }
    }

    /// Nested frame of the animated property `name`.
    pub fn frame(&self, name: &str) -> SceneframeResult<&PropertyFrame> {
        match self.entry(name)? {
            FrameEntry::Frame(f) => Ok(f),
            FrameEntry::Value(v) => Err(SceneframeError::evaluation(format!(
                "property [{name}] is a {} value, not a nested frame",
                v.type_name()
            ))),
        }
    }

    pub fn f64(&self, name: &str) -> SceneframeResult<f64> {
        let v = self.value(name)?;
        v.as_f64().ok_or_else(|| {
            SceneframeError::evaluation(format!(
                "property [{name}] is a {}, expected a number",
                v.type_name()
            ))
        })
    }

    pub fn point(&self, name: &str) -> SceneframeResult<Point3> {
        let v = self.value(name)?;
        v.as_point().ok_or_else(|| {
            SceneframeError::evaluation(format!(
                "property [{name}] is a {}, expected a point",
                v.type_name()
            ))
        })
    }

    /// Document for this frame, shaped by the owner's hook when one is installed.
    pub fn frame_data(&self) -> SceneframeResult<serde_json::Value> {
        match &self.hook {
            Some(hook) => hook(self),
            None => self.default_frame_data(),
        }
    }

    /// Name → value map mirroring the frame; nested frames go through their own owner's hook.
    pub fn default_frame_data(&self) -> SceneframeResult<serde_json::Value> {
        let mut out = serde_json::Map::with_capacity(self.props.len());
        for (name, entry) in &self.props {
            let data = match entry {
                FrameEntry::Value(v) => serde_json::to_value(v)?,
                FrameEntry::Frame(f) => f.frame_data()?,
            };
            out.insert(name.clone(), data);
        }
        Ok(serde_json::Value::Object(out))
    }
}

impl PartialEq for PropertyFrame {
    fn eq(&self, other: &Self) -> bool {
        self.frame_num == other.frame_num && self.props == other.props
    }
}

impl fmt::Debug for PropertyFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyFrame")
            .field("frame_num", &self.frame_num)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/property/frame.rs"]
mod tests;
