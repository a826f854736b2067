use std::fmt;
use std::rc::Rc;

use crate::foundation::core::Point3;
use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::value::Value;
use crate::property::animated::AnimatedProperty;
use crate::property::frame::PropertyFrame;
use crate::property::sequence::Sequence;

/// Recomputes a dynamic property from the previously yielded frame.
pub type Updater = Rc<dyn Fn(&PropertyFrame) -> SceneframeResult<Value>>;

/// Whole-run stopping predicate, evaluated against each candidate frame.
pub type Terminator = Rc<dyn Fn(&PropertyFrame) -> bool>;

/// How a registered property produces its per-frame value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Constant for the whole run.
    Static,
    /// Recomputed after every yielded frame by an updater.
    Dynamic,
    /// Driven by a nested [`AnimatedProperty`]; its value is the nested frame.
    Animated,
    /// Pulled from a [`Sequence`].
    Iterated,
}

impl PropertyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Animated => "animated",
            Self::Iterated => "iterated",
        }
    }

    /// Animated and iterated properties advance a cursor every tick and can run out.
    pub fn is_sequenced(self) -> bool {
        matches!(self, Self::Animated | Self::Iterated)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Policy applied once an animated or iterated property runs out of values.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EndAction {
    /// End the whole run; the tick in progress is discarded.
    #[default]
    Terminate,
    /// Remove the property from this and every later frame.
    Drop,
    /// Freeze the last pulled value.
    Keep,
    /// Switch to a fixed value.
    EndValue(Value),
}

impl EndAction {
    /// Parse an end action by name (`terminate`, `drop`, `keep`, `end_value`).
    ///
    /// `end_value` is only used for `end_value`.
    pub fn from_name(name: &str, end_value: Value) -> SceneframeResult<Self> {
        match name {
            "terminate" => Ok(Self::Terminate),
            "drop" => Ok(Self::Drop),
            "keep" => Ok(Self::Keep),
            "end_value" => Ok(Self::EndValue(end_value)),
            other => Err(SceneframeError::registry(format!(
                "unknown end_action [{other}]"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Terminate => "terminate",
            Self::Drop => "drop",
            Self::Keep => "keep",
            Self::EndValue(_) => "end_value",
        }
    }
}

/// What a property is registered with.
pub enum Seed {
    /// Initial value of a static or dynamic property.
    ///
    /// Auto detection never makes a value iterated: a [`Value::List`] registered without a kind
    /// is a static list. Pass `PropertyKind::Iterated` explicitly, or use a [`Sequence`], to
    /// iterate over its elements.
    Value(Value),
    Animated(AnimatedProperty),
    Iterated(Sequence),
}

impl Seed {
    fn describe(&self) -> &'static str {
        match self {
            Self::Value(Value::List(_)) => "list value",
            Self::Value(_) => "plain value",
            Self::Animated(_) => "animated property",
            Self::Iterated(_) => "sequence",
        }
    }

    fn auto_kind(&self, has_updater: bool) -> PropertyKind {
        if has_updater {
            return PropertyKind::Dynamic;
        }
        match self {
            Self::Animated(_) => PropertyKind::Animated,
            Self::Iterated(_) => PropertyKind::Iterated,
            Self::Value(_) => PropertyKind::Static,
        }
    }
}

impl From<Value> for Seed {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<AnimatedProperty> for Seed {
    fn from(v: AnimatedProperty) -> Self {
        Self::Animated(v)
    }
}

impl From<Sequence> for Seed {
    fn from(v: Sequence) -> Self {
        Self::Iterated(v)
    }
}

impl From<bool> for Seed {
    fn from(v: bool) -> Self {
        Self::Value(v.into())
    }
}

impl From<i32> for Seed {
    fn from(v: i32) -> Self {
        Self::Value(v.into())
    }
}

impl From<i64> for Seed {
    fn from(v: i64) -> Self {
        Self::Value(v.into())
    }
}

impl From<f64> for Seed {
    fn from(v: f64) -> Self {
        Self::Value(v.into())
    }
}

impl From<&str> for Seed {
    fn from(v: &str) -> Self {
        Self::Value(v.into())
    }
}

impl From<Point3> for Seed {
    fn from(v: Point3) -> Self {
        Self::Value(v.into())
    }
}

/// Registration options. The default is automatic kind detection with
/// [`EndAction::Terminate`] and no updater.
#[derive(Clone, Default)]
pub struct RegisterOpts {
    kind: Option<PropertyKind>,
    end_action: EndAction,
    updater: Option<Updater>,
}

impl RegisterOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a kind instead of detecting it from the seed.
    pub fn kind(mut self, kind: PropertyKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn end_action(mut self, end_action: EndAction) -> Self {
        self.end_action = end_action;
        self
    }

    pub fn updater<F>(mut self, updater: F) -> Self
    where
        F: Fn(&PropertyFrame) -> SceneframeResult<Value> + 'static,
    {
        self.updater = Some(Rc::new(updater));
        self
    }
}

#[derive(Clone)]
pub(crate) enum NodeSeed {
    Value(Value),
    /// Nested engines, run back to back.
    Animated(Vec<AnimatedProperty>),
    Iterated(Sequence),
}

/// A registered child property definition.
#[derive(Clone)]
pub struct PropertyNode {
    name: String,
    kind: PropertyKind,
    seed: NodeSeed,
    end_action: EndAction,
    updater: Option<Updater>,
}

impl PropertyNode {
    pub(crate) fn build(name: String, seed: Seed, opts: RegisterOpts) -> SceneframeResult<Self> {
        let RegisterOpts {
            kind,
            end_action,
            updater,
        } = opts;
        let kind = kind.unwrap_or_else(|| seed.auto_kind(updater.is_some()));

        match (kind, updater.is_some()) {
            (PropertyKind::Dynamic, false) => {
                return Err(SceneframeError::registry(format!(
                    "Failed to register dynamic property [{name}], because no updater was given"
                )));
            }
            (kind, true) if kind != PropertyKind::Dynamic => {
                return Err(SceneframeError::registry(format!(
                    "Failed to register {kind} property [{name}], because only dynamic properties take an updater"
                )));
            }
            _ => {}
        }

        let seed = match (kind, seed) {
            (PropertyKind::Static | PropertyKind::Dynamic, Seed::Value(v)) => NodeSeed::Value(v),
            (PropertyKind::Animated, Seed::Animated(ap)) => NodeSeed::Animated(vec![ap]),
            (PropertyKind::Iterated, Seed::Iterated(seq)) => NodeSeed::Iterated(seq),
            (PropertyKind::Iterated, Seed::Value(Value::List(items))) => {
                NodeSeed::Iterated(Sequence::from_values(items))
            }
            (kind, seed) => {
                return Err(SceneframeError::registry(format!(
                    "Failed to register {kind} property [{name}], because its {} seed cannot back it",
                    seed.describe()
                )));
            }
        };

        Ok(Self {
            name,
            kind,
            seed,
            end_action,
            updater,
        })
    }

    pub(crate) fn append(&mut self, extra: Seed) -> SceneframeResult<()> {
        match (&mut self.seed, extra) {
            (NodeSeed::Animated(segments), Seed::Animated(ap)) => {
                segments.push(ap);
                Ok(())
            }
            (NodeSeed::Iterated(seq), Seed::Iterated(more)) => {
                *seq = std::mem::take(seq).chain(more);
                Ok(())
            }
            (NodeSeed::Iterated(seq), Seed::Value(Value::List(items))) => {
                *seq = std::mem::take(seq).chain(Sequence::from_values(items));
                Ok(())
            }
            (NodeSeed::Value(_), _) => Err(SceneframeError::registry(format!(
                "Cannot append to {} property [{}], only animated and iterated properties can be extended",
                self.kind, self.name
            ))),
            (_, extra) => Err(SceneframeError::registry(format!(
                "Cannot append {} seed to {} property [{}]",
                extra.describe(),
                self.kind,
                self.name
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Only meaningful for animated and iterated properties.
    pub fn end_action(&self) -> &EndAction {
        &self.end_action
    }

    /// Seed value of a static or dynamic property.
    pub fn initial_value(&self) -> Option<&Value> {
        match &self.seed {
            NodeSeed::Value(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn seed(&self) -> &NodeSeed {
        &self.seed
    }

    pub(crate) fn updater(&self) -> Option<&Updater> {
        self.updater.as_ref()
    }
}

impl fmt::Debug for PropertyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("end_action", &self.end_action)
            .field("has_updater", &self.updater.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/property/node.rs"]
mod tests;
