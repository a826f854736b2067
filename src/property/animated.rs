use std::fmt;
use std::rc::Rc;

use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::value::Value;
use crate::property::frame::{FrameDataHook, PropertyFrame};
use crate::property::node::{PropertyNode, RegisterOpts, Seed, Terminator};
use crate::property::run::PropertyRun;

/// A composable animated property: an ordered registry of named child properties plus the
/// terminators that end a run.
///
/// Iterating (via [`AnimatedProperty::run`] or `for frame in &property`) yields one
/// [`PropertyFrame`] per tick. Every run starts from the registered definitions, so the same
/// property can be iterated any number of times. Registry changes need `&mut self` and therefore
/// cannot overlap a live run.
#[derive(Clone, Default)]
pub struct AnimatedProperty {
    nodes: Vec<PropertyNode>,
    terminators: Vec<Terminator>,
    frame_data: Option<FrameDataHook>,
}

impl AnimatedProperty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a child property, detecting its kind from the seed.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        seed: impl Into<Seed>,
    ) -> SceneframeResult<()> {
        self.register_with(name, seed, RegisterOpts::default())
    }

    pub fn register_with(
        &mut self,
        name: impl Into<String>,
        seed: impl Into<Seed>,
        opts: RegisterOpts,
    ) -> SceneframeResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SceneframeError::registry(format!(
                "Child property [{name}] is already registered"
            )));
        }
        let node = PropertyNode::build(name, seed.into(), opts)?;
        self.nodes.push(node);
        Ok(())
    }

    /// Register a dynamic property recomputed from the previous frame by `updater`.
    pub fn dynamic_property<F>(
        &mut self,
        name: impl Into<String>,
        initial: impl Into<Value>,
        updater: F,
    ) -> SceneframeResult<()>
    where
        F: Fn(&PropertyFrame) -> SceneframeResult<Value> + 'static,
    {
        self.register_with(
            name,
            Seed::Value(initial.into()),
            RegisterOpts::new().updater(updater),
        )
    }

    /// Extend an animated or iterated property; the existing seed runs to exhaustion first.
    ///
    /// Only runs started after this call see the extension.
    pub fn append(&mut self, name: &str, extra: impl Into<Seed>) -> SceneframeResult<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.name() == name)
            .ok_or_else(|| {
                SceneframeError::registry(format!(
                    "Cannot append to non-existing child property [{name}]"
                ))
            })?;
        node.append(extra.into())
    }

    pub fn remove(&mut self, name: &str) -> SceneframeResult<PropertyNode> {
        let idx = self.index_of(name).ok_or_else(|| {
            SceneframeError::registry(format!(
                "Failed to remove child property [{name}] because it is not registered"
            ))
        })?;
        Ok(self.nodes.remove(idx))
    }

    /// Add a predicate that ends the run at the first frame it returns `true` for; that frame is
    /// not yielded. Terminators run in registration order.
    pub fn register_terminator<F>(&mut self, terminator: F)
    where
        F: Fn(&PropertyFrame) -> bool + 'static,
    {
        self.terminators.push(Rc::new(terminator));
    }

    /// End runs after `max_frame` frames.
    pub fn terminate_at(&mut self, max_frame: u64) {
        self.register_terminator(move |pf| pf.frame_num() >= max_frame);
    }

    /// Replace the default frame-data extraction for frames of this property.
    pub fn set_frame_data<F>(&mut self, hook: F)
    where
        F: Fn(&PropertyFrame) -> SceneframeResult<serde_json::Value> + 'static,
    {
        self.frame_data = Some(Rc::new(hook));
    }

    pub fn with_frame_data<F>(mut self, hook: F) -> Self
    where
        F: Fn(&PropertyFrame) -> SceneframeResult<serde_json::Value> + 'static,
    {
        self.set_frame_data(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn node(&self, name: &str) -> Option<&PropertyNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    pub fn node_at(&self, index: usize) -> Option<&PropertyNode> {
        self.nodes.get(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(PropertyNode::name)
    }

    pub fn terminator_count(&self) -> usize {
        self.terminators.len()
    }

    /// Start a fresh run.
    pub fn run(&self) -> PropertyRun<'_> {
        PropertyRun::new(self)
    }

    pub(crate) fn nodes(&self) -> &[PropertyNode] {
        &self.nodes
    }

    pub(crate) fn terminators(&self) -> &[Terminator] {
        &self.terminators
    }

    pub(crate) fn frame_data_hook(&self) -> Option<&FrameDataHook> {
        self.frame_data.as_ref()
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name() == name)
    }
}

impl<'a> IntoIterator for &'a AnimatedProperty {
    type Item = SceneframeResult<PropertyFrame>;
    type IntoIter = PropertyRun<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.run()
    }
}

impl fmt::Debug for AnimatedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedProperty")
            .field("nodes", &self.nodes)
            .field("terminators", &self.terminators.len())
            .field("custom_frame_data", &self.frame_data.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/property/animated.rs"]
mod tests;
