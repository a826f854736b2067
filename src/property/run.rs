use std::fmt;
use std::iter::FusedIterator;

use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::foundation::value::Value;
use crate::property::animated::AnimatedProperty;
use crate::property::frame::{FrameEntry, PropertyFrame};
use crate::property::node::{EndAction, NodeSeed, PropertyNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    Active,
    Dropped,
    Kept,
    EndValue,
}

/// Runs nested animated properties back to back (more than one after `append`).
struct NestedCursor<'a> {
    segments: &'a [AnimatedProperty],
    next_segment: usize,
    current: Option<Box<PropertyRun<'a>>>,
}

impl<'a> NestedCursor<'a> {
    fn pull(&mut self) -> SceneframeResult<Option<PropertyFrame>> {
        loop {
            if let Some(run) = self.current.as_mut() {
                if let Some(frame) = run.next_frame()? {
                    return Ok(Some(frame));
                }
                self.current = None;
            }
            let Some(segment) = self.segments.get(self.next_segment) else {
                return Ok(None);
            };
            self.next_segment += 1;
            self.current = Some(Box::new(segment.run()));
        }
    }
}

enum Cursor<'a> {
    Fixed,
    Iterated(Box<dyn Iterator<Item = Value> + 'a>),
    Animated(NestedCursor<'a>),
}

struct Slot<'a> {
    node: &'a PropertyNode,
    cursor: Cursor<'a>,
    entry: Option<FrameEntry>,
    state: SlotState,
}

impl<'a> Slot<'a> {
    fn new(node: &'a PropertyNode) -> Self {
        let (cursor, entry) = match node.seed() {
            NodeSeed::Value(v) => (Cursor::Fixed, Some(FrameEntry::Value(v.clone()))),
            NodeSeed::Iterated(seq) => (Cursor::Iterated(seq.iter()), None),
            NodeSeed::Animated(segments) => (
                Cursor::Animated(NestedCursor {
                    segments,
                    next_segment: 0,
                    current: None,
                }),
                None,
            ),
        };
        Self {
            node,
            cursor,
            entry,
            state: SlotState::Active,
        }
    }

    fn pull(&mut self) -> SceneframeResult<Option<FrameEntry>> {
        match &mut self.cursor {
            Cursor::Fixed => Ok(self.entry.clone()),
            Cursor::Iterated(iter) => Ok(iter.next().map(FrameEntry::Value)),
            Cursor::Animated(nested) => Ok(nested.pull()?.map(FrameEntry::Frame)),
        }
    }
}

/// A single pass over an [`AnimatedProperty`].
///
/// Each call to [`PropertyRun::next_frame`] performs one tick:
///
/// 1. recompute dynamic properties from the previously yielded frame (if any),
/// 2. advance animated/iterated properties, applying end actions on exhaustion,
/// 3. build the frame,
/// 4. evaluate terminators; the first `true` ends the run without yielding the frame.
///
/// Once the run has ended (normally or with an error) it keeps returning `Ok(None)`.
pub struct PropertyRun<'a> {
    owner: &'a AnimatedProperty,
    slots: Vec<Slot<'a>>,
    frame_num: u64,
    previous: Option<PropertyFrame>,
    finished: bool,
}

impl<'a> PropertyRun<'a> {
    pub(crate) fn new(owner: &'a AnimatedProperty) -> Self {
        tracing::trace!(properties = owner.len(), "starting property run");
        Self {
            owner,
            slots: owner.nodes().iter().map(Slot::new).collect(),
            frame_num: 0,
            previous: None,
            finished: false,
        }
    }

    /// Pull the next frame. `Ok(None)` marks the ordinary end of the run.
    pub fn next_frame(&mut self) -> SceneframeResult<Option<PropertyFrame>> {
        if self.finished {
            return Ok(None);
        }
        let result = self.tick();
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
            self.previous = None;
        }
        result
    }

    /// Number of frames yielded so far.
    pub fn frames_produced(&self) -> u64 {
        self.frame_num
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn tick(&mut self) -> SceneframeResult<Option<PropertyFrame>> {
        if let Some(previous) = self.previous.take() {
            self.update_dynamic(&previous)?;
        }

        if !self.advance()? {
            return Ok(None);
        }

        let frame = self.snapshot();
        if let Some(idx) = self.owner.terminators().iter().position(|t| t(&frame)) {
            tracing::debug!(
                frame = frame.frame_num(),
                terminator = idx,
                "terminator ended run"
            );
            return Ok(None);
        }

        self.frame_num += 1;
        self.previous = Some(frame.clone());
        Ok(Some(frame))
    }

    fn update_dynamic(&mut self, previous: &PropertyFrame) -> SceneframeResult<()> {
        for slot in &mut self.slots {
            let Some(update) = slot.node.updater() else {
                continue;
            };
            let value = update(previous).map_err(|e| {
                SceneframeError::evaluation(format!(
                    "updating dynamic property [{}] from frame {}: {e}",
                    slot.node.name(),
                    previous.frame_num()
                ))
            })?;
            slot.entry = Some(FrameEntry::Value(value));
        }
        Ok(())
    }

    /// Returns `false` when a property with [`EndAction::Terminate`] ran out.
    fn advance(&mut self) -> SceneframeResult<bool> {
        for slot in &mut self.slots {
            if slot.state != SlotState::Active || !slot.node.kind().is_sequenced() {
                continue;
            }
            if let Some(entry) = slot.pull()? {
                slot.entry = Some(entry);
                continue;
            }

            let name = slot.node.name();
            match slot.node.end_action() {
                EndAction::Terminate => {
                    tracing::debug!(
                        property = name,
                        frame = self.frame_num,
                        "property exhausted, ending run"
                    );
                    return Ok(false);
                }
                EndAction::Drop => {
                    tracing::debug!(
                        property = name,
                        frame = self.frame_num,
                        "property exhausted, dropped"
                    );
                    slot.state = SlotState::Dropped;
                    slot.entry = None;
                }
                EndAction::Keep => {
                    tracing::debug!(
                        property = name,
                        frame = self.frame_num,
                        "property exhausted, keeping last value"
                    );
                    slot.state = SlotState::Kept;
                    slot.entry.get_or_insert(FrameEntry::Value(Value::Null));
                }
                EndAction::EndValue(v) => {
                    tracing::debug!(
                        property = name,
                        frame = self.frame_num,
                        "property exhausted, using end value"
                    );
                    slot.state = SlotState::EndValue;
                    slot.entry = Some(FrameEntry::Value(v.clone()));
                }
            }
        }
        Ok(true)
    }

    fn snapshot(&self) -> PropertyFrame {
        let props = self
            .slots
            .iter()
            .filter(|slot| slot.state != SlotState::Dropped)
            .map(|slot| {
                let entry = slot
                    .entry
                    .clone()
                    .unwrap_or(FrameEntry::Value(Value::Null));
                (slot.node.name().to_string(), entry)
            })
            .collect();
        PropertyFrame::new(
            self.frame_num,
            props,
            self.owner.frame_data_hook().cloned(),
        )
    }
}

impl Iterator for PropertyRun<'_> {
    type Item = SceneframeResult<PropertyFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

impl FusedIterator for PropertyRun<'_> {}

impl fmt::Debug for PropertyRun<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyRun")
            .field("properties", &self.slots.len())
            .field("frames_produced", &self.frame_num)
            .field("finished", &self.finished)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/property/run.rs"]
mod tests;
