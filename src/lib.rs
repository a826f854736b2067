//! sceneframe generates per-frame scene documents for offline renderers.
//!
//! The heart of the crate is [`AnimatedProperty`]: an ordered registry of named child
//! properties that, when iterated, yields one immutable [`PropertyFrame`] per tick.
//!
//! # Property kinds
//!
//! - **Static**: a constant [`Value`].
//! - **Dynamic**: a value recomputed after each yielded frame by an updater that sees the whole
//!   previous frame.
//! - **Animated**: a nested [`AnimatedProperty`]; its entry is the nested frame.
//! - **Iterated**: values pulled from a [`Sequence`].
//!
//! Animated and iterated properties run out eventually (or not); what happens then is their
//! [`EndAction`]. Terminators registered on a property end the whole run before a frame is
//! released.
//!
//! # Layers
//!
//! 1. **Engine** (`AnimatedProperty`, `PropertyRun`, `PropertyFrame`): domain-agnostic.
//! 2. **Helpers** ([`Lerp`], [`LerpPoint`], [`Accelerated`], [`BouncingPoint`]): built only on the
//!    engine's public API.
//! 3. **Scenes** ([`build_scene`]): shape frames into renderer documents via frame-data hooks.
//! 4. **Output** ([`render_scene`], [`JsonDirSink`]): persist one JSON document per frame.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod output;
mod property;
mod scene;

pub use animation::accel::Accelerated;
pub use animation::bounce::BouncingPoint;
pub use animation::lerp::{Lerp, LerpPoint};
pub use foundation::core::Point3;
pub use foundation::error::{SceneframeError, SceneframeResult};
pub use foundation::value::Value;
pub use output::sink::{FrameSink, InMemorySink, JsonDirSink, frame_file_name, render_scene};
pub use property::animated::AnimatedProperty;
pub use property::frame::{FrameDataHook, FrameEntry, PropertyFrame};
pub use property::node::{
    EndAction, PropertyKind, PropertyNode, RegisterOpts, Seed, Terminator, Updater,
};
pub use property::run::PropertyRun;
pub use property::sequence::Sequence;
pub use scene::config::SceneConfig;
pub use scene::registry::{SCENE_NAMES, build_scene};
