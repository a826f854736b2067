use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::SceneframeResult;
use crate::property::animated::AnimatedProperty;

/// Sink contract for consuming frame documents in run order.
///
/// Ordering contract: `push_frame` is called with strictly increasing, gap-free indices starting
/// at 0, between one `begin` and one `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self) -> SceneframeResult<()>;
    /// Push the document of frame `idx`.
    fn push_frame(&mut self, idx: u64, doc: &serde_json::Value) -> SceneframeResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SceneframeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<(u64, serde_json::Value)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured documents.
    pub fn frames(&self) -> &[(u64, serde_json::Value)] {
        &self.frames
    }

    /// Whether `end` was called after the last `begin`.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self) -> SceneframeResult<()> {
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, doc: &serde_json::Value) -> SceneframeResult<()> {
        self.frames.push((idx, doc.clone()));
        Ok(())
    }

    fn end(&mut self) -> SceneframeResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// File name of frame `idx`: zero-padded to four digits, e.g. `0042.json`.
pub fn frame_file_name(idx: u64) -> String {
    format!("{idx:04}.json")
}

/// Whether `name` has the shape produced by [`frame_file_name`].
fn is_frame_file_name(name: &str) -> bool {
    name.strip_suffix(".json")
        .is_some_and(|stem| stem.len() >= 4 && stem.bytes().all(|b| b.is_ascii_digit()))
}

/// Writes each frame document to `<dir>/NNNN.json`, creating `dir` on `begin`.
#[derive(Debug, Clone)]
pub struct JsonDirSink {
    dir: PathBuf,
    pretty: bool,
    written: u64,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: false,
            written: 0,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written since the last `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for JsonDirSink {
    /// Creates the directory and removes frame files left by an earlier render. Other files are
    /// left alone.
    fn begin(&mut self) -> SceneframeResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;

        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("list output dir '{}'", self.dir.display()))?;
        let mut removed = 0u64;
        for entry in entries {
            let path = entry
                .with_context(|| format!("list output dir '{}'", self.dir.display()))?
                .path();
            let stale = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_frame_file_name);
            if stale && path.is_file() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("remove stale frame file '{}'", path.display()))?;
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(dir = %self.dir.display(), removed, "removed stale frame files");
        }

        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, doc: &serde_json::Value) -> SceneframeResult<()> {
        let path = self.dir.join(frame_file_name(idx));
        let f = File::create(&path)
            .with_context(|| format!("create frame file '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        if self.pretty {
            serde_json::to_writer_pretty(&mut w, doc)?;
        } else {
            serde_json::to_writer(&mut w, doc)?;
        }
        w.flush()
            .with_context(|| format!("write frame file '{}'", path.display()))?;

        self.written += 1;
        tracing::info!(frame = idx, path = %path.display(), "wrote frame data");
        Ok(())
    }

    fn end(&mut self) -> SceneframeResult<()> {
        tracing::debug!(
            dir = %self.dir.display(),
            frames = self.written,
            "finished writing frames"
        );
        Ok(())
    }
}

/// Run `scene` to its end (or `max_frames`) and push every frame document into `sink`.
///
/// Returns the number of frames pushed. A failing frame aborts the render after the frames
/// already pushed; `end` is only called on success.
#[tracing::instrument(skip(scene, sink))]
pub fn render_scene(
    scene: &AnimatedProperty,
    sink: &mut dyn FrameSink,
    max_frames: Option<u64>,
) -> SceneframeResult<u64> {
    sink.begin()?;
    let mut run = scene.run();
    let mut pushed = 0u64;
    while max_frames.is_none_or(|max| pushed < max) {
        let Some(frame) = run.next_frame()? else {
            break;
        };
        let doc = frame.frame_data()?;
        sink.push_frame(frame.frame_num(), &doc)?;
        pushed += 1;
    }
    sink.end()?;
    tracing::debug!(frames = pushed, "scene rendered");
    Ok(pushed)
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
