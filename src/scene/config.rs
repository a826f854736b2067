use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{SceneframeError, SceneframeResult};
use crate::property::animated::AnimatedProperty;
use crate::scene::registry::build_scene;

/// Scene selection read from a JSON file: `{"scene": "<name>", "params": {...}}`.
///
/// `params` may be omitted; each scene documents its own parameters and their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    pub scene: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl SceneConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneframeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SceneframeError::validation(format!("parse scene config JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> SceneframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneframeError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Look up the named scene and build it from `params`.
    pub fn build(&self) -> SceneframeResult<AnimatedProperty> {
        build_scene(&self.scene, &self.params)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
