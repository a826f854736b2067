/// Convenience result type used across sceneframe.
pub type SceneframeResult<T> = Result<T, SceneframeError>;

/// Top-level error taxonomy used by engine and driver APIs.
///
/// Ordinary end of a frame stream is never an error; it is reported as `Ok(None)` by
/// [`crate::PropertyRun::next_frame`].
#[derive(thiserror::Error, Debug)]
pub enum SceneframeError {
    /// Invalid property registration, append or removal.
    #[error("registry error: {0}")]
    Registry(String),

    /// Errors raised while advancing a run or recomputing dynamic values.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Invalid user-provided configuration or helper parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneframeError {
    /// Build a [`SceneframeError::Registry`] value.
    pub fn registry(msg: impl Into<String>) -> Self {
        Self::Registry(msg.into())
    }

    /// Build a [`SceneframeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`SceneframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
