/// Convenience result type used across storybar.
pub type StorybarResult<T> = Result<T, StorybarError>;

/// Top-level error taxonomy used by the timeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum StorybarError {
    /// Invalid user-provided configuration or construction arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while driving playback (renderer or script misuse).
    #[error("playback error: {0}")]
    Playback(String),

    /// Errors raised while routing host lifecycle signals.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing configs and scripts.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorybarError {
    /// Build a [`StorybarError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StorybarError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`StorybarError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`StorybarError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StorybarError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
