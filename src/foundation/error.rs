/// Convenience result type used across Lyricframe.
pub type LyricframeResult<T> = Result<T, LyricframeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// The per-frame path never returns these: missing images, gaps in the
/// timeline, and malformed entries all degrade to skipped layers. Errors
/// surface only from construction-time APIs (session/sequence setup, asset
/// decoding).
#[derive(thiserror::Error, Debug)]
pub enum LyricframeError {
    /// Invalid user-provided or session data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating timeline or frame state.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LyricframeError {
    /// Build a [`LyricframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LyricframeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`LyricframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
