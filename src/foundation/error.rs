/// Convenience result type used across the crate.
pub type SankeyResult<T> = Result<T, SankeyError>;

/// Top-level error taxonomy used by the visualization APIs.
#[derive(thiserror::Error, Debug)]
pub enum SankeyError {
    /// Malformed or missing input data. Fatal at construction.
    #[error("validation error: {0}")]
    Validation(String),

    /// A navigation request that cannot be honoured.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Errors while projecting or rasterizing a scene.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while streaming frames to the video encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SankeyError {
    /// Build a [`SankeyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SankeyError::Navigation`] value.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`SankeyError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SankeyError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SankeyError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SankeyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
