/// Result alias used across the crate.
pub type PosterResult<T> = Result<T, PosterError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error for poster composition.
pub enum PosterError {
    /// A precondition on caller-supplied data was violated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Rasterization or resampling failed.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding the finished raster failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// A text-to-image backend reported a failure.
    #[error("remote generation error: {0}")]
    Remote(String),

    /// Wrapped error carrying its own context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build [`PosterError::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build [`PosterError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build [`PosterError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build [`PosterError::Remote`].
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
