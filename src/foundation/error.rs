/// Crate-wide result alias.
pub type SchotterResult<T> = Result<T, SchotterError>;

/// Top-level error type used by the schotter public API.
///
/// Every variant is fatal: a render never recovers from or retries any of them.
#[derive(thiserror::Error, Debug)]
pub enum SchotterError {
    /// A colour source was not a well-formed 6-digit hex triplet.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// A gradient table was built from zero keypoints.
    #[error("empty gradient table: at least one keypoint is required")]
    EmptyTable,

    /// A theme name was not present in the registry.
    #[error("unknown theme: '{0}'")]
    UnknownTheme(String),

    /// A render configuration violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// The signature font could not be read or parsed.
    #[error("font load failure: {0}")]
    FontLoad(String),

    /// PNG encoding or writing the output file failed.
    #[error("image write failure: {0}")]
    ImageWrite(String),

    /// Passthrough wrapper for contextualized errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SchotterError {
    /// Build [`SchotterError::InvalidColorFormat`].
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColorFormat(msg.into())
    }

    /// Build [`SchotterError::UnknownTheme`].
    pub fn unknown_theme(name: impl Into<String>) -> Self {
        Self::UnknownTheme(name.into())
    }

    /// Build [`SchotterError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`SchotterError::FontLoad`].
    pub fn font_load(msg: impl Into<String>) -> Self {
        Self::FontLoad(msg.into())
    }

    /// Build [`SchotterError::ImageWrite`].
    pub fn image_write(msg: impl Into<String>) -> Self {
        Self::ImageWrite(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
