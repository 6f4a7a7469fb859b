/// Convenience result type used across the designer engine.
pub type DesignerResult<T> = Result<T, DesignerError>;

/// Top-level error taxonomy used by engine APIs.
///
/// An error always means nothing was produced: compositing and encoding never hand back partial
/// output alongside a failure.
#[derive(thiserror::Error, Debug)]
pub enum DesignerError {
    /// An image could not be fetched or decoded. Fails the whole render.
    #[error("asset load error: '{url}': {reason}")]
    AssetLoad {
        /// Location of the failing asset.
        url: String,
        /// Underlying cause, rendered as text.
        reason: String,
    },

    /// Integration error: no active model, missing target, inconsistent configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A requested export backend is not compiled in or not available.
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// A model name that is not part of the active model catalog.
    #[error("model not found: '{0}'")]
    ModelNotFound(String),

    /// Another export or save is already in flight.
    #[error("busy: {0}")]
    Busy(String),

    /// Invalid user-provided or design data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing design documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DesignerError {
    /// Build a [`DesignerError::AssetLoad`] value.
    pub fn asset_load(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoad {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`DesignerError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`DesignerError::CapabilityUnavailable`] value.
    pub fn capability_unavailable(msg: impl Into<String>) -> Self {
        Self::CapabilityUnavailable(msg.into())
    }

    /// Build a [`DesignerError::ModelNotFound`] value.
    pub fn model_not_found(name: impl Into<String>) -> Self {
        Self::ModelNotFound(name.into())
    }

    /// Build a [`DesignerError::Busy`] value.
    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    /// Build a [`DesignerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DesignerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// URL of the failing asset, for [`DesignerError::AssetLoad`].
    pub fn failing_url(&self) -> Option<&str> {
        match self {
            Self::AssetLoad { url, .. } => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
