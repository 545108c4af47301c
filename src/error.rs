//! Errors returned by element renderers.

use watercard_core::StatusCode;

/// Failure reported by an [`ElementRenderer`](crate::ElementRenderer).
///
/// [`RenderError::Element`] is recoverable: the tree builder records it and
/// drops the element's subtree. [`RenderError::Unexpected`] aborts the whole
/// render.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The element could not be rendered.
    #[error("{message}")]
    Element {
        /// Status code recorded for the failure.
        code: StatusCode,
        /// Human-readable description.
        message: String,
    },
    /// An unanticipated fault; nothing of the render is kept.
    #[error("unexpected render failure: {0}")]
    Unexpected(String),
}

impl RenderError {
    /// Creates a recoverable failure.
    pub fn element(code: StatusCode, message: impl Into<String>) -> Self {
        Self::Element {
            code,
            message: message.into(),
        }
    }

    /// Creates a recoverable [`StatusCode::RequiredPropertyMissing`] failure.
    #[must_use]
    pub fn missing_property(type_id: &str, property: &str) -> Self {
        Self::element(
            StatusCode::RequiredPropertyMissing,
            format!("{type_id} is missing required property '{property}'"),
        )
    }

    /// Creates a fatal failure.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Returns `true` for failures that abort the render.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Unexpected(_))
    }
}
