//! Error types for the widget layer and the peer boundary.

use cairn_core::ComponentError;
use thiserror::Error;

/// Errors surfaced by widgets, surfaces, windows, and peers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// An operation was invoked out of lifecycle order, e.g. creating a
    /// peer that already exists or asking an unattached widget for its
    /// renderer.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The underlying toolkit cannot provide the requested capability.
    /// The associated state change is not applied.
    #[error("unsupported capability: {0}")]
    Unsupported(&'static str),

    /// A component-registry operation failed.
    #[error(transparent)]
    Component(#[from] ComponentError),
}

/// Result type for widget-layer operations.
pub type UiResult<T> = std::result::Result<T, UiError>;
