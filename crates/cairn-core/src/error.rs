//! Error types for the core component and dispatch systems.

use std::fmt;

/// Errors that can occur during component-registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The component ID is invalid or the component has been destroyed.
    InvalidComponentId,
    /// Attempted to set a component as its own parent or ancestor.
    CircularParentage,
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidComponentId => write!(f, "Invalid or destroyed component ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set a component as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for ComponentError {}

/// Result type for component-registry operations.
pub type ComponentResult<T> = std::result::Result<T, ComponentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ComponentError::InvalidComponentId.to_string(),
            "Invalid or destroyed component ID"
        );
        assert!(ComponentError::CircularParentage.to_string().contains("ancestor"));
    }
}
