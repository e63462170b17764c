//! Error types for Gossamer.

use std::fmt;

/// The main error type for toolkit operations.
///
/// Most of the toolkit is deliberately infallible: unresolved geometry,
/// absent handlers and missing optional textures are silent, retryable
/// states, not errors. Only hierarchy edits that would corrupt the tree
/// surface a `UiError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// The region ID is invalid or the region has been removed.
    InvalidRegionId,
    /// Attempted to parent a region to itself or to one of its descendants.
    CircularParentage,
    /// The operation requires a frame but the region is a layered region.
    NotAFrame,
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegionId => write!(f, "Invalid or removed region ID"),
            Self::CircularParentage => {
                write!(f, "Cannot parent a region to itself or its descendant")
            }
            Self::NotAFrame => write!(f, "Operation requires a frame"),
        }
    }
}

impl std::error::Error for UiError {}

/// A specialized Result type for toolkit operations.
pub type UiResult<T> = std::result::Result<T, UiError>;
