//! Error types for the sectioned adapter.
//!
//! Only contract violations are errors. A position that falls outside the
//! list is an ordinary miss and is reported as `None` by the lookup methods.

/// Result type alias for sectioned adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations reported by a [`SectionedAdapter`](crate::SectionedAdapter).
///
/// Every variant means the host is misusing the adapter (a stale kind table,
/// binding past the end of the list, editing a section slot that does not
/// exist). They are logged at `error` level before being returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An item kind that does not name a section.
    #[error("item kind {kind} is not a section index (section count: {section_count})")]
    InvalidKind { kind: usize, section_count: usize },

    /// No section claims the global position.
    #[error("no section claims position {position} (total item count: {item_count})")]
    UnresolvedPosition { position: usize, item_count: usize },

    /// A structural edit addressed a section slot that does not exist.
    #[error("section index {index} is out of bounds (section count: {section_count})")]
    SectionOutOfBounds { index: usize, section_count: usize },
}

impl Error {
    /// Create an invalid kind error.
    pub fn invalid_kind(kind: usize, section_count: usize) -> Self {
        Self::InvalidKind {
            kind,
            section_count,
        }
    }

    /// Create an unresolved position error.
    pub fn unresolved_position(position: usize, item_count: usize) -> Self {
        Self::UnresolvedPosition {
            position,
            item_count,
        }
    }

    /// Create a section bounds error.
    pub fn section_out_of_bounds(index: usize, section_count: usize) -> Self {
        Self::SectionOutOfBounds {
            index,
            section_count,
        }
    }
}
