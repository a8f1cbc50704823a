//! Editing errors

use fos_dom::DomError;

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;

/// Editing operation errors
///
/// Every operation validates before it mutates, so an error means the tree
/// is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// An argument that must name a structural node does not
    #[error("{operation}: {role} is not a valid node handle")]
    InvalidNode {
        operation: &'static str,
        role: &'static str,
    },

    /// The operation needs a parent/sibling relationship the node lacks
    #[error("{operation}: {role} has no parent container")]
    DetachedReference {
        operation: &'static str,
        role: &'static str,
    },

    /// Position string is not one of the four recognized values
    #[error(
        "unsupported position {0:?}: expected one of \
         beforebegin, afterbegin, beforeend, afterend"
    )]
    UnsupportedPosition(String),

    /// Structural edit rejected by the tree
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl EditError {
    pub(crate) fn invalid(operation: &'static str, role: &'static str) -> Self {
        Self::InvalidNode { operation, role }
    }

    pub(crate) fn detached(operation: &'static str, role: &'static str) -> Self {
        Self::DetachedReference { operation, role }
    }
}
