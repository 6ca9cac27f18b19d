use thiserror::Error;

/// Failure reported by the platform when asked to move focus.
///
/// Navigation never propagates these; the navigator logs them and leaves its
/// state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
    /// The platform refused to focus the element.
    #[error("element '{0}' rejected focus")]
    Rejected(String),

    /// The element is no longer attached to the rendered tree.
    #[error("element '{0}' is detached")]
    Detached(String),

    /// Any other platform failure.
    #[error("focusing '{id}' failed: {message}")]
    Platform { id: String, message: String },
}
