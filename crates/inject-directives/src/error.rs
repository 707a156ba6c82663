//! Error types for directive registration, expansion and rendering.

/// Error raised while building a [`DirectiveTable`](crate::DirectiveTable).
///
/// These are startup errors: a broken table affects every document, so
/// callers should fail fast instead of rendering with a partial table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Name is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error(
        "Invalid directive name {0:?}: expected a letter or '_' followed by letters, digits, '_' or '-'"
    )]
    InvalidName(String),
    /// Another handler is already registered under this name.
    #[error("Directive `{0}` is already registered")]
    Duplicate(String),
    /// Handler configuration is unusable.
    #[error("Invalid handler for directive `{name}`: {reason}")]
    InvalidHandler {
        /// Directive name.
        name: String,
        /// What is wrong with the handler.
        reason: String,
    },
}

/// Error returned by a directive handler for a single occurrence.
///
/// Never aborts a render: the failing occurrence is replaced according to
/// [`FailurePolicy`](crate::FailurePolicy) and the rest of the document is
/// still expanded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// The argument cannot be handled by this directive.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Any other handler failure.
    #[error("{0}")]
    Failed(String),
    /// The handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl DirectiveError {
    /// Create an [`InvalidArgument`](Self::InvalidArgument) error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Create a [`Failed`](Self::Failed) error.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Error returned by [`Injector`](crate::Injector) operations.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    /// `render` was called before `create_hook` bound a renderer.
    #[error("Directive hook has not been created yet; call create_hook first")]
    NotInitialized,
}
