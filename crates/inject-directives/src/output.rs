//! Directive output types.

/// Successful result of a directive handler.
///
/// - [`Html`](Self::Html): fragment substituted for the invocation
/// - [`Skip`](Self::Skip): the handler declines and the invocation stays verbatim
///
/// # Example
///
/// ```
/// use inject_directives::DirectiveOutput;
///
/// let output = DirectiveOutput::html("<kbd>Ctrl+C</kbd>");
/// assert!(matches!(output, DirectiveOutput::Html(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML that replaces the directive and passes through the markdown renderer.
    Html(String),
    /// Leave the directive text unchanged.
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }
}
