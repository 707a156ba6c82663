//! Directive handler trait.

use crate::{DirectiveContext, DirectiveError, DirectiveOutput};

/// Handler for one named directive.
///
/// A handler receives the raw argument text, unescaped, and owns escaping of
/// anything it embeds into the returned HTML.
///
/// # Thread Safety
///
/// Handlers are `Send + Sync`: one [`DirectiveTable`](crate::DirectiveTable)
/// is shared by every document, including documents rendered in parallel.
/// Keep handlers free of interior mutability that depends on render order.
///
/// # Example
///
/// ```
/// use inject_directives::{Directive, DirectiveContext, DirectiveError, DirectiveOutput};
///
/// struct KbdDirective;
///
/// impl Directive for KbdDirective {
///     fn name(&self) -> &str { "kbd" }
///
///     fn expand(&self, arg: &str, _ctx: &DirectiveContext<'_>) -> Result<DirectiveOutput, DirectiveError> {
///         Ok(DirectiveOutput::html(format!("<kbd>{}</kbd>", inject_markdown::escape_html(arg))))
///     }
/// }
/// ```
pub trait Directive: Send + Sync {
    /// Directive name matched against `name(...)` and `{@name: ...}`.
    fn name(&self) -> &str;

    /// Expand one occurrence.
    ///
    /// Return [`DirectiveOutput::Skip`] to leave the occurrence verbatim, or an
    /// error to have it replaced by the configured failure placeholder.
    fn expand(
        &self,
        arg: &str,
        ctx: &DirectiveContext<'_>,
    ) -> Result<DirectiveOutput, DirectiveError>;
}

/// Directive backed by a plain function of its argument.
///
/// Created by [`DirectiveTable::register_fn`](crate::DirectiveTable::register_fn).
pub struct FnDirective<F> {
    name: String,
    handler: F,
}

impl<F> FnDirective<F>
where
    F: Fn(&str) -> Result<String, DirectiveError> + Send + Sync,
{
    /// Wrap a function as a named directive.
    #[must_use]
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> Directive for FnDirective<F>
where
    F: Fn(&str) -> Result<String, DirectiveError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn expand(
        &self,
        arg: &str,
        _ctx: &DirectiveContext<'_>,
    ) -> Result<DirectiveOutput, DirectiveError> {
        (self.handler)(arg).map(DirectiveOutput::Html)
    }
}
