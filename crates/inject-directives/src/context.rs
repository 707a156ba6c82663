//! Per-occurrence context handed to directive handlers.

use crate::DirectiveSyntax;

/// Where and how a directive occurrence was written.
///
/// Handlers that only look at their argument can ignore it; it exists so a
/// handler can produce location-aware output or errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveContext<'a> {
    /// Directive name as written in the document.
    pub name: &'a str,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Syntax form of the invocation.
    pub syntax: DirectiveSyntax,
    /// Full invocation text, e.g. `injectImage(a.png)`.
    pub source: &'a str,
}
