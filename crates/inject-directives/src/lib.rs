//! Inline directive injection for markdown documents.
//!
//! This crate sits between a markdown source document and its rendered HTML.
//! It recognises custom inline directives, replaces each one with the HTML
//! fragment produced by its registered handler, and hands the result to an
//! underlying [`MarkdownRender`] implementation.
//!
//! # Architecture
//!
//! - [`DirectiveTable`]: name → handler lookup, built once at startup.
//! - [`Injector`]: owns the frozen table and lazily binds a renderer into a
//!   [`RenderHook`]. The binding happens at most once per injector; later
//!   requests get the same hook back.
//! - [`RenderHook`]: expands directives and renders. Read-only and shareable
//!   across threads.
//!
//! # Directive Syntax
//!
//! - **Call** form: `name(argument)`
//! - **Embed** form: `{@name: argument}`
//!
//! Invocations of names that are not registered are left verbatim. Directives
//! inside fenced code blocks and inline code spans are never expanded.
//!
//! # Example
//!
//! ```
//! use inject_directives::{DirectiveTable, ImageDirective, InjectOptions, Injector};
//! use inject_markdown::CmarkRenderer;
//!
//! let mut table = DirectiveTable::new();
//! table
//!     .register(ImageDirective::new("injectImage", "https://assets.example.com"))
//!     .unwrap();
//!
//! let injector = Injector::new(table);
//! let hook = injector.create_hook(CmarkRenderer::new(), InjectOptions::default());
//!
//! let html = hook.render_str("# Title\n\ninjectImage(diagrams/arch.png)\n");
//! assert!(html.contains("<h1>Title</h1>"));
//! assert!(html.contains(r#"<img src="https://assets.example.com/diagrams/arch.png" alt="image"/>"#));
//! ```

mod builtin;
mod context;
mod directive;
mod error;
mod expand;
mod fence;
mod injector;
mod options;
mod output;
mod parser;
mod table;

pub use builtin::{ImageDirective, TemplateDirective};
pub use context::DirectiveContext;
pub use directive::{Directive, FnDirective};
pub use error::{DirectiveError, InjectError, RegistrationError};
pub use expand::Expansion;
pub use injector::{Injector, RenderHook, RenderOutput, RenderRequest};
pub use options::{DirectiveSyntax, FailurePolicy, InjectOptions, SyntaxSet};
pub use output::DirectiveOutput;
pub use table::DirectiveTable;

pub use inject_markdown::MarkdownRender;
