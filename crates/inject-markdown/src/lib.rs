//! Markdown rendering backend used underneath directive injection.
//!
//! This crate defines the [`MarkdownRender`] collaborator contract: something
//! that turns markdown text into HTML. The directive layer only needs this one
//! entry point and never looks at the markdown grammar itself.
//!
//! [`CmarkRenderer`] is the stock implementation backed by pulldown-cmark.
//! Raw HTML passes through unchanged, so fragments injected before rendering
//! survive into the output.
//!
//! # Example
//!
//! ```
//! use inject_markdown::{CmarkOptions, CmarkRenderer, MarkdownRender};
//!
//! let renderer = CmarkRenderer::new();
//! let html = renderer.render("# Hello\n\n**Bold** text", &CmarkOptions::default());
//! assert!(html.contains("<h1>Hello</h1>"));
//! ```

mod render;
mod util;

pub use render::{CmarkOptions, CmarkRenderer, MarkdownRender};
pub use util::escape_html;
