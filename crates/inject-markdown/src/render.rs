//! Markdown renderer contract and the pulldown-cmark backend.

use pulldown_cmark::{Options, Parser, html};

/// Renders markdown text to HTML.
///
/// Implementors are shared across worker threads when documents are rendered
/// in parallel, hence the `Send + Sync` bound.
///
/// `Options` is renderer-specific configuration. Callers above this layer treat
/// it as opaque and hand it back untouched on every call.
pub trait MarkdownRender: Send + Sync {
    /// Per-render configuration.
    type Options: Default + Send + Sync;

    /// Render markdown text to an HTML fragment.
    fn render(&self, markdown: &str, options: &Self::Options) -> String;
}

/// Options for [`CmarkRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CmarkOptions {
    /// Enable GitHub Flavored Markdown features.
    ///
    /// When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    pub gfm: bool,
    /// Convert straight quotes and dashes to typographic punctuation.
    pub smart_punctuation: bool,
}

impl Default for CmarkOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            smart_punctuation: false,
        }
    }
}

impl CmarkOptions {
    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable smart punctuation.
    #[must_use]
    pub fn with_smart_punctuation(mut self, enabled: bool) -> Self {
        self.smart_punctuation = enabled;
        self
    }

    /// Get pulldown-cmark parser options for this configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        };
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }
}

/// Markdown renderer backed by pulldown-cmark's HTML writer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CmarkRenderer;

impl CmarkRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Create a configured parser for the given markdown text.
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str, options: &CmarkOptions) -> Parser<'a> {
        Parser::new_ext(markdown, options.parser_options())
    }
}

impl MarkdownRender for CmarkRenderer {
    type Options = CmarkOptions;

    fn render(&self, markdown: &str, options: &CmarkOptions) -> String {
        let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut output, self.create_parser(markdown, options));
        output
    }
}
