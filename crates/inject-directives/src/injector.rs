//! Injector with a memoised render hook.

use std::fmt;
use std::sync::{Arc, OnceLock};

use inject_markdown::MarkdownRender;
use rayon::prelude::*;

use crate::expand::Expander;
use crate::{DirectiveTable, Expansion, InjectError, InjectOptions};

/// Markdown document to render.
#[derive(Clone, Debug)]
pub struct RenderRequest<'a, O> {
    /// Raw markdown, possibly containing directives.
    pub markdown: &'a str,
    /// Renderer options, handed to the renderer untouched.
    pub options: O,
}

impl<'a, O: Default> RenderRequest<'a, O> {
    /// Create a request with default renderer options.
    #[must_use]
    pub fn new(markdown: &'a str) -> Self {
        Self {
            markdown,
            options: O::default(),
        }
    }
}

impl<'a, O> RenderRequest<'a, O> {
    /// Set the renderer options.
    #[must_use]
    pub fn with_options(self, options: O) -> Self {
        Self {
            markdown: self.markdown,
            options,
        }
    }
}

/// Result of rendering one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOutput {
    /// Rendered HTML.
    pub html: String,
    /// Number of directive occurrences replaced by handler output.
    pub expanded: usize,
    /// Contained handler failures (e.g., invalid directive arguments).
    pub warnings: Vec<String>,
}

/// Renderer bound to a directive table.
///
/// Created by [`Injector::create_hook`]. Read-only after creation, so one hook
/// serves any number of documents from any number of threads.
pub struct RenderHook<R: MarkdownRender> {
    renderer: Arc<R>,
    expander: Expander,
}

impl<R: MarkdownRender> RenderHook<R> {
    fn new(renderer: Arc<R>, table: Arc<DirectiveTable>, options: InjectOptions) -> Self {
        Self {
            renderer,
            expander: Expander::new(table, options),
        }
    }

    /// Expand directives without rendering.
    #[must_use]
    pub fn transform<'a>(&self, markdown: &'a str) -> Expansion<'a> {
        self.expander.expand(markdown)
    }

    /// Expand directives, then render with the bound renderer.
    ///
    /// The underlying renderer is called exactly once per document.
    #[must_use]
    pub fn render(&self, request: &RenderRequest<'_, R::Options>) -> RenderOutput {
        let expansion = self.transform(request.markdown);
        tracing::debug!(
            expanded = expansion.expanded,
            failed = expansion.warnings.len(),
            "Expanded directives"
        );

        let html = self.renderer.render(&expansion.text, &request.options);

        RenderOutput {
            html,
            expanded: expansion.expanded,
            warnings: expansion.warnings,
        }
    }

    /// Render markdown with default renderer options and return only the HTML.
    #[must_use]
    pub fn render_str(&self, markdown: &str) -> String {
        self.render(&RenderRequest::new(markdown)).html
    }

    /// Render independent documents in parallel.
    ///
    /// Outputs are returned in request order.
    #[must_use]
    pub fn render_batch(&self, requests: &[RenderRequest<'_, R::Options>]) -> Vec<RenderOutput> {
        requests
            .par_iter()
            .map(|request| self.render(request))
            .collect()
    }

    /// The bound renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The directive table.
    #[must_use]
    pub fn table(&self) -> &DirectiveTable {
        self.expander.table()
    }

    /// The injection options fixed at creation.
    #[must_use]
    pub fn options(&self) -> &InjectOptions {
        self.expander.options()
    }
}

impl<R: MarkdownRender> fmt::Debug for RenderHook<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHook")
            .field("table", self.table())
            .field("options", self.options())
            .finish_non_exhaustive()
    }
}

/// Owns a directive table and binds it to a renderer exactly once.
///
/// The injector has two phases. It starts uninitialised, holding only the
/// table. The first [`create_hook`](Self::create_hook) binds the renderer and
/// caches the resulting [`RenderHook`]; every later call returns that same
/// hook and ignores its arguments. Concurrent first callers are serialised so
/// initialisation runs once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use inject_directives::{DirectiveTable, InjectOptions, Injector};
/// use inject_markdown::CmarkRenderer;
///
/// let injector = Injector::new(DirectiveTable::new());
/// let first = injector.create_hook(CmarkRenderer::new(), InjectOptions::default());
/// let second = injector.create_hook(CmarkRenderer::new(), InjectOptions::default());
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct Injector<R: MarkdownRender> {
    table: Arc<DirectiveTable>,
    hook: OnceLock<Arc<RenderHook<R>>>,
}

impl<R: MarkdownRender> Injector<R> {
    /// Create an injector. The table is frozen from here on.
    #[must_use]
    pub fn new(table: DirectiveTable) -> Self {
        Self {
            table: Arc::new(table),
            hook: OnceLock::new(),
        }
    }

    /// Bind `renderer` and return the render hook.
    ///
    /// Only the first call binds; later calls drop their arguments and return
    /// the cached hook.
    pub fn create_hook(&self, renderer: R, options: InjectOptions) -> Arc<RenderHook<R>> {
        self.create_hook_with(|| renderer, options)
    }

    /// Like [`create_hook`](Self::create_hook), but constructs the renderer
    /// only if the hook does not exist yet.
    pub fn create_hook_with<F>(
        &self,
        make_renderer: F,
        options: InjectOptions,
    ) -> Arc<RenderHook<R>>
    where
        F: FnOnce() -> R,
    {
        let hook = self.hook.get_or_init(|| {
            tracing::debug!(directives = self.table.len(), "Binding directive hook");
            Arc::new(RenderHook::new(
                Arc::new(make_renderer()),
                Arc::clone(&self.table),
                options,
            ))
        });
        Arc::clone(hook)
    }

    /// The cached hook, if [`create_hook`](Self::create_hook) has run.
    #[must_use]
    pub fn hook(&self) -> Option<Arc<RenderHook<R>>> {
        self.hook.get().map(Arc::clone)
    }

    /// Whether the hook has been created.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.hook.get().is_some()
    }

    /// Render a document through the cached hook.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::NotInitialized`] before the first
    /// [`create_hook`](Self::create_hook).
    pub fn render(
        &self,
        request: &RenderRequest<'_, R::Options>,
    ) -> Result<RenderOutput, InjectError> {
        let hook = self.hook.get().ok_or(InjectError::NotInitialized)?;
        Ok(hook.render(request))
    }

    /// The directive table.
    #[must_use]
    pub fn table(&self) -> &DirectiveTable {
        &self.table
    }
}

impl<R: MarkdownRender> fmt::Debug for Injector<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("table", &self.table)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
