//! Injection options.

/// Syntax form of a single directive invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveSyntax {
    /// `name(argument)`
    Call,
    /// `{@name: argument}`
    Embed,
}

/// Which directive syntax forms the scanner recognises.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyntaxSet {
    /// Both call and embed forms.
    #[default]
    All,
    /// Only `name(argument)`.
    Call,
    /// Only `{@name: argument}`.
    Embed,
}

impl SyntaxSet {
    /// Whether the given syntax form is recognised.
    #[must_use]
    pub fn accepts(self, syntax: DirectiveSyntax) -> bool {
        match self {
            Self::All => true,
            Self::Call => syntax == DirectiveSyntax::Call,
            Self::Embed => syntax == DirectiveSyntax::Embed,
        }
    }
}

/// What replaces a directive occurrence whose handler failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// An HTML comment naming the directive and the failure.
    #[default]
    Comment,
    /// Nothing.
    Empty,
    /// The original directive text.
    Verbatim,
}

/// Options applied by a [`RenderHook`](crate::RenderHook) to every document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InjectOptions {
    /// Replacement for failed handler invocations.
    pub on_error: FailurePolicy,
    /// Recognised syntax forms.
    pub syntax: SyntaxSet,
    /// Leave fenced code blocks and inline code spans untouched.
    ///
    /// Default: `true`
    pub skip_code: bool,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl InjectOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_error: FailurePolicy::Comment,
            syntax: SyntaxSet::All,
            skip_code: true,
        }
    }

    /// Set the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Set the recognised syntax forms.
    #[must_use]
    pub fn with_syntax(mut self, syntax: SyntaxSet) -> Self {
        self.syntax = syntax;
        self
    }

    /// Enable or disable code skipping.
    #[must_use]
    pub fn with_skip_code(mut self, skip: bool) -> Self {
        self.skip_code = skip;
        self
    }
}
