//! Directive expansion over a whole document.

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::fence::FenceTracker;
use crate::parser::{ParsedDirective, next_directive};
use crate::{
    DirectiveContext, DirectiveError, DirectiveOutput, DirectiveTable, FailurePolicy,
    InjectOptions,
};

/// Result of expanding directives in one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expansion<'a> {
    /// Document text with directives replaced.
    ///
    /// Borrowed when nothing was replaced.
    pub text: Cow<'a, str>,
    /// Number of occurrences replaced by handler output.
    pub expanded: usize,
    /// Handler failures, one per failed occurrence.
    pub warnings: Vec<String>,
}

impl Expansion<'_> {
    /// Whether the text is identical to the input.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        matches!(self.text, Cow::Borrowed(_))
    }
}

/// Replaces directive occurrences using a frozen table.
pub(crate) struct Expander {
    table: Arc<DirectiveTable>,
    options: InjectOptions,
}

impl Expander {
    pub(crate) fn new(table: Arc<DirectiveTable>, options: InjectOptions) -> Self {
        Self { table, options }
    }

    pub(crate) fn table(&self) -> &DirectiveTable {
        &self.table
    }

    pub(crate) fn options(&self) -> &InjectOptions {
        &self.options
    }

    /// Expand every directive in `input`.
    ///
    /// Lines are scanned independently; a directive never spans lines.
    pub(crate) fn expand<'a>(&self, input: &'a str) -> Expansion<'a> {
        let mut state = ExpandState::new(input);
        let mut fence = FenceTracker::new();
        let mut offset = 0;

        for (idx, line) in input.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += line.len();

            if self.options.skip_code {
                let is_marker = fence.update(line);
                if is_marker || fence.in_fence() {
                    continue;
                }
            }

            self.expand_line(line, line_start, idx + 1, &mut state);
        }

        state.finish()
    }

    fn expand_line(
        &self,
        line: &str,
        line_start: usize,
        line_num: usize,
        state: &mut ExpandState<'_>,
    ) {
        let mut pos = 0;
        while let Some((directive, start, end)) =
            next_directive(line, pos, self.options.syntax, self.options.skip_code)
        {
            pos = end;
            let source = &line[start..end];

            let Some(handler) = self.table.get(directive.name) else {
                tracing::trace!(
                    name = directive.name,
                    line = line_num,
                    "Unknown directive left verbatim"
                );
                // The argument of an unknown invocation may hold known directives.
                pos = start + 1;
                continue;
            };

            let ctx = DirectiveContext {
                name: directive.name,
                line: line_num,
                syntax: directive.syntax,
                source,
            };

            match invoke(handler, &directive, &ctx) {
                Ok(DirectiveOutput::Html(html)) => {
                    state.replace(line_start + start, line_start + end, &html);
                    state.expanded += 1;
                }
                Ok(DirectiveOutput::Skip) => {}
                Err(err) => {
                    tracing::warn!(
                        name = directive.name,
                        line = line_num,
                        error = %err,
                        "Directive handler failed"
                    );
                    state.warnings.push(format!(
                        "line {line_num}: directive `{}` failed: {err}",
                        directive.name
                    ));
                    let (start, end) = (line_start + start, line_start + end);
                    match self.options.on_error {
                        FailurePolicy::Comment => {
                            state.replace(start, end, &failure_comment(directive.name, &err));
                        }
                        FailurePolicy::Empty => state.replace(start, end, ""),
                        FailurePolicy::Verbatim => {}
                    }
                }
            }
        }
    }
}

/// Run a handler, turning a panic into [`DirectiveError::Panicked`].
fn invoke(
    handler: &dyn crate::Directive,
    directive: &ParsedDirective<'_>,
    ctx: &DirectiveContext<'_>,
) -> Result<DirectiveOutput, DirectiveError> {
    panic::catch_unwind(AssertUnwindSafe(|| handler.expand(directive.arg, ctx))).unwrap_or_else(
        |payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_owned())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_owned());
            Err(DirectiveError::Panicked(message))
        },
    )
}

/// HTML comment marking a failed directive. `--` cannot appear inside a comment.
fn failure_comment(name: &str, err: &DirectiveError) -> String {
    let reason = err.to_string().replace("--", "- -");
    format!("<!-- directive {name} failed: {reason} -->")
}

/// Output buffer that is only allocated once something is replaced.
struct ExpandState<'a> {
    input: &'a str,
    output: Option<String>,
    /// End of the input already copied to `output`.
    copied: usize,
    expanded: usize,
    warnings: Vec<String>,
}

impl<'a> ExpandState<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            output: None,
            copied: 0,
            expanded: 0,
            warnings: Vec::new(),
        }
    }

    fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        let input = self.input;
        let output = self
            .output
            .get_or_insert_with(|| String::with_capacity(input.len() + 64));
        output.push_str(&input[self.copied..start]);
        output.push_str(replacement);
        self.copied = end;
    }

    fn finish(self) -> Expansion<'a> {
        let text = match self.output {
            Some(mut output) => {
                output.push_str(&self.input[self.copied..]);
                Cow::Owned(output)
            }
            None => Cow::Borrowed(self.input),
        };
        Expansion {
            text,
            expanded: self.expanded,
            warnings: self.warnings,
        }
    }
}
