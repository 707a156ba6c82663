//! Colored status output on stderr.
//!
//! Rendered HTML may go to stdout, so everything else goes through here.

use std::path::Path;

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&Style::new().green(), msg);
    }

    /// Contained directive failures of one document, in yellow.
    pub(crate) fn document_warnings(&self, path: &Path, warnings: &[String]) {
        let yellow = Style::new().yellow();
        for warning in warnings {
            self.styled(&yellow, &warning_line(path, warning));
        }
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&Style::new().red(), msg);
    }

    pub(crate) fn heading(&self, msg: &str) {
        self.styled(&Style::new().cyan().bold(), msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}

/// `<path>: <warning>`
fn warning_line(path: &Path, warning: &str) -> String {
    format!("{}: {warning}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_warning_line_prefixes_path() {
        assert_eq!(
            warning_line(
                Path::new("docs/guide.md"),
                "line 3: directive `injectImage` failed: invalid argument: image path is empty"
            ),
            "docs/guide.md: line 3: directive `injectImage` failed: invalid argument: image path is empty"
        );
    }
}
