//! Fixed-template directive.

use inject_markdown::escape_html;

use crate::{Directive, DirectiveContext, DirectiveError, DirectiveOutput, RegistrationError};

/// Placeholder replaced by the escaped argument.
const ARG_PLACEHOLDER: &str = "{arg}";

/// Fills an HTML template with the directive argument.
///
/// Every `{arg}` in the template is replaced by the HTML-escaped argument.
#[derive(Clone, Debug)]
pub struct TemplateDirective {
    name: String,
    template: String,
}

impl TemplateDirective {
    /// Create a template directive.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::InvalidHandler`] if the template has no
    /// `{arg}` placeholder.
    pub fn new(
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<Self, RegistrationError> {
        let name = name.into();
        let template = template.into();
        if !template.contains(ARG_PLACEHOLDER) {
            return Err(RegistrationError::InvalidHandler {
                name,
                reason: format!("template must contain {ARG_PLACEHOLDER}"),
            });
        }
        Ok(Self { name, template })
    }
}

impl Directive for TemplateDirective {
    fn name(&self) -> &str {
        &self.name
    }

    fn expand(
        &self,
        arg: &str,
        _ctx: &DirectiveContext<'_>,
    ) -> Result<DirectiveOutput, DirectiveError> {
        Ok(DirectiveOutput::Html(
            self.template.replace(ARG_PLACEHOLDER, &escape_html(arg)),
        ))
    }
}
