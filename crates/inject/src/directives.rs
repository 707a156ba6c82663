//! Build the directive pipeline from loaded configuration.

use inject_config::{Config, DirectiveKind, OnError, RenderConfig, Syntax};
use inject_directives::{
    DirectiveTable, FailurePolicy, ImageDirective, InjectOptions, RegistrationError, SyntaxSet,
    TemplateDirective,
};
use inject_markdown::CmarkOptions;

/// Build the directive table from `[[directives]]` entries.
///
/// Image directives without their own `base_url` use `assets.base_url`.
pub(crate) fn table_from_config(config: &Config) -> Result<DirectiveTable, RegistrationError> {
    let mut table = DirectiveTable::new();

    for directive in &config.directives {
        match &directive.kind {
            DirectiveKind::Image { base_url, alt } => {
                let base_url = config.image_base_url(base_url.as_deref());
                let mut image = ImageDirective::new(directive.name.as_str(), base_url);
                if let Some(alt) = alt {
                    image = image.with_alt(alt.as_str());
                }
                table.register(image)?;
            }
            DirectiveKind::Template { template } => {
                table.register(TemplateDirective::new(
                    directive.name.as_str(),
                    template.as_str(),
                )?)?;
            }
        }
    }

    tracing::debug!(directives = table.len(), "Built directive table");
    Ok(table)
}

/// Injection options from `[render]`.
pub(crate) fn inject_options(render: &RenderConfig) -> InjectOptions {
    let policy = match render.on_error {
        OnError::Comment => FailurePolicy::Comment,
        OnError::Empty => FailurePolicy::Empty,
        OnError::Verbatim => FailurePolicy::Verbatim,
    };
    let syntax = match render.syntax {
        Syntax::All => SyntaxSet::All,
        Syntax::Call => SyntaxSet::Call,
        Syntax::Embed => SyntaxSet::Embed,
    };

    InjectOptions::new()
        .with_failure_policy(policy)
        .with_syntax(syntax)
        .with_skip_code(render.skip_code)
}

/// Markdown renderer options from `[render]`.
pub(crate) fn cmark_options(render: &RenderConfig) -> CmarkOptions {
    CmarkOptions::default()
        .with_gfm(render.gfm)
        .with_smart_punctuation(render.smart_punctuation)
}
