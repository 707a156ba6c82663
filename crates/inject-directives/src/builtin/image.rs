//! Image embedding directive.

use inject_markdown::escape_html;

use crate::{Directive, DirectiveContext, DirectiveError, DirectiveOutput};

/// Default `alt` text for embedded images.
const DEFAULT_ALT: &str = "image";

/// Embeds an image hosted under a fixed base URL.
///
/// `injectImage(diagrams/arch.png)` with base `https://assets.example.com`
/// becomes `<img src="https://assets.example.com/diagrams/arch.png" alt="image"/>`.
///
/// The path is appended to the base URL after HTML-escaping, so
/// `a.png?w=1&h=2` is emitted as `a.png?w=1&amp;h=2`. Trailing slashes on the
/// base URL and leading slashes on the path are dropped so exactly one `/`
/// separates the two: `injectImage(/a.png)` yields the same `src` as
/// `injectImage(a.png)`. The output is therefore `{base}/{path}` verbatim
/// only for paths without a leading `/` or HTML special characters.
///
/// # Example
///
/// ```
/// use inject_directives::{Directive, DirectiveContext, DirectiveOutput, DirectiveSyntax, ImageDirective};
///
/// let image = ImageDirective::new("injectImage", "https://assets.example.com/");
/// let ctx = DirectiveContext {
///     name: "injectImage",
///     line: 1,
///     syntax: DirectiveSyntax::Call,
///     source: "injectImage(a.png)",
/// };
///
/// assert_eq!(
///     image.expand("a.png", &ctx),
///     Ok(DirectiveOutput::html(r#"<img src="https://assets.example.com/a.png" alt="image"/>"#))
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ImageDirective {
    name: String,
    base_url: String,
    alt: String,
}

impl ImageDirective {
    /// Create an image directive with the default `alt` text.
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            alt: DEFAULT_ALT.to_owned(),
        }
    }

    /// Set the `alt` text.
    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Directive for ImageDirective {
    fn name(&self) -> &str {
        &self.name
    }

    fn expand(
        &self,
        arg: &str,
        _ctx: &DirectiveContext<'_>,
    ) -> Result<DirectiveOutput, DirectiveError> {
        let path = arg.trim_start_matches('/');
        if path.is_empty() {
            return Err(DirectiveError::invalid_argument("image path is empty"));
        }

        Ok(DirectiveOutput::Html(format!(
            r#"<img src="{}/{}" alt="{}"/>"#,
            self.base_url,
            escape_html(path),
            escape_html(&self.alt)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DirectiveSyntax;
    use pretty_assertions::assert_eq;

    fn expand(image: &ImageDirective, arg: &str) -> Result<DirectiveOutput, DirectiveError> {
        let ctx = DirectiveContext {
            name: image.name(),
            line: 1,
            syntax: DirectiveSyntax::Call,
            source: "",
        };
        image.expand(arg, &ctx)
    }

    #[test]
    fn test_image_tag() {
        let image = ImageDirective::new("injectImage", "https://kdarkroom.herokuapp.com");
        assert_eq!(
            expand(&image, "darkroom/logo.png"),
            Ok(DirectiveOutput::html(
                r#"<img src="https://kdarkroom.herokuapp.com/darkroom/logo.png" alt="image"/>"#
            ))
        );
    }

    #[test]
    fn test_trailing_slash_on_base_dropped() {
        let image = ImageDirective::new("injectImage", "https://cdn.test//");
        assert_eq!(image.base_url(), "https://cdn.test");
        assert_eq!(
            expand(&image, "a.png"),
            Ok(DirectiveOutput::html(r#"<img src="https://cdn.test/a.png" alt="image"/>"#))
        );
    }

    #[test]
    fn test_leading_slash_on_path_dropped() {
        let image = ImageDirective::new("injectImage", "https://cdn.test/");
        assert_eq!(
            expand(&image, "/img/a.png"),
            Ok(DirectiveOutput::html(r#"<img src="https://cdn.test/img/a.png" alt="image"/>"#))
        );
        assert_eq!(
            expand(&image, "/"),
            Err(DirectiveError::invalid_argument("image path is empty"))
        );
    }

    #[test]
    fn test_custom_alt_escaped() {
        let image = ImageDirective::new("pic", "https://cdn.test").with_alt(r#"the "logo""#);
        assert_eq!(
            expand(&image, "a.png"),
            Ok(DirectiveOutput::html(
                r#"<img src="https://cdn.test/a.png" alt="the &quot;logo&quot;"/>"#
            ))
        );
    }

    #[test]
    fn test_path_escaped() {
        let image = ImageDirective::new("pic", "https://cdn.test");
        assert_eq!(
            expand(&image, r#"a.png" onerror="x"#),
            Ok(DirectiveOutput::html(
                r#"<img src="https://cdn.test/a.png&quot; onerror=&quot;x" alt="image"/>"#
            ))
        );
    }

    #[test]
    fn test_query_string_ampersand_escaped() {
        let image = ImageDirective::new("pic", "https://cdn.test");
        assert_eq!(
            expand(&image, "a.png?w=100&h=50"),
            Ok(DirectiveOutput::html(
                r#"<img src="https://cdn.test/a.png?w=100&amp;h=50" alt="image"/>"#
            ))
        );
    }

    #[test]
    fn test_empty_path_rejected() {
        let image = ImageDirective::new("pic", "https://cdn.test");
        assert_eq!(
            expand(&image, ""),
            Err(DirectiveError::invalid_argument("image path is empty"))
        );
    }
}
