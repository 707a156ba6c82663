//! Configuration management for directive injection.
//!
//! Parses `inject.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `assets.base_url`
//! - `directives[].base_url`

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override asset host base URL.
    pub base_url: Option<String>,
    /// Override GFM flag.
    pub gfm: Option<bool>,
    /// Override failure policy.
    pub on_error: Option<OnError>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "inject.toml";

/// Asset host used when no configuration overrides it.
pub const DEFAULT_BASE_URL: &str = "https://kdarkroom.herokuapp.com";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset hosting configuration.
    pub assets: AssetsConfig,
    /// Rendering configuration.
    pub render: RenderConfig,
    /// Registered directives, in file order.
    pub directives: Vec<DirectiveConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets: AssetsConfig::default(),
            render: RenderConfig::default(),
            directives: default_directives(),
            config_path: None,
        }
    }
}

/// Asset hosting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Base URL that image paths are appended to.
    pub base_url: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GitHub Flavored Markdown.
    pub gfm: bool,
    /// Enable typographic quotes and dashes.
    pub smart_punctuation: bool,
    /// What replaces a directive whose handler failed.
    pub on_error: OnError,
    /// Recognised directive syntax forms.
    pub syntax: Syntax,
    /// Leave code blocks and code spans untouched.
    pub skip_code: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            smart_punctuation: false,
            on_error: OnError::default(),
            syntax: Syntax::default(),
            skip_code: true,
        }
    }
}

/// Failure placeholder setting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// HTML comment naming the failure.
    #[default]
    Comment,
    /// Remove the directive.
    Empty,
    /// Keep the directive text.
    Verbatim,
}

/// Directive syntax setting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Syntax {
    /// `name(arg)` and `{@name: arg}`.
    #[default]
    All,
    /// `name(arg)` only.
    Call,
    /// `{@name: arg}` only.
    Embed,
}

/// One `[[directives]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectiveConfig {
    /// Directive name as written in markdown.
    pub name: String,
    /// Directive kind and its settings.
    #[serde(flatten)]
    pub kind: DirectiveKind,
}

/// Built-in directive kinds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectiveKind {
    /// `<img>` pointing at an asset host.
    Image {
        /// Asset host for this directive (default: `assets.base_url`).
        base_url: Option<String>,
        /// `alt` text (default: `image`).
        alt: Option<String>,
    },
    /// Fixed HTML template with `{arg}` placeholders.
    Template {
        /// HTML template.
        template: String,
    },
}

fn default_directives() -> Vec<DirectiveConfig> {
    vec![DirectiveConfig {
        name: "injectImage".to_owned(),
        kind: DirectiveKind::Image {
            base_url: None,
            alt: None,
        },
    }]
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assets.base_url`").
        field: String,
        /// Error message (e.g., "${`ASSET_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `inject.toml` in current directory and parents,
    /// falling back to defaults.
    ///
    /// CLI settings are applied after loading and validated with the rest of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse, expand and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, environment expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_url) = &settings.base_url {
            self.assets.base_url.clone_from(base_url);
        }
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(on_error) = settings.on_error {
            self.render.on_error = on_error;
        }
    }

    /// Asset host for an image directive: its own `base_url`, else `assets.base_url`.
    #[must_use]
    pub fn image_base_url<'a>(&'a self, directive_base_url: Option<&'a str>) -> &'a str {
        directive_base_url.unwrap_or(&self.assets.base_url)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.assets.base_url, "assets.base_url")?;
        require_http_url(&self.assets.base_url, "assets.base_url")?;
        self.validate_directives()
    }

    /// Validate directive entries.
    ///
    /// Name syntax is checked again when the directive table is built; here
    /// we only catch what is visible in the file itself.
    fn validate_directives(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for (idx, directive) in self.directives.iter().enumerate() {
            let field = format!("directives[{idx}]");
            require_non_empty(&directive.name, &format!("{field}.name"))?;

            if !seen.insert(directive.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{field}.name: directive `{}` is defined more than once",
                    directive.name
                )));
            }

            match &directive.kind {
                DirectiveKind::Image {
                    base_url: Some(url),
                    ..
                } => {
                    require_non_empty(url, &format!("{field}.base_url"))?;
                    require_http_url(url, &format!("{field}.base_url"))?;
                }
                DirectiveKind::Image { base_url: None, .. } => {}
                DirectiveKind::Template { template } => {
                    if !template.contains("{arg}") {
                        return Err(ConfigError::Validation(format!(
                            "{field}.template must contain {{arg}}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.assets.base_url = expand::expand_env(&self.assets.base_url, "assets.base_url")?;

        for (idx, directive) in self.directives.iter_mut().enumerate() {
            if let DirectiveKind::Image {
                base_url: Some(url),
                ..
            } = &mut directive.kind
            {
                *url = expand::expand_env(url, &format!("directives[{idx}].base_url"))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.assets.base_url, "https://kdarkroom.herokuapp.com");
        assert!(config.render.gfm);
        assert!(!config.render.smart_punctuation);
        assert!(config.render.skip_code);
        assert_eq!(config.render.on_error, OnError::Comment);
        assert_eq!(config.render.syntax, Syntax::All);
        assert_eq!(config.directives, default_directives());
        assert!(config.config_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.assets.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.directives.len(), 1);
        assert_eq!(config.directives[0].name, "injectImage");
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[assets]
base_url = "https://assets.example.com"

[render]
gfm = false
smart_punctuation = true
on_error = "verbatim"
syntax = "embed"
skip_code = false

[[directives]]
name = "injectImage"
kind = "image"
alt = "diagram"

[[directives]]
name = "logo"
kind = "image"
base_url = "https://logos.example.com"

[[directives]]
name = "badge"
kind = "template"
template = "<span class=\"badge\">{arg}</span>"
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(config.assets.base_url, "https://assets.example.com");
        assert!(!config.render.gfm);
        assert!(config.render.smart_punctuation);
        assert!(!config.render.skip_code);
        assert_eq!(config.render.on_error, OnError::Verbatim);
        assert_eq!(config.render.syntax, Syntax::Embed);
        assert_eq!(
            config.directives,
            vec![
                DirectiveConfig {
                    name: "injectImage".to_owned(),
                    kind: DirectiveKind::Image {
                        base_url: None,
                        alt: Some("diagram".to_owned()),
                    },
                },
                DirectiveConfig {
                    name: "logo".to_owned(),
                    kind: DirectiveKind::Image {
                        base_url: Some("https://logos.example.com".to_owned()),
                        alt: None,
                    },
                },
                DirectiveConfig {
                    name: "badge".to_owned(),
                    kind: DirectiveKind::Template {
                        template: r#"<span class="badge">{arg}</span>"#.to_owned(),
                    },
                },
            ]
        );
    }

    #[test]
    fn test_explicit_empty_directives() {
        let config = Config::from_toml("directives = []").unwrap();
        assert!(config.directives.is_empty());
    }

    #[test]
    fn test_image_base_url_fallback() {
        let config = Config::default();

        assert_eq!(config.image_base_url(None), DEFAULT_BASE_URL);
        assert_eq!(
            config.image_base_url(Some("https://other.test")),
            "https://other.test"
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let toml = r#"
[[directives]]
name = "video"
kind = "video"
"#;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_template_requires_template_field() {
        let toml = r#"
[[directives]]
name = "badge"
kind = "template"
"#;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_on_error_rejected() {
        let toml = r#"
[render]
on_error = "explode"
"#;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::Parse(_))));
    }

    // Validation tests

    #[test]
    fn test_validate_base_url_scheme() {
        let toml = r#"
[assets]
base_url = "ftp://assets.example.com"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: assets.base_url must start with http:// or https://"
        );
    }

    #[test]
    fn test_validate_empty_base_url() {
        let toml = r#"
[assets]
base_url = ""
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: assets.base_url cannot be empty"
        );
    }

    #[test]
    fn test_validate_duplicate_directive() {
        let toml = r#"
[[directives]]
name = "injectImage"
kind = "image"

[[directives]]
name = "injectImage"
kind = "template"
template = "{arg}"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: directives[1].name: directive `injectImage` is defined more than once"
        );
    }

    #[test]
    fn test_validate_empty_directive_name() {
        let toml = r#"
[[directives]]
name = ""
kind = "image"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: directives[0].name cannot be empty"
        );
    }

    #[test]
    fn test_validate_directive_base_url() {
        let toml = r#"
[[directives]]
name = "logo"
kind = "image"
base_url = "logos.example.com"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: directives[0].base_url must start with http:// or https://"
        );
    }

    #[test]
    fn test_validate_template_placeholder() {
        let toml = r#"
[[directives]]
name = "badge"
kind = "template"
template = "<b>static</b>"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: directives[0].template must contain {arg}"
        );
    }

    // Environment expansion tests

    #[test]
    fn test_expand_env_vars_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_INJECT_ASSET_HOST", "https://env.example.com");
        }

        let toml = r#"
[assets]
base_url = "${TEST_INJECT_ASSET_HOST}"

[[directives]]
name = "logo"
kind = "image"
base_url = "${TEST_INJECT_ASSET_HOST}/logos"
"#;
        let config = Config::from_toml(toml).unwrap();

        assert_eq!(config.assets.base_url, "https://env.example.com");
        assert_eq!(
            config.directives[0].kind,
            DirectiveKind::Image {
                base_url: Some("https://env.example.com/logos".to_owned()),
                alt: None,
            }
        );
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_INJECT_CONFIG_VAR");
        }

        let toml = r#"
[[directives]]
name = "logo"
kind = "image"
base_url = "${MISSING_INJECT_CONFIG_VAR}"
"#;
        let err = Config::from_toml(toml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvVar { ref field, .. } if field == "directives[0].base_url"
        ));
    }

    // CLI settings tests

    #[test]
    fn test_apply_cli_settings_base_url() {
        let mut config = Config::default();

        let overrides = CliSettings {
            base_url: Some("https://cli.example.com".to_owned()),
            ..Default::default()
        };
        config.apply_cli_settings(&overrides);

        assert_eq!(config.assets.base_url, "https://cli.example.com");
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default();

        let overrides = CliSettings {
            base_url: None,
            gfm: Some(false),
            on_error: Some(OnError::Empty),
        };
        config.apply_cli_settings(&overrides);

        assert_eq!(config.assets.base_url, DEFAULT_BASE_URL);
        assert!(!config.render.gfm);
        assert_eq!(config.render.on_error, OnError::Empty);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.assets.base_url, DEFAULT_BASE_URL);
        assert!(config.render.gfm);
    }

    // File loading tests

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assets]\nbase_url = \"https://file.example.com\"").unwrap();

        let config = Config::load(Some(file.path()), None).unwrap();

        assert_eq!(config.assets.base_url, "https://file.example.com");
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_with_cli_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assets]\nbase_url = \"https://file.example.com\"").unwrap();

        let settings = CliSettings {
            base_url: Some("https://cli.example.com".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(file.path()), Some(&settings)).unwrap();

        assert_eq!(config.assets.base_url, "https://cli.example.com");
    }

    #[test]
    fn test_load_invalid_cli_base_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\ngfm = true").unwrap();

        let settings = CliSettings {
            base_url: Some("not-a-url".to_owned()),
            ..Default::default()
        };
        let err = Config::load(Some(file.path()), Some(&settings)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("inject.toml");

        let err = Config::load(Some(&missing), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assets\nbase_url = ").unwrap();

        let err = Config::load(Some(file.path()), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
