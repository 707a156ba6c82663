//! `inject check` command implementation.

use std::path::PathBuf;

use clap::Args;
use inject_config::{Config, DirectiveKind};

use crate::directives::table_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover inject.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a directive
    /// cannot be registered.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let table = table_from_config(&config)?;

        match &config.config_path {
            Some(path) => output.info(&format!("Configuration: {}", path.display())),
            None => output.info("Configuration: defaults (no inject.toml found)"),
        }
        output.info(&format!("Asset host: {}", config.assets.base_url));

        output.heading(&format!("Directives ({}):", table.len()));
        for directive in &config.directives {
            output.info(&format!("  {}", describe(&config, &directive.name, &directive.kind)));
        }

        output.success("Configuration OK");
        Ok(())
    }
}

/// One-line summary of a configured directive.
fn describe(config: &Config, name: &str, kind: &DirectiveKind) -> String {
    match kind {
        DirectiveKind::Image { base_url, .. } => {
            format!("{name} (image, {})", config.image_base_url(base_url.as_deref()))
        }
        DirectiveKind::Template { template } => format!("{name} (template, {template})"),
    }
}
