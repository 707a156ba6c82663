//! `inject render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use inject_config::{CliSettings, Config, OnError};
use inject_directives::{Injector, RenderOutput, RenderRequest};
use inject_markdown::CmarkRenderer;

use crate::directives::{cmark_options, inject_options, table_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Replacement for a failed directive, as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum OnErrorArg {
    /// HTML comment naming the failure.
    Comment,
    /// Remove the directive.
    Empty,
    /// Keep the directive text.
    Verbatim,
}

impl From<OnErrorArg> for OnError {
    fn from(arg: OnErrorArg) -> Self {
        match arg {
            OnErrorArg::Comment => Self::Comment,
            OnErrorArg::Empty => Self::Empty,
            OnErrorArg::Verbatim => Self::Verbatim,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown files to render.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file (default: auto-discover inject.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Asset host base URL (overrides config).
    #[arg(long, env = "INJECT_BASE_URL")]
    base_url: Option<String>,

    /// Replacement for failed directives (overrides config).
    #[arg(long, value_enum)]
    on_error: Option<OnErrorArg>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Write `<stem>.html` files into this directory instead of stdout.
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable verbose output (show per-document expansion logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a directive cannot be
    /// registered, or an input or output file cannot be accessed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url,
            gfm: self.no_gfm.then_some(false),
            on_error: self.on_error.map(OnError::from),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let sources = read_sources(&self.files)?;
        let rendered = render_sources(&config, &sources)?;

        if let Some(out_dir) = &self.out_dir {
            std::fs::create_dir_all(out_dir)?;
        }

        let mut stdout = std::io::stdout().lock();
        for ((path, _), result) in sources.iter().zip(&rendered) {
            output.document_warnings(path, &result.warnings);

            if let Some(out_dir) = &self.out_dir {
                let target = output_path(out_dir, path);
                std::fs::write(&target, &result.html)?;
                output.success(&format!(
                    "Rendered {} -> {} ({} directives)",
                    path.display(),
                    target.display(),
                    result.expanded
                ));
            } else {
                stdout.write_all(result.html.as_bytes())?;
            }
        }
        stdout.flush()?;

        Ok(())
    }
}

/// Read every input file, keeping its path.
fn read_sources(files: &[PathBuf]) -> Result<Vec<(PathBuf, String)>, CliError> {
    files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .map(|content| (path.clone(), content))
                .map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })
        })
        .collect()
}

/// Render all sources through one hook, in parallel, preserving order.
fn render_sources(
    config: &Config,
    sources: &[(PathBuf, String)],
) -> Result<Vec<RenderOutput>, CliError> {
    let injector = Injector::new(table_from_config(config)?);
    let hook = injector.create_hook(CmarkRenderer::new(), inject_options(&config.render));

    let options = cmark_options(&config.render);
    let requests: Vec<_> = sources
        .iter()
        .map(|(_, markdown)| RenderRequest::new(markdown.as_str()).with_options(options))
        .collect();

    Ok(hook.render_batch(&requests))
}

/// `<out_dir>/<stem>.html` for an input file.
fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".html");
    out_dir.join(name)
}
