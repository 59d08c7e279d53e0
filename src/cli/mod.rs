//! Command-line interface for depstamp.
//!
//! The binary exposes a single subcommand:
//!
//! - `generate-version-file` (alias `gvf`) - render a template with the
//!   project's installed component versions, see [`generate`]
//!
//! # Output channels
//!
//! | Channel | Content | Controlled by |
//! |---------|---------|---------------|
//! | stdout | status and detail lines | `--verbose`, `--silent` |
//! | stderr | errors | always shown |
//! | stderr | tracing diagnostics | `RUST_LOG`, or derived from the flags |
//!
//! # Example
//!
//! ```bash
//! depstamp generate-version-file --template version_template.html --output public/version.html
//! depstamp gvf -v -f -d '{"build": "1234"}'
//! RUST_LOG=pm=debug depstamp gvf
//! ```

pub mod generate;


use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

pub use generate::{GenerateCommand, GenerateOutcome};

/// Runtime configuration for CLI execution.
///
/// Holds settings derived from the flags that would otherwise be read from
/// the environment, so tests can build them without touching global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    ///
    /// `None` disables diagnostics entirely (used by `--silent`).
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Create a configuration with no log level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.log_level` is used. Output
/// goes to stderr so stdout carries only status lines. Calling this more
/// than once is harmless.
pub fn init_logging(config: &CliConfig) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_level.as_deref() {
            Some(level) => EnvFilter::new(level),
            None => return,
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Main CLI structure for depstamp.
#[derive(Parser, Debug)]
#[command(
    name = "depstamp",
    about = "Stamp installed component versions into a rendered template",
    version,
    long_about = "depstamp lists the top-level dependencies of a yarn or npm project and renders \
                  them, together with optional JSON data, into a template file."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template with installed component versions.
    ///
    /// See [`generate::GenerateCommand`] for options.
    #[command(name = "generate-version-file", visible_alias = "gvf")]
    GenerateVersionFile(GenerateCommand),
}

impl Cli {
    /// Execute the CLI with configuration derived from the flags.
    pub async fn execute(self) -> Result<GenerateOutcome> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Build a [`CliConfig`] from the parsed arguments.
    ///
    /// - `--silent`: no diagnostics
    /// - `--verbose`: `debug`
    /// - otherwise: `warn`
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let (verbose, silent) = match &self.command {
            Commands::GenerateVersionFile(cmd) => (cmd.verbose, cmd.silent),
        };

        if silent {
            CliConfig::new()
        } else if verbose {
            CliConfig::new().with_log_level("debug")
        } else {
            CliConfig::new().with_log_level("warn")
        }
    }

    /// Execute the CLI with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<GenerateOutcome> {
        init_logging(&config);

        match self.command {
            Commands::GenerateVersionFile(cmd) => cmd.execute().await,
        }
    }
}
