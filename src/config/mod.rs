//! Runtime configuration for a generate run.
//!
//! Everything comes from command-line flags; there is no configuration file.
//! [`GenerateCommand::to_config`](crate::cli::generate::GenerateCommand::to_config)
//! builds one immutable [`GenerateConfig`] which is then passed by reference
//! through the pipeline.

use std::path::PathBuf;

use crate::core::Reporter;
use crate::versions::VersionSource;

/// Default template path, relative to the current directory.
pub const DEFAULT_TEMPLATE: &str = "version_template.html";

/// Default output path, relative to the current directory.
pub const DEFAULT_OUTPUT: &str = "version.html";

/// Options for one version-file generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Template to render
    pub template_path: PathBuf,
    /// Where the rendered text goes
    pub output_path: PathBuf,
    /// Overwrite an existing output file
    pub force: bool,
    /// Emit detail lines
    pub verbose: bool,
    /// Suppress detail and status lines
    pub silent: bool,
    /// Raw `--data` string, parsed later
    pub inline_json: Option<String>,
    /// `--json` data file
    pub json_path: Option<PathBuf>,
    /// Package manager invocation used for component versions
    pub version_source: VersionSource,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            force: false,
            verbose: false,
            silent: false,
            inline_json: None,
            json_path: None,
            version_source: VersionSource::default(),
        }
    }
}

impl GenerateConfig {
    /// Terminal reporter honoring this config's verbose/silent flags.
    #[must_use]
    pub const fn reporter(&self) -> Reporter {
        Reporter::terminal(self.verbose, self.silent)
    }
}
