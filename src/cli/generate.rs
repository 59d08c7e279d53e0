//! Generate a version file from a template.
//!
//! This module implements the `generate-version-file` command (alias `gvf`).
//! It collects template data, asks the package manager for the installed
//! top-level components, and renders the template to the output file.
//!
//! # Pipeline
//!
//! 1. merge `--data` and `--json` into one mapping (awaited before anything else)
//! 2. list component versions with the package manager
//! 3. on success, add `componentVersions` to a copy of the mapping and render
//! 4. on failure, skip rendering; the command exits with status 1
//!
//! # Examples
//!
//! ```bash
//! # Render version_template.html into version.html
//! depstamp generate-version-file
//!
//! # Custom paths, extra data, overwrite the previous output
//! depstamp gvf -t build/version.tera.html -o dist/version.html \
//!     -d '{"release": "2.4.0"}' -j build-info.json --force
//!
//! # npm project in another directory
//! depstamp gvf --package-manager npm -C ../web-app
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE, GenerateConfig};
use crate::core::Reporter;
use crate::data::{merge_data, with_component_versions};
use crate::templating::{RenderOutcome, render_to_file};
use crate::versions::{PackageManager, VersionSource, list_component_versions};

/// Result of a generate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Output written (created or forced overwrite)
    Written,
    /// Output existed and `--force` was not given
    Skipped,
    /// Component versions could not be listed; nothing rendered
    NoVersions,
}

impl GenerateOutcome {
    /// Whether the process should exit with a failure status.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::NoVersions)
    }
}

impl From<RenderOutcome> for GenerateOutcome {
    fn from(outcome: RenderOutcome) -> Self {
        match outcome {
            RenderOutcome::Written => Self::Written,
            RenderOutcome::Skipped => Self::Skipped,
        }
    }
}

/// Command to render the version template.
#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
    /// Template file to render
    #[arg(short = 't', long = "template", default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,

    /// Output file to write
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON file merged into the template data (overrides --data keys)
    #[arg(short = 'j', long = "json")]
    pub json: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Show extra status lines
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Inline JSON object merged into the template data
    #[arg(short = 'd', long = "data", value_name = "JSON")]
    pub data: Option<String>,

    /// Suppress all status output (errors are still printed)
    #[arg(short = 's', long = "silent")]
    pub silent: bool,

    /// Package manager used to list installed components
    #[arg(long = "package-manager", value_enum, default_value_t = PackageManager::Yarn)]
    pub package_manager: PackageManager,

    /// Package manager executable to run instead of the default
    #[arg(long = "pm-bin", value_name = "PATH", env = "DEPSTAMP_PM_BIN")]
    pub pm_bin: Option<String>,

    /// Directory the package manager runs in
    #[arg(short = 'C', long = "cwd", value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

impl GenerateCommand {
    /// Build the run configuration from the parsed flags.
    #[must_use]
    pub fn to_config(&self) -> GenerateConfig {
        GenerateConfig {
            template_path: self.template.clone(),
            output_path: self.output.clone(),
            force: self.force,
            verbose: self.verbose,
            silent: self.silent,
            inline_json: self.data.clone(),
            json_path: self.json.clone(),
            version_source: VersionSource::for_package_manager(
                self.package_manager,
                self.pm_bin.clone(),
                self.cwd.clone(),
            ),
        }
    }

    /// Run the command with a terminal reporter.
    pub async fn execute(self) -> Result<GenerateOutcome> {
        let config = self.to_config();
        generate_version_file(&config, &config.reporter()).await
    }
}

/// Run the generate pipeline for `config`, reporting through `reporter`.
///
/// # Errors
///
/// Data, template and write errors are returned. A failed version listing is
/// not an error here: it is reported through `reporter` and yields
/// [`GenerateOutcome::NoVersions`].
pub async fn generate_version_file(
    config: &GenerateConfig,
    reporter: &Reporter,
) -> Result<GenerateOutcome> {
    reporter.detail("Displaying verbose output");
    reporter.detail(format!("Template path: {}", config.template_path.display()));
    reporter.detail(format!("Output path: {}", config.output_path.display()));
    reporter.detail(format!("Overwrite output: {}", config.force));

    let data = merge_data(config.inline_json.as_deref(), config.json_path.as_deref()).await?;

    let versions = match list_component_versions(&config.version_source, reporter).await {
        Ok(versions) => versions,
        Err(e) => {
            tracing::debug!("Skipping render: {:#}", e);
            return Ok(GenerateOutcome::NoVersions);
        }
    };
    reporter.detail(format!("Found {} components", versions.len()));

    let data = with_component_versions(&data, &versions)?;

    let outcome =
        render_to_file(&config.template_path, &data, &config.output_path, config.force, reporter)
            .await?;

    Ok(outcome.into())
}
