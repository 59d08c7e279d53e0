//! Installed component version listing.
//!
//! Runs the project's package manager in "list top-level dependencies" mode
//! and turns its tree-drawn output into [`ComponentVersion`] records:
//!
//! ```text
//! yarn list v1.22.19
//! ├─ lodash@4.17.21
//! └─ react@17.0.2
//! Done in 0.31s.
//! ```
//!
//! Only lines with a `├─`/`└─` branch followed by `name@version` become
//! records; banners, warnings and summaries are skipped. npm's `├──` branches
//! match the same way.

pub mod command_builder;

use anyhow::Result;
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::core::Reporter;
use crate::utils::platform::package_manager_executable;
use command_builder::PackageManagerCommand;

/// Status line emitted when the listing fails.
pub const LIST_FAILED_MESSAGE: &str = "Failed to retrieve component versions.";

/// One installed top-level dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVersion {
    /// Package name, including any `@scope/` prefix
    pub name: String,
    /// Version string as printed by the package manager
    pub version: String,
}

impl ComponentVersion {
    /// Build a record from name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Supported package managers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    /// `yarn list --depth=0`
    #[default]
    Yarn,
    /// `npm ls --depth=0`
    Npm,
}

impl PackageManager {
    /// Base executable name, without platform suffix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
        }
    }

    /// Arguments for a shallow listing of direct dependencies.
    #[must_use]
    pub const fn list_args(self) -> &'static [&'static str] {
        match self {
            Self::Yarn => &["list", "--depth=0"],
            Self::Npm => &["ls", "--depth=0"],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where component versions come from: which executable, with which
/// arguments, run in which directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSource {
    /// Executable to run
    pub program: String,
    /// Arguments for the listing command
    pub args: Vec<String>,
    /// Directory to run in (None = current directory)
    pub working_dir: Option<PathBuf>,
}

impl VersionSource {
    /// Source for a known package manager, optionally overriding its executable.
    #[must_use]
    pub fn for_package_manager(
        manager: PackageManager,
        executable: Option<String>,
        working_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            program: executable.unwrap_or_else(|| package_manager_executable(manager.name())),
            args: manager.list_args().iter().map(ToString::to_string).collect(),
            working_dir,
        }
    }

    fn command(&self) -> PackageManagerCommand {
        let mut cmd = PackageManagerCommand::new(self.program.clone())
            .args(self.args.iter().cloned())
            // Keep tree glyphs and `name@version` free of ANSI escapes.
            .env("NO_COLOR", "1")
            .env("FORCE_COLOR", "0")
            .with_context("component versions");
        if let Some(ref dir) = self.working_dir {
            cmd = cmd.current_dir(dir);
        }
        cmd
    }
}

impl Default for VersionSource {
    fn default() -> Self {
        Self::for_package_manager(PackageManager::default(), None, None)
    }
}

fn component_line_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        // The name group is greedy so `@scope/pkg@1.0.0` splits at the last `@`.
        Regex::new(r"[└├]─+ (.*)@(.*)$").ok()
    })
    .as_ref()
}

/// Parse package manager list output into records, in listing order.
///
/// Lines that don't look like `├─ name@version` / `└─ name@version` are
/// skipped. Trailing whitespace (including `\r`) is ignored.
///
/// # Examples
///
/// ```rust
/// use depstamp::versions::{ComponentVersion, parse_component_versions};
///
/// let output = "yarn list v1.22.19\n├─ lodash@4.17.21\n└─ react@17.0.2\nDone in 0.2s.\n";
/// assert_eq!(
///     parse_component_versions(output),
///     vec![
///         ComponentVersion::new("lodash", "4.17.21"),
///         ComponentVersion::new("react", "17.0.2"),
///     ]
/// );
/// ```
#[must_use]
pub fn parse_component_versions(output: &str) -> Vec<ComponentVersion> {
    let Some(re) = component_line_regex() else {
        return Vec::new();
    };

    output
        .lines()
        .filter_map(|line| {
            let line = line.trim_end();
            let caps = re.captures(line);
            if caps.is_none() {
                tracing::trace!("Skipping list line: {}", line);
            }
            caps.map(|caps| ComponentVersion::new(&caps[1], &caps[2]))
        })
        .collect()
}

/// Run the package manager and collect top-level component versions.
///
/// On failure a single [`LIST_FAILED_MESSAGE`] status line is reported and the
/// error is returned, so the caller can skip rendering.
pub async fn list_component_versions(
    source: &VersionSource,
    reporter: &Reporter,
) -> Result<Vec<ComponentVersion>> {
    match source.command().execute().await {
        Ok(output) => {
            let versions = parse_component_versions(&output.stdout);
            tracing::debug!(
                "Found {} component versions via {}",
                versions.len(),
                source.program
            );
            Ok(versions)
        }
        Err(e) => {
            tracing::debug!("Component version listing failed: {:#}", e);
            reporter.status(LIST_FAILED_MESSAGE);
            Err(e)
        }
    }
}
