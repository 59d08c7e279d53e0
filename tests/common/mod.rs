//! Common test utilities for depstamp integration tests
//!
//! A [`TestProject`] is a temporary project directory holding a template, an
//! optional data file and, on unix, a scripted stand-in for the package
//! manager. Commands run with the project directory as working directory.

// Not every helper is used by every test file
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Template used by most tests: title line plus one line per component.
pub const VERSION_TEMPLATE: &str = "\
<h1>{{ title | default(value=\"Versions\") }}</h1>
{% for c in componentVersions %}<p>{{ c.name }} {{ c.version }}</p>
{% endfor %}";

/// Temporary project directory for driving the binary.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir).context("Failed to create project dir")?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Create a project with `version_template.html` in place.
    pub fn with_default_template() -> Result<Self> {
        let project = Self::new()?;
        project.write_file("version_template.html", VERSION_TEMPLATE)?;
        Ok(project)
    }

    /// Project directory path.
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Write a file relative to the project directory.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file relative to the project directory.
    pub fn read_file(&self, relative: &str) -> Result<String> {
        let path = self.project_dir.join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Whether a file exists relative to the project directory.
    pub fn file_exists(&self, relative: &str) -> bool {
        self.project_dir.join(relative).exists()
    }

    /// Install an executable script that prints `stdout` and exits with `code`.
    ///
    /// Returns the script path, suitable for `--pm-bin`.
    #[cfg(unix)]
    pub fn fake_package_manager(&self, stdout: &str, code: i32) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let mut body = stdout.to_string();
        if !body.is_empty() && !body.ends_with('\n') {
            body.push('\n');
        }
        let script = format!("#!/bin/sh\ncat <<'EOF'\n{body}EOF\nexit {code}\n");
        let path = self.write_file("fake-pm.sh", &script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(path)
    }

    /// `depstamp` command running in the project directory.
    ///
    /// `RUST_LOG` and `DEPSTAMP_PM_BIN` are cleared so the caller's environment
    /// doesn't leak into assertions.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("depstamp").unwrap();
        cmd.current_dir(&self.project_dir)
            .env_remove("RUST_LOG")
            .env_remove("DEPSTAMP_PM_BIN")
            .env("NO_COLOR", "1");
        cmd
    }

    /// `depstamp generate-version-file` using `pm` as package manager.
    pub fn generate(&self, pm: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate-version-file").arg("--pm-bin").arg(pm);
        cmd
    }
}
