//! Builder for running package manager commands.
//!
//! Mirrors how the rest of the crate talks to external tools: a fluent
//! builder collects arguments, working directory, environment and an optional
//! timeout, then [`PackageManagerCommand::execute`] runs the process once,
//! captures its output and turns failures into [`DepstampError`] variants.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::DepstampError;

/// Fluent builder for a single package manager invocation.
///
/// # Examples
///
/// ```rust,no_run
/// use depstamp::versions::command_builder::PackageManagerCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = PackageManagerCommand::new("yarn")
///     .args(["list", "--depth=0"])
///     .current_dir("/path/to/project")
///     .with_context("component versions")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
///
/// # Defaults
///
/// - **Timeout**: none; a hanging package manager blocks until it exits
/// - **Working directory**: the current process directory
/// - **Environment**: inherited from the parent process
#[derive(Debug, Clone)]
pub struct PackageManagerCommand {
    /// Executable to run (`yarn`, `npm.cmd`, or an explicit path)
    program: String,

    /// Arguments passed to the executable
    args: Vec<String>,

    /// Working directory for the process
    current_dir: Option<PathBuf>,

    /// Extra environment variables
    env_vars: Vec<(String, String)>,

    /// Maximum duration to wait (None = wait forever)
    timeout_duration: Option<Duration>,

    /// Label included in log lines
    context: Option<String>,
}

impl PackageManagerCommand {
    /// Creates a builder for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env_vars: Vec::new(),
            timeout_duration: None,
            context: None,
        }
    }

    /// Sets the working directory for the process.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds an environment variable for the process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Set a timeout for the command (None for no timeout)
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Set a context label for log lines
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Execute the command and return the captured output.
    ///
    /// # Errors
    ///
    /// - [`DepstampError::PackageManagerNotFound`] if the executable cannot be
    ///   found
    /// - [`DepstampError::PackageManagerTimeout`] if a timeout was set and
    ///   elapsed
    /// - [`DepstampError::PackageManagerFailed`] on a non-zero exit status
    pub async fn execute(self) -> Result<CommandOutput> {
        let start = std::time::Instant::now();
        let operation = self.args.join(" ");
        let label = self.context.as_deref().map(|c| format!("({c}) ")).unwrap_or_default();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env_vars {
            tracing::trace!(target: "pm", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        tracing::debug!(target: "pm", "{}Executing command: {} {}", label, self.program, operation);

        let output_future = cmd.output();
        let result = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        target: "pm",
                        "{}Command timed out after {} seconds: {} {}",
                        label,
                        duration.as_secs(),
                        self.program,
                        operation
                    );
                    return Err(DepstampError::PackageManagerTimeout {
                        program: self.program,
                        operation,
                        seconds: duration.as_secs(),
                    }
                    .into());
                }
            }
        } else {
            output_future.await
        };

        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(target: "pm", "{}Executable not found: {}", label, self.program);
                return Err(e).context(DepstampError::PackageManagerNotFound {
                    program: self.program,
                });
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to execute {} {}", self.program, operation));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "pm",
                "{}Command failed with exit code: {:?}",
                label,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "pm", "{}Error: {}", label, stderr.trim());
            }

            return Err(DepstampError::PackageManagerFailed {
                program: self.program,
                operation,
                stderr: if stderr.trim().is_empty() {
                    stdout
                } else {
                    stderr
                },
            }
            .into());
        }

        if !stderr.is_empty() {
            tracing::debug!(target: "pm", "{}{}", label, stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "pm::perf",
                "{}{} {} took {:.2}s",
                label,
                self.program,
                operation,
                elapsed.as_secs_f64()
            );
        } else {
            tracing::debug!(
                target: "pm::perf",
                "{}{} {} took {}ms",
                label,
                self.program,
                operation,
                elapsed.as_millis()
            );
        }

        Ok(CommandOutput { stdout })
    }
}

/// Output from a successful package manager command
///
/// Standard error of a successful run is only logged.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
}
