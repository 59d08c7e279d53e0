//! Status reporting with explicit severity and visibility rules.
//!
//! Every human-readable line the command prints goes through a [`Reporter`].
//! Visibility depends only on the line's [`Severity`] and the
//! `verbose`/`silent` flags:
//!
//! | Severity | default | `--verbose` | `--silent` |
//! |----------|---------|-------------|------------|
//! | `Detail` | hidden  | shown       | hidden     |
//! | `Status` | shown   | shown       | hidden     |
//! | `Error`  | shown   | shown       | shown      |
//!
//! Status and detail lines go to stdout, errors to stderr. A capturing
//! reporter records visible lines in memory instead, which is how the
//! gating rules are tested.

use colored::Colorize;
use std::sync::{Arc, Mutex};

use super::error::ErrorContext;

/// How important a reported line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Extra diagnostics, only with `--verbose`
    Detail,
    /// Normal progress and result lines
    Status,
    /// Operational failures; never silenced
    Error,
}

/// A line that passed the visibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedLine {
    /// Severity the line was emitted with
    pub severity: Severity,
    /// Plain text, without color codes
    pub message: String,
}

#[derive(Debug, Clone)]
enum Sink {
    Terminal,
    Capture(Arc<Mutex<Vec<ReportedLine>>>),
}

/// Prints status lines subject to the verbose/silent flags.
#[derive(Debug, Clone)]
pub struct Reporter {
    verbose: bool,
    silent: bool,
    sink: Sink,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::terminal(false, false)
    }
}

impl Reporter {
    /// Reporter that prints to the terminal.
    #[must_use]
    pub const fn terminal(verbose: bool, silent: bool) -> Self {
        Self {
            verbose,
            silent,
            sink: Sink::Terminal,
        }
    }

    /// Reporter that records visible lines in memory.
    ///
    /// Returns the reporter together with a handle to the recorded lines.
    #[must_use]
    pub fn capturing(verbose: bool, silent: bool) -> (Self, Arc<Mutex<Vec<ReportedLine>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let reporter = Self {
            verbose,
            silent,
            sink: Sink::Capture(Arc::clone(&lines)),
        };
        (reporter, lines)
    }

    /// Whether a line of the given severity would be emitted.
    #[must_use]
    pub const fn is_visible(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => true,
            Severity::Status => !self.silent,
            Severity::Detail => self.verbose && !self.silent,
        }
    }

    /// Emit a verbose-only line.
    pub fn detail(&self, message: impl AsRef<str>) {
        self.emit(Severity::Detail, message.as_ref());
    }

    /// Emit a normal status line.
    pub fn status(&self, message: impl AsRef<str>) {
        self.emit(Severity::Status, message.as_ref());
    }

    /// Print an [`ErrorContext`] as `error:` / `details:` / `suggestion:` lines.
    ///
    /// Errors ignore `--silent`.
    pub fn report_error(&self, ctx: &ErrorContext) {
        self.emit(Severity::Error, &format!("error: {}", ctx.error));
        if let Some(details) = &ctx.details {
            self.emit(Severity::Error, &format!("details: {details}"));
        }
        if let Some(suggestion) = &ctx.suggestion {
            self.emit(Severity::Error, &format!("suggestion: {suggestion}"));
        }
    }

    fn emit(&self, severity: Severity, message: &str) {
        // Trace only: `--verbose` enables debug logs on stderr.
        tracing::trace!(target: "report", ?severity, "{}", message);

        if !self.is_visible(severity) {
            return;
        }

        match &self.sink {
            Sink::Terminal => match severity {
                Severity::Detail => println!("{}", message.dimmed()),
                Severity::Status => println!("{message}"),
                Severity::Error => eprintln!("{}", colorize_error_line(message)),
            },
            Sink::Capture(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(ReportedLine {
                        severity,
                        message: message.to_string(),
                    });
                }
            }
        }
    }
}

fn colorize_error_line(message: &str) -> String {
    if let Some(rest) = message.strip_prefix("error:") {
        format!("{}:{}", "error".red().bold(), rest)
    } else if let Some(rest) = message.strip_prefix("details:") {
        format!("{}:{}", "details".yellow(), rest)
    } else if let Some(rest) = message.strip_prefix("suggestion:") {
        format!("{}:{}", "suggestion".green(), rest)
    } else {
        message.red().to_string()
    }
}
