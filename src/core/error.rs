//! Error handling for depstamp
//!
//! Two layers, following the same split the rest of the crate relies on:
//! - [`DepstampError`] - strongly-typed failure cases raised by the pipeline
//! - [`ErrorContext`] - a wrapper adding user-facing details and suggestions
//!
//! Pipeline functions return [`anyhow::Result`] and attach path context with
//! `.with_context(...)`. At the top of the program the error is converted with
//! [`user_friendly_error`] and handed to the
//! [`Reporter`](crate::core::reporter::Reporter), which prints it regardless of
//! `--silent`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use depstamp::core::{DepstampError, ErrorContext, user_friendly_error};
//!
//! let error = DepstampError::MalformedJson {
//!     input: "{oops".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! assert!(ctx.to_string().contains("{oops"));
//!
//! let manual = ErrorContext::new(DepstampError::Other {
//!     message: "something broke".to_string(),
//! })
//! .with_suggestion("Run with --verbose for more output");
//! println!("{manual}");
//! ```

use std::fmt;
use thiserror::Error;

/// The main error type for depstamp operations.
///
/// Each variant names one failure mode of the pipeline and carries the
/// strings needed to explain it (paths, offending input, process output).
/// Variants hold owned strings only so the enum stays [`Clone`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DepstampError {
    /// The `--data` value could not be parsed as JSON.
    #[error("The value '{input}' is not valid JSON.")]
    MalformedJson {
        /// The raw string passed on the command line
        input: String,
    },

    /// The `--json` data file exists but does not contain valid JSON.
    #[error("Data file '{path}' is not valid JSON: {reason}")]
    MalformedDataFile {
        /// Path of the data file
        path: String,
        /// Parser message, including line and column
        reason: String,
    },

    /// Template data parsed fine but is not a JSON object.
    #[error("Template data from {origin} must be a JSON object, found {found}")]
    DataNotObject {
        /// Where the data came from (`--data` or a file path)
        origin: String,
        /// JSON type that was found instead (array, string, ...)
        found: String,
    },

    /// The package manager executable could not be started.
    #[error("Package manager '{program}' is not installed or not found in PATH")]
    PackageManagerNotFound {
        /// Executable that was looked up
        program: String,
    },

    /// The package manager ran but exited unsuccessfully.
    #[error("Package manager command failed: {program} {operation}")]
    PackageManagerFailed {
        /// Executable that was run
        program: String,
        /// Subcommand and arguments, joined by spaces
        operation: String,
        /// Captured stderr (or stdout when stderr was empty)
        stderr: String,
    },

    /// The package manager did not finish within the configured timeout.
    #[error("Package manager command timed out after {seconds}s: {program} {operation}")]
    PackageManagerTimeout {
        /// Executable that was run
        program: String,
        /// Subcommand and arguments, joined by spaces
        operation: String,
        /// Timeout that elapsed
        seconds: u64,
    },

    /// The template file could not be read.
    #[error("Failed to read template: {path}")]
    TemplateReadFailed {
        /// Template path as given on the command line
        path: String,
    },

    /// Tera rejected the template or failed while rendering it.
    #[error("Failed to render template '{template}': {message}")]
    TemplateRenderFailed {
        /// Template path
        template: String,
        /// Cleaned-up tera message
        message: String,
    },

    /// The rendered output could not be written.
    #[error("Failed to write output file: {path}")]
    OutputWriteFailed {
        /// Output path
        path: String,
    },

    /// A missing ancestor directory of the output path could not be created.
    #[error("Failed to create directory: {path}")]
    DirectoryCreateFailed {
        /// Directory that failed
        path: String,
    },

    /// An ancestor of the output path exists but is a regular file.
    #[error("Path exists but is not a directory: {path}")]
    NotADirectory {
        /// Offending path
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`DepstampError`] with optional details (why it happened) and a
/// suggestion (what to do about it). Rendering to the terminal is done by
/// [`Reporter::report_error`](crate::core::reporter::Reporter::report_error).
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DepstampError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no details or suggestion.
    #[must_use]
    pub const fn new(error: DepstampError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions.
///
/// Walks the whole `anyhow` chain so that a [`DepstampError`] buried under
/// `.with_context(...)` layers is still recognized. An [`ErrorContext`]
/// built earlier (e.g. by the renderer, with variable suggestions) is
/// returned as-is.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ctx.clone();
    }

    let io_cause = error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>());

    // `downcast_ref` sees errors attached with `.context(DepstampError::..)`;
    // the chain walk catches ones nested as a plain source.
    let depstamp_error = error
        .downcast_ref::<DepstampError>()
        .or_else(|| error.chain().find_map(|cause| cause.downcast_ref::<DepstampError>()));

    if let Some(depstamp_error) = depstamp_error {
        let mut ctx = create_error_context(depstamp_error.clone());
        if ctx.details.is_none() {
            if let Some(io_error) = io_cause {
                ctx = ctx.with_details(io_error.to_string());
            }
        }
        return ctx;
    }

    if let Some(io_error) = io_cause {
        let ctx = ErrorContext::new(DepstampError::Other {
            message: error.to_string(),
        })
        .with_details(io_error.to_string());
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                ctx.with_suggestion("Check file ownership and permissions")
            }
            std::io::ErrorKind::NotFound => {
                ctx.with_suggestion("Check that the file or directory exists and the path is correct")
            }
            _ => ctx,
        };
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DepstampError::Other {
        message,
    })
}

fn create_error_context(error: DepstampError) -> ErrorContext {
    match &error {
        DepstampError::MalformedJson {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Quote the whole value for your shell, e.g. --data '{\"release\": \"1.2.0\"}'",
        ),
        DepstampError::MalformedDataFile {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Validate the file with a JSON linter; trailing commas and comments are not allowed"),
        DepstampError::DataNotObject {
            ..
        } => ErrorContext::new(error)
            .with_details("Template data is a mapping of names to values")
            .with_suggestion("Wrap the value in an object, e.g. {\"items\": [...]}"),
        DepstampError::PackageManagerNotFound {
            program,
        } => {
            let suggestion = format!(
                "Install {program} or point --pm-bin at the executable; use --package-manager to switch between yarn and npm"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        DepstampError::PackageManagerFailed {
            stderr,
            ..
        } => {
            let details = stderr.trim().to_string();
            let ctx = ErrorContext::new(error)
                .with_suggestion("Run the command manually in the project directory to see the full output");
            if details.is_empty() {
                ctx
            } else {
                ctx.with_details(details)
            }
        }
        DepstampError::PackageManagerTimeout {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the package manager is not waiting for input"),
        DepstampError::TemplateReadFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Pass the template location with --template (default: version_template.html)"),
        DepstampError::TemplateRenderFailed {
            ..
        } => ErrorContext::new(error).with_details(
            "Templates use tera syntax; component versions are available as `componentVersions`",
        ),
        DepstampError::OutputWriteFailed {
            ..
        }
        | DepstampError::DirectoryCreateFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check that the output location is writable"),
        DepstampError::NotADirectory {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Choose an output path whose parent directories are not regular files"),
        DepstampError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
