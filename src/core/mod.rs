//! Core types shared by every stage of the pipeline: errors and status reporting.

pub mod error;
pub mod reporter;

pub use error::{DepstampError, ErrorContext, user_friendly_error};
pub use reporter::{ReportedLine, Reporter, Severity};
