//! Test utilities for depstamp
//!
//! Helpers shared by unit tests and the integration test target (enabled there
//! through the `test-utils` feature).
//!
//! # Example
//!
//! ```rust,no_run
//! use depstamp::test_utils::{fake_package_manager_output, init_test_logging};
//!
//! init_test_logging(None);
//! let listing = fake_package_manager_output(&[("lodash", "4.17.21"), ("react", "17.0.2")]);
//! assert!(listing.contains("└─ react@17.0.2"));
//! ```

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=pm=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true) // Show targets like "pm"
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Build `yarn list --depth=0` style output for the given components.
///
/// The last entry uses `└─`, the others `├─`, framed by yarn's banner and
/// summary lines.
#[must_use]
pub fn fake_package_manager_output(components: &[(&str, &str)]) -> String {
    let mut out = String::from("yarn list v1.22.19\n");
    for (i, (name, version)) in components.iter().enumerate() {
        let branch = if i + 1 == components.len() { "└─" } else { "├─" };
        out.push_str(&format!("{branch} {name}@{version}\n"));
    }
    out.push_str("Done in 0.12s.\n");
    out
}
