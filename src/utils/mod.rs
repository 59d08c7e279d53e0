//! Cross-platform utilities
//!
//! - [`fs`] - directory ensure and atomic output writes
//! - [`platform`] - platform-specific executable naming

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, ensure_parent_dir};
pub use platform::{is_windows, package_manager_executable};
