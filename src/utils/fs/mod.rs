//! File system helpers for writing rendered output.
//!
//! - [`dirs`] - iterative creation of missing ancestor directories and
//!   existence checks that surface permission errors
//! - [`atomic`] - temp-file-and-rename writes so a failed write never leaves a
//!   half-written output file behind

pub mod atomic;
pub mod dirs;

pub use atomic::atomic_write;
pub use dirs::{ensure_dir, ensure_parent_dir, path_exists};
