//! Platform-specific helpers.

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Executable name for a package manager on the current platform.
///
/// Node package managers ship as `.cmd` shims on Windows, which
/// `CreateProcess` does not resolve from a bare name.
///
/// # Examples
///
/// ```rust
/// use depstamp::utils::platform::package_manager_executable;
///
/// let yarn = package_manager_executable("yarn");
/// if cfg!(windows) {
///     assert_eq!(yarn, "yarn.cmd");
/// } else {
///     assert_eq!(yarn, "yarn");
/// }
/// ```
#[must_use]
pub fn package_manager_executable(name: &str) -> String {
    if is_windows() {
        format!("{name}.cmd")
    } else {
        name.to_string()
    }
}
