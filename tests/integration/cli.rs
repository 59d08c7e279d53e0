//! Command-line surface tests.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_help_lists_subcommand() {
    let project = TestProject::new().unwrap();
    project
        .command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate-version-file"))
        .stdout(predicate::str::contains("gvf"));
}

#[test]
fn test_subcommand_help_lists_flags() {
    let project = TestProject::new().unwrap();
    let output = project.command().args(["gvf", "--help"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--template",
        "--output",
        "--json",
        "--force",
        "--verbose",
        "--data",
        "--silent",
        "--package-manager",
        "--pm-bin",
        "--cwd",
    ] {
        assert!(stdout.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn test_version_flag() {
    let project = TestProject::new().unwrap();
    project
        .command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_fails() {
    let project = TestProject::new().unwrap();
    project.command().assert().failure();
}

#[test]
fn test_unknown_package_manager_fails() {
    let project = TestProject::new().unwrap();
    project
        .command()
        .args(["gvf", "--package-manager", "pnpm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pnpm"));
}
