//! End-to-end tests for `depstamp generate-version-file`.
//!
//! The package manager is replaced by a shell script through `--pm-bin`, so
//! these tests are unix-only.
#![cfg(unix)]

use depstamp::test_utils::fake_package_manager_output;
use predicates::prelude::*;
use std::fs;

use crate::common::TestProject;

const WRITTEN: &str = "File successfully written.";
const NOT_OVERWRITTEN: &str = "File exists and will not be overwritten.";
const LIST_FAILED: &str = "Failed to retrieve component versions.";

fn yarn_listing() -> String {
    fake_package_manager_output(&[("lodash", "4.17.21"), ("react", "17.0.2")])
}

/// Versions from the package manager end up in the rendered file
#[test]
fn test_generate_writes_component_versions() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.generate(&pm).assert().success().stdout(predicate::str::contains(WRITTEN));

    let output = project.read_file("version.html").unwrap();
    assert!(output.contains("<h1>Versions</h1>"));
    assert!(output.contains("<p>lodash 4.17.21</p>"));
    assert!(output.contains("<p>react 17.0.2</p>"));
    assert!(output.find("lodash").unwrap() < output.find("react").unwrap());
}

/// DEPSTAMP_PM_BIN stands in for --pm-bin
#[test]
fn test_pm_bin_from_environment() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.command().arg("gvf").env("DEPSTAMP_PM_BIN", &pm).assert().success();

    assert!(project.read_file("version.html").unwrap().contains("lodash 4.17.21"));
}

/// The `gvf` alias runs the same command
#[test]
fn test_gvf_alias() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.command().arg("gvf").arg("--pm-bin").arg(&pm).assert().success();

    assert!(project.file_exists("version.html"));
}

/// An existing output is left alone without --force
#[test]
fn test_existing_output_not_overwritten() {
    let project = TestProject::with_default_template().unwrap();
    project.write_file("version.html", "previous build").unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.generate(&pm).assert().success().stdout(predicate::str::contains(NOT_OVERWRITTEN));

    assert_eq!(project.read_file("version.html").unwrap(), "previous build");
}

/// --force replaces an existing output
#[test]
fn test_force_overwrites_output() {
    let project = TestProject::with_default_template().unwrap();
    project.write_file("version.html", "previous build").unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.generate(&pm).arg("--force").assert().success().stdout(predicate::str::contains(WRITTEN));

    assert!(project.read_file("version.html").unwrap().contains("react 17.0.2"));
}

/// A failing package manager means no output and exit status 1
#[test]
fn test_package_manager_failure() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager("error Couldn't find a package.json file\n", 1).unwrap();

    project
        .generate(&pm)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(LIST_FAILED))
        .stdout(predicate::str::contains(WRITTEN).not());

    assert!(!project.file_exists("version.html"));
}

/// A package manager that doesn't exist is treated like a failing one
#[test]
fn test_missing_package_manager() {
    let project = TestProject::with_default_template().unwrap();
    let missing = project.path().join("no-such-yarn");

    project.generate(&missing).assert().failure().code(1).stdout(predicate::str::contains(LIST_FAILED));

    assert!(!project.file_exists("version.html"));
}

/// --silent suppresses status lines, including the failure line
#[test]
fn test_silent_suppresses_status() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();
    project.generate(&pm).args(["--silent", "--verbose"]).assert().success().stdout("");
    assert!(project.file_exists("version.html"));

    let failing = TestProject::with_default_template().unwrap();
    let pm = failing.fake_package_manager("", 2).unwrap();
    failing.generate(&pm).arg("-s").assert().failure().stdout("");
}

/// --verbose prints the resolved options before the result
#[test]
fn test_verbose_lines() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Displaying verbose output"))
        .stdout(predicate::str::contains("Template path: version_template.html"))
        .stdout(predicate::str::contains("Output path: version.html"))
        .stdout(predicate::str::contains("Overwrite output: false"))
        .stdout(predicate::str::contains(WRITTEN));
}

/// Without --verbose the option lines stay hidden
#[test]
fn test_default_hides_verbose_lines() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .assert()
        .success()
        .stdout(predicate::str::contains("Displaying verbose output").not());
}

/// Inline data and a JSON file both reach the template; the file wins
#[test]
fn test_inline_data_and_json_file() {
    let project = TestProject::new().unwrap();
    project
        .write_file(
            "version_template.txt",
            "{{ title }} {{ build }}{% for c in componentVersions %} {{ c.name }}{% endfor %}",
        )
        .unwrap();
    project.write_file("build.json", r#"{"title": "Nightly"}"#).unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .args(["-t", "version_template.txt", "-o", "version.txt"])
        .args(["-d", r#"{"title": "Release", "build": 42}"#])
        .args(["-j", "build.json"])
        .assert()
        .success();

    assert_eq!(project.read_file("version.txt").unwrap(), "Nightly 42 lodash react");
}

/// A --json path that doesn't exist is ignored
#[test]
fn test_missing_json_file_skipped() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.generate(&pm).args(["-j", "absent.json"]).assert().success();

    assert!(project.file_exists("version.html"));
}

/// An empty --json file contributes nothing
#[test]
fn test_empty_json_file_accepted() {
    let project = TestProject::new().unwrap();
    project.write_file("version_template.txt", "{{ title }}").unwrap();
    project.write_file("build.json", "").unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .args(["-t", "version_template.txt", "-o", "version.txt"])
        .args(["-d", r#"{"title": "Release"}"#, "-j", "build.json"])
        .assert()
        .success();

    assert_eq!(project.read_file("version.txt").unwrap(), "Release");
}

/// Malformed --data is an error shown even with --silent
#[test]
fn test_malformed_data_reported() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .args(["--silent", "-d", "{release: 1}"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("The value '{release: 1}' is not valid JSON."));

    assert!(!project.file_exists("version.html"));
}

/// A missing template is an error naming the path
#[test]
fn test_missing_template_reported() {
    let project = TestProject::new().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .args(["-t", "nowhere.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template: nowhere.html"));
}

/// An unknown template variable fails with a suggestion
#[test]
fn test_template_error_suggests_variable() {
    let project = TestProject::new().unwrap();
    project
        .write_file("version_template.html", "{% for c in componentVersion %}{{ c.name }}{% endfor %}")
        .unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .assert()
        .failure()
        .stderr(predicate::str::contains("componentVersions"));

    assert!(!project.file_exists("version.html"));
}

/// Missing output directories are created
#[test]
fn test_nested_output_directories_created() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project.generate(&pm).args(["-o", "public/static/meta/version.html"]).assert().success();

    assert!(project.path().join("public/static/meta").is_dir());
    assert!(project.read_file("public/static/meta/version.html").unwrap().contains("lodash"));
}

/// An output parent that is a regular file is an error
#[test]
fn test_output_parent_is_file() {
    let project = TestProject::with_default_template().unwrap();
    project.write_file("public", "not a directory").unwrap();
    let pm = project.fake_package_manager(&yarn_listing(), 0).unwrap();

    project
        .generate(&pm)
        .args(["-o", "public/version.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

/// --cwd runs the package manager in another directory
#[test]
fn test_cwd_sets_package_manager_directory() {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::new().unwrap();
    project.write_file("version_template.txt", "{% for c in componentVersions %}{{ c.version }}{% endfor %}").unwrap();
    fs::create_dir_all(project.path().join("web")).unwrap();
    let pm = project
        .write_file("pwd-pm.sh", "#!/bin/sh\necho \"└─ dir@$(basename \"$(pwd -P)\")\"\n")
        .unwrap();
    fs::set_permissions(&pm, fs::Permissions::from_mode(0o755)).unwrap();

    project
        .generate(&pm)
        .args(["-t", "version_template.txt", "-o", "version.txt", "-C", "web"])
        .assert()
        .success();

    assert_eq!(project.read_file("version.txt").unwrap(), "web");
}

/// npm's `├──` tree lines parse the same way
#[test]
fn test_npm_style_listing() {
    let project = TestProject::with_default_template().unwrap();
    let pm = project
        .fake_package_manager("web@1.0.0 /srv/web\n├── express@4.18.2\n└── typescript@5.2.2\n", 0)
        .unwrap();

    project.generate(&pm).args(["--package-manager", "npm"]).assert().success();

    let output = project.read_file("version.html").unwrap();
    assert!(output.contains("<p>express 4.18.2</p>"));
    assert!(output.contains("<p>typescript 5.2.2</p>"));
}
