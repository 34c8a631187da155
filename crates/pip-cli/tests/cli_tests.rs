//! End-to-end tests for the pipsync binary

use assert_cmd::Command;
use pip_test_utils::TestProject;
use pip_test_utils::xml::{core_class, pip_document};
use predicates::prelude::*;

const FILE: &str = "packageInstallationPlugin.xml";

/// Get a Command for the pipsync binary running against `project`
fn pipsync(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("pipsync").expect("Failed to find pipsync binary");
    cmd.current_dir(project.root())
        .env_remove("PIPSYNC_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn addon_project() -> TestProject {
    TestProject::new().with_config(3, "com.example.addon", &[FILE])
}

#[test]
fn test_missing_config_is_an_error() {
    let project = TestProject::new();
    pipsync(&project)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("pipsync.toml"));
}

#[test]
fn test_list_shows_entries() {
    let option = core_class("Option");
    let project = addon_project().with_pip_xml(FILE, &[("option", option.as_str())]);

    pipsync(&project)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("option"))
        .stdout(predicate::str::contains("OptionPackageInstallationPlugin"))
        .stdout(predicate::str::contains("Total:"));
}

#[test]
fn test_list_json() {
    let project = addon_project().with_pip_xml(FILE, &[("option", "vendor\\Option")]);

    let output = pipsync(&project).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["entries"][0]["identifier"], "option");
    assert_eq!(value["entries"][0]["fields"]["className"], "vendor\\Option");
    assert_eq!(value["keys"][0]["label"], "wcf.acp.pip.pip.pluginName");
}

#[test]
fn test_show_unknown_entry_fails() {
    let project = addon_project().with_pip_xml(FILE, &[]);
    pipsync(&project)
        .args(["show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entry 'missing'"));
}

#[test]
fn test_add_edit_delete_round() {
    let project = addon_project();
    let option = core_class("Option");
    let menu = core_class("ACPMenu");

    pipsync(&project)
        .args(["add", "--name", "option", "--class", &option])
        .assert()
        .success()
        .stdout(predicate::str::contains("added"));
    assert_eq!(
        project.read_file(FILE),
        pip_document(&[("option", option.as_str())], &[])
    );

    pipsync(&project)
        .args(["edit", "option", "--class", &menu])
        .assert()
        .success();
    assert_eq!(
        project.read_file(FILE),
        pip_document(&[("option", menu.as_str())], &[])
    );

    pipsync(&project)
        .args(["delete", "option"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));
    assert_eq!(project.read_file(FILE), pip_document(&[], &["option"]));
    project.assert_no_temp_files();
}

#[test]
fn test_add_duplicate_name_fails() {
    let option = core_class("Option");
    let project = addon_project().with_pip_xml(FILE, &[("option", option.as_str())]);

    pipsync(&project)
        .args(["add", "--name", "option", "--class", &option])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notUnique"));
}

#[test]
fn test_add_unknown_class_fails() {
    let project = addon_project();

    pipsync(&project)
        .args(["add", "--name", "foo", "--class", "vendor\\Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nonExistent"));
    assert!(!project.path(FILE).exists());
}

#[test]
fn test_edit_unknown_entry_fails() {
    let project = addon_project().with_pip_xml(FILE, &[]);
    pipsync(&project)
        .args(["edit", "missing", "--name", "other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entry with identifier 'missing'"));
}

#[test]
fn test_sort_check_and_rewrite() {
    let project = addon_project();
    project.write_file(FILE, include_str!("../../../test-fixtures/xml/unsorted.xml"));

    pipsync(&project)
        .args(["sort", "--check"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("is not sorted"));

    pipsync(&project).arg("sort").assert().success();

    pipsync(&project)
        .args(["sort", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is sorted"));
}

#[test]
fn test_install_update_and_uninstall() {
    let project = addon_project().with_pip_xml(FILE, &[("bar", "B"), ("foo", "F")]);

    pipsync(&project)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 imported, 0 updated, 0 deleted"));

    project.write_file(FILE, &pip_document(&[("bar", "B2")], &["foo"]));
    pipsync(&project)
        .args(["install", "--update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 imported, 1 updated, 1 deleted"));

    pipsync(&project)
        .arg("uninstall")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 registration(s)"));
}

#[test]
fn test_install_counts_shared_entry_once() {
    let project = TestProject::new()
        .with_config(3, "com.example.addon", &["a/pip.xml", "b/pip.xml"])
        .with_pip_xml("a/pip.xml", &[("foo", "F")])
        .with_pip_xml("b/pip.xml", &[("foo", "F")]);

    pipsync(&project)
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 imported, 0 updated, 0 deleted"));
}

#[test]
fn test_help_lists_commands() {
    let project = TestProject::new();
    pipsync(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("sort"));
}
