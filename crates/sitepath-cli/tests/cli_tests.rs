//! Integration tests for the sitepath binary.
//!
//! Every run is isolated from the caller's environment: the global config
//! directory points into the sandbox and the candidate list comes from
//! `--site`.

use assert_cmd::Command;
use predicates::prelude::*;
use sitepath_test_utils::Sandbox;
use std::fs;

/// A `sitepath` command running in the sandbox root against its site dir.
fn sitepath(sandbox: &Sandbox) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sitepath"));
    cmd.current_dir(sandbox.root())
        .env("XDG_CONFIG_HOME", sandbox.root().join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("VIRTUAL_ENV")
        .env_remove("SITEPATH_CONFIG")
        .env("SITEPATH_SITES", sandbox.site());
    cmd
}

// ============================================================================
// Help and defaults
// ============================================================================

#[test]
fn help_lists_commands() {
    let sandbox = Sandbox::new();
    sitepath(&sandbox)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("symlink"))
        .stdout(predicate::str::contains("undevelop"));
}

#[test]
fn no_command_shows_status() {
    let sandbox = Sandbox::new();
    sitepath(&sandbox)
        .assert()
        .success()
        .stdout(predicate::str::contains("Active site-packages"))
        .stdout(predicate::str::contains(sandbox.site().display().to_string()));
}

// ============================================================================
// Placement round trips
// ============================================================================

#[test]
fn copy_then_uncopy() {
    let sandbox = Sandbox::new();

    sitepath(&sandbox)
        .args(["copy", "my_project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copied"));
    sandbox.assert_exists("site-packages/my_project/__init__.py");
    sandbox.assert_exists("site-packages/my_project.sitepath");

    sitepath(&sandbox)
        .args(["uncopy", "my_project"])
        .assert()
        .success();
    sandbox.assert_absent("site-packages/my_project");
    sandbox.assert_absent("site-packages/my_project.sitepath");
}

#[test]
fn link_alias_then_unlink_by_path() {
    let sandbox = Sandbox::new();

    sitepath(&sandbox).args(["link", "my_file.py"]).assert().success();
    assert_eq!(
        fs::read_link(sandbox.site().join("my_file.py")).unwrap(),
        sandbox.module_file()
    );

    sitepath(&sandbox).args(["unlink", "./my_file.py"]).assert().success();
    sandbox.assert_absent("site-packages/my_file.py");
}

#[test]
fn develop_then_undevelop() {
    let sandbox = Sandbox::new();

    sitepath(&sandbox).args(["develop", "my_project"]).assert().success();
    sandbox.assert_exists("site-packages/my_project.sitepath.pth");

    sitepath(&sandbox)
        .args(["undevelop", "my_project"])
        .assert()
        .success();
    sandbox.assert_absent("site-packages/my_project.sitepath.pth");
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn foreign_conflict_exits_one() {
    let sandbox = Sandbox::new();
    sandbox.write("site-packages/my_project/__init__.py", "foreign");

    sitepath(&sandbox)
        .args(["symlink", "my_project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("not created by sitepath"));
    assert_eq!(sandbox.read("site-packages/my_project/__init__.py"), "foreign");
}

#[test]
fn unknown_package_exits_two() {
    let sandbox = Sandbox::new();

    sitepath(&sandbox)
        .args(["uncopy", "my_project"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failure:"))
        .stderr(predicate::str::contains("Package not found"));
}

#[test]
fn origin_mismatch_then_name_only() {
    let sandbox = Sandbox::new();
    sandbox.write("elsewhere/my_project/__init__.py", "");
    sitepath(&sandbox).args(["copy", "my_project"]).assert().success();

    sitepath(&sandbox)
        .args(["uncopy", "elsewhere/my_project"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("path mismatch"));
    sandbox.assert_exists("site-packages/my_project");

    sitepath(&sandbox)
        .args(["uncopy", "-n", "elsewhere/my_project"])
        .assert()
        .success();
    sandbox.assert_absent("site-packages/my_project");
}

#[test]
fn batch_reports_each_bad_item() {
    let sandbox = Sandbox::new();

    sitepath(&sandbox)
        .args(["copy", "my_project", "missing_dir", "my_file.py"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 total"))
        .stderr(predicate::str::contains("- copy \"missing_dir\""))
        .stderr(predicate::str::contains(
            "Result (success=2, errors=1, failures=0)",
        ));
    sandbox.assert_exists("site-packages/my_project");
    sandbox.assert_exists("site-packages/my_file.py");
}

#[test]
fn uncopy_without_targets_exits_one() {
    let sandbox = Sandbox::new();

    sitepath(&sandbox)
        .arg("uncopy")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Need a package name"));
}

// ============================================================================
// list, -r, info, diff
// ============================================================================

#[test]
fn list_output_feeds_back_through_read() {
    let sandbox = Sandbox::new();
    sitepath(&sandbox)
        .args(["copy", "my_project", "my_file.py"])
        .assert()
        .success();

    let output = sitepath(&sandbox).args(["list", "copies"]).output().unwrap();
    assert!(output.status.success());
    let listing = String::from_utf8(output.stdout).unwrap();
    assert!(listing.starts_with("# sitepath-copied\n"));
    fs::write(sandbox.root().join("copies.txt"), &listing).unwrap();

    sitepath(&sandbox)
        .args(["uncopy", "-r", "copies.txt"])
        .assert()
        .success();
    assert_eq!(fs::read_dir(sandbox.site()).unwrap().count(), 0);

    sitepath(&sandbox)
        .args(["copy", "-r", "copies.txt"])
        .assert()
        .success();
    sandbox.assert_exists("site-packages/my_project");
    sandbox.assert_exists("site-packages/my_file.py");
}

#[test]
fn list_unknown_kind_exits_one() {
    let sandbox = Sandbox::new();
    sitepath(&sandbox)
        .args(["list", "everything"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not recognized"));
}

#[test]
fn info_flags_broken_symlink() {
    let sandbox = Sandbox::new();
    sitepath(&sandbox).args(["symlink", "my_project"]).assert().success();
    fs::remove_dir_all(sandbox.project()).unwrap();

    sitepath(&sandbox)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("my_project:"))
        .stdout(predicate::str::contains("(broken)"));
}

#[test]
fn diff_reports_changed_copy() {
    let sandbox = Sandbox::new();
    sitepath(&sandbox).args(["copy", "my_project"]).assert().success();
    sandbox.write("my_project/b.txt", "b");

    sitepath(&sandbox)
        .args(["diff", "my_project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("changed"))
        .stdout(predicate::str::contains("+ b.txt"));

    sitepath(&sandbox)
        .args(["list", "changed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(sandbox.project().display().to_string()));
}

#[test]
fn config_file_supplies_candidates() {
    let sandbox = Sandbox::new();
    sandbox.write(
        "sitepath.toml",
        &format!(
            "site_packages = [{:?}]\nenable_user_site = false\n",
            sandbox.user_site().display().to_string()
        ),
    );

    sitepath(&sandbox)
        .env_remove("SITEPATH_SITES")
        .args(["--config", "sitepath.toml", "copy", "my_file.py"])
        .assert()
        .success();
    sandbox.assert_exists("user-site-packages/my_file.py");
}
