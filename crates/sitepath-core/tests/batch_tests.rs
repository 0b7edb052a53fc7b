//! Batch orchestration over the real engines

mod common;

use std::fs;

use pretty_assertions::assert_eq;
use sitepath_core::{Error, Mode, place_all, remove_all};
use sitepath_test_utils::Sandbox;

use common::context;

fn items(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn places_every_item() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);

    let report = place_all(&ctx, Mode::Copy, &items(&["my_project", "my_file.py"])).unwrap();

    assert_eq!(report.succeeded.len(), 2);
    sandbox.assert_exists("site-packages/my_project");
    sandbox.assert_exists("site-packages/my_file.py");
}

#[test]
fn invalid_middle_item_is_the_only_diagnostic() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);
    let batch = items(&["my_project", "not-valid!", "my_file.py"]);

    let err = place_all(&ctx, Mode::Symlink, &batch).unwrap_err();

    let Error::BatchError(report) = &err else {
        panic!("expected batch error, got {err:?}");
    };
    assert_eq!(report.succeeded, items(&["my_project", "my_file.py"]));
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].item, "not-valid!");
    assert_eq!(report.errors[0].index, 1);
    assert!(report.failures.is_empty());
    assert!(err.to_string().starts_with("1 total\n- symlink \"not-valid!\""));
    sandbox.assert_exists("site-packages/my_project");
    sandbox.assert_exists("site-packages/my_file.py");
}

#[test]
fn not_found_removal_escalates_to_failure() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);
    sitepath_core::place(&ctx, Mode::Copy, "my_file.py").unwrap();

    let err = remove_all(
        &ctx,
        Mode::Copy,
        &items(&["not-valid!", "my_project", "my_file.py"]),
        false,
    )
    .unwrap_err();

    let Error::BatchFailure(report) = &err else {
        panic!("expected batch failure, got {err:?}");
    };
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.succeeded, items(&["my_file.py"]));
    assert!(err.to_string().ends_with("Result (success=1, errors=1, failures=1)"));
    assert_eq!(fs::read_dir(sandbox.site()).unwrap().count(), 0);
}

#[test]
fn empty_removal_batch_asks_for_a_target() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);

    let err = remove_all(&ctx, Mode::Develop, &[], false).unwrap_err();

    assert!(err.is_recoverable());
    assert!(err.to_string().contains("package name"));
}
