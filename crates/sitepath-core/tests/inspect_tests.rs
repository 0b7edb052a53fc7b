mod common;

use std::fs;

use pretty_assertions::assert_eq;
use sitepath_core::{Annotation, Error, Mode, Target, inspect, place};
use sitepath_test_utils::Sandbox;

use common::context;

fn name(raw: &str) -> Target {
    Target::parse(raw, std::path::Path::new("/"), false).unwrap()
}

#[test]
fn reports_marker_and_pointer_together() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);
    place(&ctx, Mode::Copy, "my_project").unwrap();
    place(&ctx, Mode::Develop, "my_project").unwrap();

    let found = inspect(&ctx, &name("my_project")).unwrap();

    assert_eq!(found.candidate, sandbox.site());
    assert_eq!(found.findings.len(), 2);
    assert_eq!(found.findings[0].sidecar, sandbox.site().join("my_project.sitepath"));
    assert_eq!(found.findings[0].pth, None);
    assert_eq!(
        found.findings[1].pth,
        Some(vec![sandbox.root().display().to_string()])
    );
    assert!(found.findings.iter().all(|f| f.annotations.is_empty()));
}

#[test]
fn dangling_symlink_is_broken() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);
    place(&ctx, Mode::Symlink, "my_file.py").unwrap();
    fs::remove_file(sandbox.module_file()).unwrap();

    let found = inspect(&ctx, &name("my_file")).unwrap();

    assert_eq!(found.findings[0].annotations, vec![Annotation::Broken]);
}

#[test]
fn path_target_flags_other_origin() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);
    place(&ctx, Mode::Copy, "my_project").unwrap();
    let other = sandbox.root().join("elsewhere/my_project");
    let target = Target::parse(other.to_str().unwrap(), sandbox.root(), false).unwrap();

    let found = inspect(&ctx, &target).unwrap();

    assert_eq!(
        found.findings[0].annotations,
        vec![Annotation::Mismatched { expected: other }]
    );
}

#[test]
fn unknown_name_is_not_found() {
    let sandbox = Sandbox::new();
    let ctx = context(&sandbox);

    let err = inspect(&ctx, &name("nothing_here")).unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}
