//! Scenario: Local patch and restore
//!
//! Journey: A developer changed `pkg/Foo.java`, rebuilt, and wants the new
//! `Foo.class` (plus its inner class) on the deployed jar without touching
//! anything else - then wants the original jar back.
//!
//! Steps:
//! 1. Deployed jar has an old Foo plus an unrelated Bar
//! 2. Patch with the fresh build and "pkg/Foo.java" as the change list
//! 3. Jar now carries the new Foo, Bar untouched
//! 4. A second patch replaces (not stacks on) the first
//! 5. Restore brings the byte-identical original back

use crate::common::*;

#[test]
fn scenario_patch_swaps_changed_class_and_keeps_the_rest() {
    let env = TestEnv::new();
    make_jar(
        &env.path("build/fresh.jar"),
        &[
            ("pkg/Foo.class", b"new-foo"),
            ("pkg/Foo$Inner.class", b"new-inner"),
            ("pkg/Bar.class", b"rebuilt-bar"),
        ],
    );
    make_jar(
        &env.path("deploy/app.jar"),
        &[("pkg/Foo.class", b"old-foo"), ("pkg/Bar.class", b"old-bar")],
    );

    let result = env.run_with_stdin(
        &["patch", "build/fresh.jar", "deploy/app.jar"],
        "pkg/Foo.java\n",
    );

    assert!(result.success, "stderr:\n{}", result.stderr);
    assert_eq!(result.terminal_line(), "[SUCCESS]");

    // New Foo and its companion are in; Bar was NOT listed as changed and
    // keeps its deployed bytes even though the fresh build rebuilt it.
    assert_eq!(
        jar_entries(&env.path("deploy/app.jar")),
        vec![
            ("pkg/Bar.class".to_string(), b"old-bar".to_vec()),
            ("pkg/Foo$Inner.class".to_string(), b"new-inner".to_vec()),
            ("pkg/Foo.class".to_string(), b"new-foo".to_vec()),
        ]
    );
}

#[test]
fn scenario_second_patch_replaces_first_against_same_baseline() {
    let env = TestEnv::new();
    make_jar(
        &env.path("deploy/app.jar"),
        &[("pkg/Foo.class", b"original-foo"), ("pkg/Bar.class", b"bar")],
    );

    // First patch: new Foo
    make_jar(&env.path("build-1.jar"), &[("pkg/Foo.class", b"foo-v1")]);
    let first = env.run_with_stdin(&["patch", "build-1.jar", "deploy/app.jar"], "pkg/Foo.java\n");
    assert!(first.success, "stderr:\n{}", first.stderr);

    let backup_path = env.path("deploy/.classpatch/app.jar/pristine.jar");
    let backup_after_first = std::fs::read(&backup_path).unwrap();

    // Second patch from another build: only Bar this time
    make_jar(&env.path("build-2.jar"), &[("pkg/Bar.class", b"bar-v2")]);
    let second =
        env.run_with_stdin(&["patch", "build-2.jar", "deploy/app.jar"], "pkg/Bar.java\n");
    assert!(second.success, "stderr:\n{}", second.stderr);

    // The backup never moves off the pre-first-patch baseline
    assert_eq!(std::fs::read(&backup_path).unwrap(), backup_after_first);

    // Foo reverted to its original bytes: runs replace, they do not stack
    assert_eq!(
        jar_entries(&env.path("deploy/app.jar")),
        vec![
            ("pkg/Bar.class".to_string(), b"bar-v2".to_vec()),
            ("pkg/Foo.class".to_string(), b"original-foo".to_vec()),
        ]
    );
}

#[test]
fn scenario_restore_returns_byte_identical_original() {
    let env = TestEnv::new();
    make_jar(
        &env.path("deploy/app.jar"),
        &[("pkg/Foo.class", b"old-foo"), ("pkg/Bar.class", b"bar")],
    );
    let original = std::fs::read(env.path("deploy/app.jar")).unwrap();

    make_jar(&env.path("fresh.jar"), &[("pkg/Foo.class", b"new-foo")]);
    let patch = env.run_with_stdin(&["patch", "fresh.jar", "deploy/app.jar"], "pkg/Foo.java\n");
    assert!(patch.success, "stderr:\n{}", patch.stderr);
    assert_ne!(std::fs::read(env.path("deploy/app.jar")).unwrap(), original);

    let restore = env.run(&["restore", "deploy/app.jar"]);
    assert!(restore.success, "stderr:\n{}", restore.stderr);
    assert_eq!(restore.terminal_line(), "[SUCCESS]");

    // Byte-identical to the pre-first-patch jar
    assert_eq!(std::fs::read(env.path("deploy/app.jar")).unwrap(), original);
    // Staging state for the jar is gone
    assert!(!env.path("deploy/.classpatch").join("app.jar").exists());
}
