/*!
 * Integration tests for the dropcat binary
 */

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn dropcat(prefs: &Path, args: &[&str]) -> Output {
    // Placed last so it also reaches subcommands
    Command::new(env!("CARGO_BIN_EXE_dropcat"))
        .args(args)
        .arg("--prefs")
        .arg(prefs)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_batch_to_stdout_with_binary_warning() {
    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let text = temp_dir.path().join("foo.txt");
    let binary = temp_dir.path().join("blob.bin");
    fs::write(&text, "bar").unwrap();
    fs::write(&binary, [0xffu8, 0xfe, 0x00]).unwrap();

    let output = dropcat(
        &prefs,
        &[text.to_str().unwrap(), binary.to_str().unwrap()],
    );

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "foo.txt:\n```\nbar\n```\n"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!(
        "warning: '{}' is binary or could not be processed",
        binary.display()
    )));
    // Nothing is persisted without --save-prefs
    assert!(!prefs.exists());
}

#[test]
fn test_output_file_with_prompt_and_append() {
    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let input = temp_dir.path().join("foo.txt");
    let saved = temp_dir.path().join("out.md");
    fs::write(&input, "bar").unwrap();
    fs::write(&saved, "earlier").unwrap();

    let output = dropcat(
        &prefs,
        &[
            "--quiet",
            "--format",
            "xml",
            "--prompt",
            "Review this",
            "--append",
            "-o",
            saved.to_str().unwrap(),
            input.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&saved).unwrap(),
        "earlier\nReview this\n\n<foo.txt>\nbar\n</foo.txt>"
    );
}

#[test]
fn test_saved_preferences_apply_to_next_run() {
    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let input = temp_dir.path().join("main.py");
    fs::write(&input, "pass").unwrap();

    let first = dropcat(
        &prefs,
        &["--quiet", "--add-language=false", "--save-prefs", input.to_str().unwrap()],
    );
    assert!(first.status.success());
    assert!(prefs.exists());

    let second = dropcat(&prefs, &[input.to_str().unwrap()]);
    assert_eq!(
        String::from_utf8_lossy(&second.stdout),
        "main.py:\n```\npass\n```\n"
    );
}

#[test]
fn test_ignored_subcommand_edits_stored_list() {
    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let root = temp_dir.path().join("proj");
    fs::create_dir_all(root.join("vendor").join("lib")).unwrap();
    fs::write(root.join("vendor").join("lib").join("x.c"), "int x;").unwrap();

    assert!(dropcat(&prefs, &["ignored", "add", "vendor"]).status.success());

    let listed = dropcat(&prefs, &["ignored", "list"]);
    assert!(String::from_utf8_lossy(&listed.stdout)
        .lines()
        .any(|line| line == "vendor"));

    let tree = dropcat(&prefs, &[root.to_str().unwrap()]);
    assert_eq!(
        String::from_utf8_lossy(&tree.stdout),
        "proj\n└── vendor\n    ...\n"
    );

    assert!(dropcat(&prefs, &["ignored", "reset"]).status.success());
    let tree = dropcat(&prefs, &[root.to_str().unwrap()]);
    assert!(String::from_utf8_lossy(&tree.stdout).contains("x.c"));
}

#[test]
fn test_invalid_project_root_fails() {
    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let input = temp_dir.path().join("foo.txt");
    fs::write(&input, "bar").unwrap();

    let output = dropcat(
        &prefs,
        &["--project-root", "a/b", input.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_failed_save_still_prints() {
    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let input = temp_dir.path().join("foo.txt");
    fs::write(&input, "bar").unwrap();
    let unwritable = temp_dir.path().join("no").join("such").join("out.md");

    let output = dropcat(
        &prefs,
        &["-o", unwritable.to_str().unwrap(), input.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "foo.txt:\n```\nbar\n```\n"
    );
    assert!(!unwritable.exists());
}

#[test]
fn test_no_paths_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let output = dropcat(&temp_dir.path().join("prefs.json"), &[]);
    assert!(!output.status.success());
}

#[test]
#[ignore] // Needs a running tmux session
          // To run this test manually use: cargo test --test cli_integration -- --ignored
fn test_clip_flag() {
    if std::env::var("TMUX").is_err() {
        return;
    }

    let temp_dir = tempdir().unwrap();
    let prefs = temp_dir.path().join("prefs.json");
    let input = temp_dir.path().join("foo.txt");
    fs::write(&input, "bar").unwrap();

    let output = dropcat(&prefs, &["--clip", "--quiet", input.to_str().unwrap()]);
    assert!(output.status.success());

    let clipboard = Command::new("tmux").args(["show-buffer"]).output().unwrap();
    assert_eq!(
        String::from_utf8_lossy(&clipboard.stdout),
        "foo.txt:\n```\nbar\n```"
    );
}
