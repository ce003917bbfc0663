//! Integration tests for the tags and cloud commands

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{tagcloud_cmd, write_data, GENERIC_DATA};

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), GENERIC_DATA);
    temp
}

fn stdout_lines(temp: &TempDir, args: &[&str]) -> Vec<String> {
    let output = tagcloud_cmd()
        .current_dir(temp.path())
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| l.trim_end().to_string())
        .collect()
}

#[test]
fn test_tags_ordered_by_count() {
    let temp = setup();
    let lines = stdout_lines(&temp, &["tags"]);
    assert_eq!(lines, vec!["rust    3", "wasm    2", "python  1"]);
}

#[test]
fn test_tags_for_model_with_limit() {
    let temp = setup();
    let lines = stdout_lines(&temp, &["tags", "--for", "blog.entry", "--limit", "1"]);
    assert_eq!(lines, vec!["rust  2"]);
}

#[test]
fn test_tags_for_unknown_app_is_empty() {
    let temp = setup();
    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["tags", "--for", "forum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));
}

#[test]
fn test_tags_for_unknown_model_fails() {
    let temp = setup();
    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["tags", "--for", "blog.post"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("blog.post"));
}

#[test]
fn test_cloud_weights() {
    let temp = setup();
    let lines = stdout_lines(&temp, &["cloud"]);
    assert_eq!(
        lines,
        vec!["python  1.00  (1)", "rust    6.00  (3)", "wasm    3.50  (2)"]
    );
}

#[test]
fn test_cloud_equal_frequencies_get_max_weight() {
    let temp = setup();
    let lines = stdout_lines(&temp, &["cloud", "--for", "shop"]);
    assert_eq!(lines, vec!["rust  6.00  (1)"]);
}

#[test]
fn test_data_flag_and_env() {
    let temp = setup();
    let elsewhere = TempDir::new().unwrap();
    let data = temp.path().join("tagging.toml");

    tagcloud_cmd()
        .current_dir(elsewhere.path())
        .arg("--data")
        .arg(&data)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("rust"));

    tagcloud_cmd()
        .current_dir(elsewhere.path())
        .env("TAGCLOUD_DATA", &data)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("rust"));
}

#[test]
fn test_missing_data_file() {
    let temp = TempDir::new().unwrap();
    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("tags")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("TAGCLOUD_DATA"));
}

#[test]
fn test_zero_limit_rejected() {
    let temp = setup();
    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["tags", "--limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a positive integer"));
}
