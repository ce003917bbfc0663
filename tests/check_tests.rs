//! Integration tests for classifying the through model

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{tagcloud_cmd, write_data, write_settings, GENERIC_DATA};

const MODEL_SPECIFIC_DATA: &str = r#"
[[content_types]]
model = "blog.entry"

[[models]]
identifier = "blog.TaggedEntry"

[[models.fields]]
name = "content_object"
kind = "foreign_key"
to = "blog.entry"

[[tags]]
id = 1
name = "rust"

[[tags]]
id = 2
name = "go"

[[objects]]
model = "blog.entry"
id = 1
label = "One"

[[tagged_items]]
tag = 1
object_id = 1

[[tagged_items]]
tag = 2
object_id = 1

[[tagged_items]]
tag = 1
object_id = 2
"#;

const BROKEN_DATA: &str = r#"
[[models]]
identifier = "taggit.TaggedItem"

[[models.fields]]
name = "content_object"
kind = "other"
"#;

#[test]
fn test_check_generic() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), GENERIC_DATA);

    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("through model: taggit.TaggedItem"))
        .stdout(predicate::str::contains("tagging: generic"))
        .stdout(predicate::str::contains("tag relation: taggit_taggeditem_items"));
}

#[test]
fn test_check_model_specific() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), MODEL_SPECIFIC_DATA);
    write_settings(temp.path(), "tagged_item_model = \"blog.TaggedEntry\"\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagging: model-specific (blog.entry)"));
}

#[test]
fn test_model_specific_scope_outside_target_is_empty() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), MODEL_SPECIFIC_DATA);
    write_settings(temp.path(), "tagged_item_model = \"blog.TaggedEntry\"\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["tags", "--for", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found"));

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["tags", "--for", "blog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rust  2"));
}

#[test]
fn test_invalid_through_model() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), BROKEN_DATA);

    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("doesn't seem to be a valid through model"));
}

#[test]
fn test_undeclared_through_model() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), GENERIC_DATA);
    write_settings(temp.path(), "tagged_item_model = \"blog.Missing\"\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("blog.Missing"));
}

#[test]
fn test_related_name_falls_back_to_default() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), GENERIC_DATA);
    write_settings(temp.path(), "tag_field_related_name = \"entry_tags\"\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("tag relation: taggit_taggeditem_items"));
}

#[test]
fn test_invalid_weight_settings() {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), GENERIC_DATA);
    write_settings(temp.path(), "[cloud]\nmin_weight = 5.0\nmax_weight = 2.0\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("min_weight = 1.0"));
}
