//! Integration tests for rendering templates

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{tagcloud_cmd, write_data, write_settings, GENERIC_DATA};

fn setup(template: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    write_data(temp.path(), GENERIC_DATA);
    fs::write(temp.path().join("page.html"), template).unwrap();
    temp
}

#[test]
fn test_render_tag_cloud_variable() {
    let temp = setup(
        "{% get_tag_cloud for \"blog\" as cloud %}{{#each cloud}}{{name}}={{weight}};{{/each}}",
    );

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html"])
        .assert()
        .success()
        .stdout("python=1.0;rust=6.0;wasm=6.0;");
}

#[test]
fn test_render_tag_list_for_bound_scope() {
    let temp = setup(
        "{% get_tag_list for scope limit 2 as tags %}{{#each tags}}{{name}}:{{num_times}} {{/each}}",
    );

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html", "--set", "scope=blog.entry"])
        .assert()
        .success()
        .stdout("rust:2 wasm:2 ");
}

#[test]
fn test_render_similar_objects() {
    let temp = setup(
        "{% get_similar_objects to entry as related %}{{#each related}}{{label}} ({{similar_tags}}); {{/each}}",
    );

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html", "--bind", "entry=blog.entry:1"])
        .assert()
        .success()
        .stdout("Borrowing in practice (2); Rust book (1); ");
}

#[test]
fn test_render_similar_objects_for_model() {
    let temp = setup(
        "{% get_similar_objects to entry as related for shop.product %}{{#each related}}{{label}}{{/each}}",
    );

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html", "--bind", "entry=blog.entry:2"])
        .assert()
        .success()
        .stdout("Rust book");
}

#[test]
fn test_render_include_tag_list_for_objects() {
    let temp = setup("{% include_tag_list entries %}");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html", "--bind-all", "entries=shop.product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<ul class=\"tag-list\">"))
        .stdout(predicate::str::contains(">rust</a> (1)"))
        .stdout(predicate::str::contains("python").not());
}

#[test]
fn test_render_custom_partial() {
    let temp = setup("{% include_tag_cloud \"shop\" %}");
    let partials = temp.path().join("partials");
    fs::create_dir(&partials).unwrap();
    fs::write(
        partials.join("tagcloud_include.html"),
        "{{forvar}}:{{#each tags}}{{name}}/{{weight}}{{/each}}",
    )
    .unwrap();
    write_settings(temp.path(), "templates_dir = \"partials\"\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html"])
        .assert()
        .success()
        .stdout("shop:rust/6.0");
}

#[test]
fn test_render_syntax_error() {
    let temp = setup("{% get_tag_list limit 0 as tags %}");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("get_tag_list"))
        .stderr(predicate::str::contains("Valid forms"));
}

#[test]
fn test_render_missing_as_clause() {
    let temp = setup("{% get_tag_cloud for \"blog\" %}");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html"])
        .assert()
        .code(2);
}

#[test]
fn test_render_fails_loudly_by_default() {
    let temp = setup("before{% get_tag_list for \"blog.post\" as tags %}after");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("blog.post"));
}

#[test]
fn test_render_silent_failures() {
    let temp = setup("before{% get_tag_list for \"blog.post\" as tags %}after{{#if tags}}!{{/if}}");
    write_settings(temp.path(), "[render]\nsilent_failures = true\n");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "page.html"])
        .assert()
        .success()
        .stdout("beforeafter")
        .stderr(predicate::str::contains("get_tag_list failed"));
}

#[test]
fn test_render_missing_template() {
    let temp = setup("");

    tagcloud_cmd()
        .current_dir(temp.path())
        .args(["render", "nope.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found"));
}
