use assert_cmd::Command;
use std::fs;
use std::path::Path;

#[allow(dead_code)]
pub const GENERIC_DATA: &str = r#"
[[content_types]]
model = "blog.entry"

[[content_types]]
model = "shop.product"

[[models]]
identifier = "taggit.TaggedItem"

[[models.fields]]
name = "tag"
kind = "foreign_key"
to = "taggit.tag"
related_name = "taggit_taggeditem_items"

[[models.virtual_fields]]
name = "content_object"
kind = "generic_foreign_key"

[[tags]]
id = 1
name = "rust"

[[tags]]
id = 2
name = "python"

[[tags]]
id = 3
name = "wasm"

[[objects]]
model = "blog.entry"
id = 1
label = "Ownership explained"

[[objects]]
model = "blog.entry"
id = 2
label = "Borrowing in practice"

[[objects]]
model = "blog.entry"
id = 3
label = "Scripting with Python"

[[objects]]
model = "shop.product"
id = 1
label = "Rust book"

[[tagged_items]]
tag = 1
object = "blog.entry:1"

[[tagged_items]]
tag = 3
object = "blog.entry:1"

[[tagged_items]]
tag = 1
object = "blog.entry:2"

[[tagged_items]]
tag = 3
object = "blog.entry:2"

[[tagged_items]]
tag = 2
object = "blog.entry:3"

[[tagged_items]]
tag = 1
object = "shop.product:1"
"#;

pub fn tagcloud_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tagcloud").unwrap();
    cmd.env_remove("TAGCLOUD_DATA");
    cmd.env_remove("TAGCLOUD_SETTINGS");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[allow(dead_code)]
pub fn write_data(dir: &Path, contents: &str) {
    fs::write(dir.join("tagging.toml"), contents).unwrap();
}

#[allow(dead_code)]
pub fn write_settings(dir: &Path, contents: &str) {
    fs::write(dir.join("tagcloud.toml"), contents).unwrap();
}
