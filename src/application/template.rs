//! Page templates: `{% tag %}` blocks plus Handlebars text
//!
//! Tag blocks run in order against the context. Each block is replaced by a
//! placeholder that receives its output, then the whole text is rendered by
//! Handlebars so `{{ var }}` can use whatever the tags stored.

use crate::application::context::{Context, Value};
use crate::application::environment::Environment;
use crate::application::library::{Library, Node};
use crate::error::{Result, TagCloudError};
use handlebars::Handlebars;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const PAGE: &str = "page";

fn block_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)\{%\s*(.*?)\s*%\}").unwrap())
}

fn placeholder(index: usize) -> String {
    format!("tagcloud_output_{}", index)
}

/// A compiled page template
pub struct Template {
    nodes: Vec<Node>,
    hbs: Handlebars<'static>,
}

impl Template {
    /// Compile template text, validating every tag block
    pub fn compile(source: &str, library: &Library) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut text = String::with_capacity(source.len());
        let mut last = 0;

        for captures in block_regex().captures_iter(source) {
            let Some(block) = captures.get(0) else {
                continue;
            };
            let inner = &captures[1];
            let (name, args) = inner
                .split_once(char::is_whitespace)
                .unwrap_or((inner, ""));
            if name.is_empty() {
                return Err(TagCloudError::syntax("{% %}", "is an empty tag block"));
            }

            nodes.push(library.compile(name, args)?);
            text.push_str(&source[last..block.start()]);
            text.push_str(&format!("{{{{{{{}}}}}}}", placeholder(nodes.len() - 1)));
            last = block.end();
        }
        text.push_str(&source[last..]);

        let mut hbs = Handlebars::new();
        hbs.register_template_string(PAGE, text)
            .map_err(|e| TagCloudError::Template(e.to_string()))?;

        log::debug!("Compiled template with {} tags", nodes.len());
        Ok(Template { nodes, hbs })
    }

    pub fn from_file(path: &Path, library: &Library) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            TagCloudError::Template(format!(
                "Failed to read template {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::compile(&source, library)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Run the tags and render the page
    pub fn render(&self, env: &Environment, context: &mut Context) -> Result<String> {
        for (index, node) in self.nodes.iter().enumerate() {
            let output = node.render_with_policy(env, context)?;
            context.insert(placeholder(index), Value::Html(output));
        }

        let rendered = self
            .hbs
            .render(PAGE, &*context)
            .map_err(|e| TagCloudError::Template(e.to_string()));

        for index in 0..self.nodes.len() {
            context.remove(&placeholder(index));
        }
        rendered
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template").field("nodes", &self.nodes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{MemoryStore, Settings};

    const DATA: &str = r#"
[[content_types]]
model = "blog.entry"

[[models]]
identifier = "taggit.TaggedItem"

[[models.virtual_fields]]
name = "content_object"
kind = "generic_foreign_key"

[[tags]]
id = 1
name = "rust"

[[tags]]
id = 2
name = "c++"

[[objects]]
model = "blog.entry"
id = 1
label = "One"

[[tagged_items]]
tag = 1
object = "blog.entry:1"

[[tagged_items]]
tag = 2
object = "blog.entry:1"
"#;

    fn env() -> Environment {
        let store = MemoryStore::from_toml(DATA).unwrap();
        Environment::new(Settings::default(), Box::new(store)).unwrap()
    }

    #[test]
    fn test_compile_collects_nodes() {
        let template = Template::compile(
            "a {% get_tag_list as tags %} b {%include_tag_cloud%} c",
            &Library::default(),
        )
        .unwrap();
        assert_eq!(template.nodes().len(), 2);
        assert_eq!(template.nodes()[1].name(), "include_tag_cloud");
    }

    #[test]
    fn test_compile_surfaces_syntax_errors() {
        let err = Template::compile("{% get_tag_list limit 0 as tags %}", &Library::default())
            .unwrap_err();
        assert!(matches!(err, TagCloudError::TemplateSyntax { .. }));

        let err = Template::compile("{% %}", &Library::default()).unwrap_err();
        assert!(err.to_string().contains("empty tag block"));

        let err = Template::compile("{% now %}", &Library::default()).unwrap_err();
        assert!(err.to_string().contains("not a registered tag"));
    }

    #[test]
    fn test_compile_rejects_broken_handlebars() {
        let err = Template::compile("{{#each tags}}", &Library::default()).unwrap_err();
        assert!(matches!(err, TagCloudError::Template(_)));
    }

    #[test]
    fn test_render_uses_tag_results() {
        let template = Template::compile(
            "{% get_tag_list as tags %}{{#each tags}}[{{name}}:{{num_times}}]{{/each}}",
            &Library::default(),
        )
        .unwrap();
        let mut ctx = Context::new();
        let output = template.render(&env(), &mut ctx).unwrap();
        assert_eq!(output, "[c++:1][rust:1]");
        assert!(ctx.contains("tags"));
        assert!(!ctx.contains(&placeholder(0)));
    }

    #[test]
    fn test_inclusion_output_is_not_escaped() {
        let template =
            Template::compile("<main>{% include_tag_list %}</main>", &Library::default()).unwrap();
        let output = template.render(&env(), &mut Context::new()).unwrap();
        assert!(output.starts_with("<main><ul class=\"tag-list\">"));
        assert!(output.ends_with("</ul>\n</main>"));
    }

    #[test]
    fn test_multiline_block() {
        let template = Template::compile(
            "{% get_tag_cloud\n   for \"blog\"\n   as cloud %}{{#each cloud}}[{{weight}}]{{/each}}",
            &Library::default(),
        )
        .unwrap();
        let output = template.render(&env(), &mut Context::new()).unwrap();
        assert_eq!(output, "[6.0][6.0]");
    }
}
