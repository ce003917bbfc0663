//! Template tag library
//!
//! Maps tag names to compilers. Compiling validates the arguments, so syntax
//! errors surface before anything is rendered.

use crate::application::args::{
    parse_include_args, split_args, SimilarArgs, SourceArg, TagListArgs, Token,
};
use crate::application::context::{Context, Value};
use crate::application::environment::Environment;
use crate::application::similar_objects::SimilarObjectsService;
use crate::application::tag_cloud::TagCloudService;
use crate::application::tag_list::{TagListService, TagSource};
use crate::error::{Result, TagCloudError};
use crate::infrastructure::partials::{PartialContext, TAGCLOUD_PARTIAL, TAGLIST_PARTIAL};
use std::collections::BTreeMap;

/// A compiled template tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    TagList(TagListArgs),
    TagCloud(TagListArgs),
    SimilarObjects(SimilarArgs),
    IncludeTagList(Option<SourceArg>),
    IncludeTagCloud(Option<SourceArg>),
}

type CompileFn = fn(&str, &[Token]) -> Result<Node>;

fn compile_tag_list(tag: &str, tokens: &[Token]) -> Result<Node> {
    TagListArgs::parse(tag, tokens).map(Node::TagList)
}

fn compile_tag_cloud(tag: &str, tokens: &[Token]) -> Result<Node> {
    TagListArgs::parse(tag, tokens).map(Node::TagCloud)
}

fn compile_similar_objects(tag: &str, tokens: &[Token]) -> Result<Node> {
    SimilarArgs::parse(tag, tokens).map(Node::SimilarObjects)
}

fn compile_include_tag_list(tag: &str, tokens: &[Token]) -> Result<Node> {
    parse_include_args(tag, tokens).map(Node::IncludeTagList)
}

fn compile_include_tag_cloud(tag: &str, tokens: &[Token]) -> Result<Node> {
    parse_include_args(tag, tokens).map(Node::IncludeTagCloud)
}

/// Registered template tags
#[derive(Clone)]
pub struct Library {
    tags: BTreeMap<&'static str, CompileFn>,
}

impl Default for Library {
    fn default() -> Self {
        let mut library = Library {
            tags: BTreeMap::new(),
        };
        library.register("get_tag_list", compile_tag_list);
        library.register("get_taglist", compile_tag_list);
        library.register("get_tag_cloud", compile_tag_cloud);
        library.register("get_tagcloud", compile_tag_cloud);
        library.register("get_similar_objects", compile_similar_objects);
        library.register("include_tag_list", compile_include_tag_list);
        library.register("include_taglist", compile_include_tag_list);
        library.register("include_tag_cloud", compile_include_tag_cloud);
        library.register("include_tagcloud", compile_include_tag_cloud);
        library
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Library {
    pub fn register(&mut self, name: &'static str, compile: CompileFn) {
        self.tags.insert(name, compile);
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tags.keys().copied()
    }

    /// Compile one tag from its name and raw argument string
    pub fn compile(&self, name: &str, raw_args: &str) -> Result<Node> {
        let compile = self
            .tags
            .get(name)
            .ok_or_else(|| TagCloudError::syntax(name, "is not a registered tag"))?;
        let tokens = split_args(name, raw_args)?;
        compile(name, &tokens)
    }
}

impl Node {
    pub fn name(&self) -> &'static str {
        match self {
            Node::TagList(_) => "get_tag_list",
            Node::TagCloud(_) => "get_tag_cloud",
            Node::SimilarObjects(_) => "get_similar_objects",
            Node::IncludeTagList(_) => "include_tag_list",
            Node::IncludeTagCloud(_) => "include_tag_cloud",
        }
    }

    /// Run the tag: store its result in the context and return its output
    ///
    /// The target variable is only written once the tag has succeeded.
    pub fn render(&self, env: &Environment, context: &mut Context) -> Result<String> {
        match self {
            Node::TagList(args) => {
                let source = TagSource::resolve(args.source.as_ref(), context)?;
                let tags = TagListService::new(env).execute(&source, args.limit)?;
                context.insert(args.target.clone(), Value::Tags(tags));
                Ok(String::new())
            }
            Node::TagCloud(args) => {
                let source = TagSource::resolve(args.source.as_ref(), context)?;
                let cloud = TagCloudService::new(env).execute(&source, args.limit)?;
                context.insert(args.target.clone(), Value::Cloud(cloud));
                Ok(String::new())
            }
            Node::SimilarObjects(args) => {
                let source = match context.lookup(&args.object)? {
                    Value::Object(object) => object.clone(),
                    other => {
                        return Err(TagCloudError::Render(format!(
                            "'{}' is a {}, expected a tagged object",
                            args.object,
                            other.type_name()
                        )))
                    }
                };
                let similar =
                    SimilarObjectsService::new(env).execute(&source, args.model.as_ref(), None)?;
                context.insert(args.target.clone(), Value::Similar(similar));
                Ok(String::new())
            }
            Node::IncludeTagList(arg) => {
                let source = TagSource::resolve(arg.as_ref(), context)?;
                let tags = TagListService::new(env).execute(&source, None)?;
                env.partials().render(
                    TAGLIST_PARTIAL,
                    &PartialContext {
                        forvar: forvar(arg.as_ref()),
                        tags: &tags,
                    },
                )
            }
            Node::IncludeTagCloud(arg) => {
                let source = TagSource::resolve(arg.as_ref(), context)?;
                let cloud = TagCloudService::new(env).execute(&source, None)?;
                env.partials().render(
                    TAGCLOUD_PARTIAL,
                    &PartialContext {
                        forvar: forvar(arg.as_ref()),
                        tags: &cloud,
                    },
                )
            }
        }
    }

    /// Render under the configured failure policy
    ///
    /// With `silent_failures` set, a render-time error is logged and the tag
    /// produces nothing, leaving its target variable unset.
    pub fn render_with_policy(&self, env: &Environment, context: &mut Context) -> Result<String> {
        match self.render(env, context) {
            Err(e) if env.settings().render.silent_failures && e.is_render_time() => {
                log::warn!("{} failed, rendering nothing: {}", self.name(), e);
                Ok(String::new())
            }
            result => result,
        }
    }
}

fn forvar(arg: Option<&SourceArg>) -> Option<&str> {
    arg.map(|arg| match arg {
        SourceArg::Literal { raw, .. } | SourceArg::Variable(raw) => raw.as_str(),
    })
}
