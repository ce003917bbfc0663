//! Tag list use case
//!
//! Builds a tag-count query for the requested scope, branching on whether
//! the through relation is generic or model-specific, and runs it.

use crate::application::args::SourceArg;
use crate::application::context::{Context, Value};
use crate::application::environment::Environment;
use crate::domain::{ContentType, ObjectRef, Scope, TagCount, TagCountQuery, TaggingKind};
use crate::error::{Result, TagCloudError};

/// What a tag list is restricted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSource {
    All,
    Scope(Scope),
    /// An explicit set of candidate objects
    Objects(Vec<ObjectRef>),
}

impl TagSource {
    /// Resolve a `for` argument against the render context
    pub fn resolve(arg: Option<&SourceArg>, context: &Context) -> Result<Self> {
        match arg {
            None => Ok(TagSource::All),
            Some(SourceArg::Literal { scope, .. }) => Ok(TagSource::Scope(scope.clone())),
            Some(SourceArg::Variable(name)) => match context.lookup(name)? {
                Value::Str(raw) => Ok(TagSource::Scope(Scope::parse(raw)?)),
                Value::Objects(objects) => Ok(TagSource::Objects(
                    objects.iter().map(|o| o.reference.clone()).collect(),
                )),
                Value::Similar(similar) => Ok(TagSource::Objects(
                    similar.iter().map(|s| s.object.reference.clone()).collect(),
                )),
                other => Err(TagCloudError::Render(format!(
                    "'{}' is a {}, expected a scope string or a collection of objects",
                    name,
                    other.type_name()
                ))),
            },
        }
    }
}

/// Service for listing tags with usage counts
pub struct TagListService<'a> {
    env: &'a Environment,
}

impl<'a> TagListService<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Build the query for a source
    ///
    /// Returns `None` when the result is known to be empty without asking
    /// the store: a model-specific relation scoped to some other model.
    pub fn build_query(
        &self,
        source: &TagSource,
        limit: Option<usize>,
    ) -> Result<Option<TagCountQuery>> {
        let limit = limit.or(self.env.settings().default_limit);
        let query = TagCountQuery::all().with_limit(limit);
        let registry = self.env.store().registry();

        let query = match (source, self.env.kind()) {
            (TagSource::All, _) => query,

            (TagSource::Scope(scope), TaggingKind::Generic) => {
                let content_types: Vec<ContentType> = match scope.content_type() {
                    Some(content_type) => {
                        if !registry.contains(&content_type) {
                            return Err(TagCloudError::Lookup(format!(
                                "No model '{}' is registered",
                                content_type
                            )));
                        }
                        self.check_tag_field(scope, &content_type)?;
                        vec![content_type]
                    }
                    None => registry
                        .content_types()
                        .filter(|ct| scope.matches(ct))
                        .cloned()
                        .collect(),
                };
                query.with_content_types(content_types)
            }

            (TagSource::Scope(scope), TaggingKind::ModelSpecific { target }) => {
                if !scope.matches(target) {
                    log::debug!("Scope '{}' doesn't cover {}, nothing to count", scope, target);
                    return Ok(None);
                }
                self.check_tag_field(scope, target)?;
                query.with_content_types([target.clone()])
            }

            (TagSource::Objects(objects), TaggingKind::Generic) => {
                query.with_objects(objects.iter().cloned())
            }

            (TagSource::Objects(objects), TaggingKind::ModelSpecific { target }) => query
                .with_objects(
                    objects
                        .iter()
                        .filter(|o| o.content_type == *target)
                        .cloned(),
                ),
        };

        Ok(Some(query))
    }

    /// A scope naming a tag field must name the one the model has
    fn check_tag_field(&self, scope: &Scope, content_type: &ContentType) -> Result<()> {
        let Some(requested) = scope.tag_field.as_deref() else {
            return Ok(());
        };
        let actual = self.env.store().registry().tag_field(content_type);
        if actual.is_some_and(|actual| actual != requested) {
            return Err(TagCloudError::Lookup(format!(
                "Model '{}' has no tag field '{}'",
                content_type, requested
            )));
        }
        Ok(())
    }

    /// Execute tag listing for a source
    pub fn execute(&self, source: &TagSource, limit: Option<usize>) -> Result<Vec<TagCount>> {
        match self.build_query(source, limit)? {
            Some(query) => self
                .env
                .store()
                .count_tags(&query, self.env.direct_target()),
            None => Ok(Vec::new()),
        }
    }
}
