//! Similar objects use case

use crate::application::environment::Environment;
use crate::domain::{ContentObject, ContentType, SimilarObject, SimilarQuery};
use crate::error::{Result, TagCloudError};

/// Service for finding objects that share tags with a source object
pub struct SimilarObjectsService<'a> {
    env: &'a Environment,
}

impl<'a> SimilarObjectsService<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Objects sharing tags with `source`, most shared tags first
    ///
    /// Without a target model the store's own similarity lookup is used.
    pub fn execute(
        &self,
        source: &ContentObject,
        model: Option<&ContentType>,
        limit: Option<usize>,
    ) -> Result<Vec<SimilarObject>> {
        let store = self.env.store();
        let direct_target = self.env.direct_target();

        let Some(model) = model else {
            return store.similar_objects(&source.reference, direct_target, limit);
        };

        let registry = store.registry();
        if !registry.contains(model) {
            return Err(TagCloudError::Lookup(format!(
                "No model '{}' is registered",
                model
            )));
        }

        let tags = store.tags_for(&source.reference, direct_target)?;
        log::debug!(
            "Looking for {} objects sharing {} tags with {}",
            model,
            tags.len(),
            source.reference
        );

        let query = SimilarQuery::new(tags.iter().map(|t| t.id))
            .for_content_type(model.clone())
            .excluding(source.reference.clone())
            .with_limit(limit);

        let ranked = store.rank_similar(&query, direct_target)?;
        Ok(registry.resolve_ranked(ranked))
    }
}
