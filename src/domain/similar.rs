//! Ranking of objects that share tags with a source object

use crate::domain::model::{ContentType, ObjectRef, TagId, TaggedItem};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarQuery {
    /// Tags of the source object
    pub tags: BTreeSet<TagId>,
    /// Restrict candidates to one content type
    pub content_type: Option<ContentType>,
    /// The source itself, never its own neighbour
    pub exclude: Option<ObjectRef>,
    pub limit: Option<usize>,
}

impl SimilarQuery {
    pub fn new(tags: impl IntoIterator<Item = TagId>) -> Self {
        SimilarQuery {
            tags: tags.into_iter().collect(),
            content_type: None,
            exclude: None,
            limit: None,
        }
    }

    pub fn for_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn excluding(mut self, source: ObjectRef) -> Self {
        self.exclude = Some(source);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Group matching rows by object and count shared tags
    ///
    /// Ordered by shared count descending, then by object reference.
    pub fn rank<'a>(
        &self,
        items: impl IntoIterator<Item = &'a TaggedItem>,
        direct_target: Option<&ContentType>,
    ) -> Vec<(ObjectRef, u64)> {
        let mut shared: HashMap<ObjectRef, u64> = HashMap::new();
        for item in items {
            if !self.tags.contains(&item.tag_id) {
                continue;
            }
            let Some(reference) = item.object_ref(direct_target) else {
                continue;
            };
            if self.exclude.as_ref() == Some(&reference) {
                continue;
            }
            if self
                .content_type
                .as_ref()
                .is_some_and(|ct| *ct != reference.content_type)
            {
                continue;
            }
            *shared.entry(reference).or_default() += 1;
        }

        let mut ranked: Vec<(ObjectRef, u64)> = shared.into_iter().collect();
        ranked.sort_by(|(ra, na), (rb, nb)| nb.cmp(na).then_with(|| ra.cmp(rb)));
        if let Some(limit) = self.limit {
            ranked.truncate(limit);
        }
        ranked
    }
}
