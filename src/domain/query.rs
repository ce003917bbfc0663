//! Tag-count queries
//!
//! A `TagCountQuery` describes which through rows to aggregate. Stores
//! execute it; `aggregate` is the reference execution over in-memory rows.

use crate::domain::model::{ContentType, ObjectRef, Tag, TagCount, TagId, TaggedItem};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCountQuery {
    /// Only count rows pointing at these content types
    pub content_types: Option<BTreeSet<ContentType>>,
    /// Only count rows pointing at these objects
    pub objects: Option<BTreeSet<ObjectRef>>,
    pub limit: Option<usize>,
}

impl TagCountQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_content_types(mut self, content_types: impl IntoIterator<Item = ContentType>) -> Self {
        self.content_types = Some(content_types.into_iter().collect());
        self
    }

    pub fn with_objects(mut self, objects: impl IntoIterator<Item = ObjectRef>) -> Self {
        self.objects = Some(objects.into_iter().collect());
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Whether a row pointing at `reference` is counted
    pub fn admits(&self, reference: &ObjectRef) -> bool {
        self.content_types
            .as_ref()
            .map_or(true, |types| types.contains(&reference.content_type))
            && self
                .objects
                .as_ref()
                .map_or(true, |objects| objects.contains(reference))
    }

    /// Count matching rows per tag
    ///
    /// `direct_target` is the content type of a model-specific relation; rows
    /// of such a relation carry only an object id. Tags without matching rows
    /// are left out.
    pub fn aggregate<'a>(
        &self,
        tags: impl IntoIterator<Item = &'a Tag>,
        items: impl IntoIterator<Item = &'a TaggedItem>,
        direct_target: Option<&ContentType>,
    ) -> Vec<TagCount> {
        let mut num_times: HashMap<TagId, u64> = HashMap::new();
        for item in items {
            let Some(reference) = item.object_ref(direct_target) else {
                continue;
            };
            if self.admits(&reference) {
                *num_times.entry(item.tag_id).or_default() += 1;
            }
        }

        let mut counts: Vec<TagCount> = tags
            .into_iter()
            .filter_map(|tag| {
                num_times.get(&tag.id).map(|&n| TagCount {
                    tag: tag.clone(),
                    num_times: n,
                })
            })
            .collect();

        order_by_count(&mut counts);
        if let Some(limit) = self.limit {
            counts.truncate(limit);
        }
        counts
    }
}

/// Most used first; ties by name
pub fn order_by_count(counts: &mut [TagCount]) {
    counts.sort_by(|a, b| {
        b.num_times
            .cmp(&a.num_times)
            .then_with(|| a.tag.name.cmp(&b.tag.name))
    });
}
