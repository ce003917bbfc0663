//! Registry resolving polymorphic references to content objects

use crate::domain::model::{ContentObject, ContentType, ObjectId, ObjectRef, SimilarObject};
use crate::error::{Result, TagCloudError};
use std::collections::BTreeMap;

/// Loads the objects of one content type
pub trait ContentLoader {
    fn load(&self, id: ObjectId) -> Option<ContentObject>;

    fn all(&self) -> Vec<ContentObject>;
}

/// Loader over a fixed table of objects
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    rows: BTreeMap<ObjectId, ContentObject>,
}

impl TableLoader {
    pub fn new(rows: impl IntoIterator<Item = ContentObject>) -> Self {
        TableLoader {
            rows: rows.into_iter().map(|o| (o.id(), o)).collect(),
        }
    }
}

impl ContentLoader for TableLoader {
    fn load(&self, id: ObjectId) -> Option<ContentObject> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<ContentObject> {
        self.rows.values().cloned().collect()
    }
}

struct Registration {
    loader: Box<dyn ContentLoader>,
    tag_field: String,
}

/// Maps content type discriminators to their loaders
#[derive(Default)]
pub struct ContentRegistry {
    entries: BTreeMap<ContentType, Registration>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type with its loader and the name of its tag field
    pub fn register(
        &mut self,
        content_type: ContentType,
        tag_field: &str,
        loader: Box<dyn ContentLoader>,
    ) {
        self.entries.insert(
            content_type,
            Registration {
                loader,
                tag_field: tag_field.to_string(),
            },
        );
    }

    pub fn contains(&self, content_type: &ContentType) -> bool {
        self.entries.contains_key(content_type)
    }

    pub fn content_types(&self) -> impl Iterator<Item = &ContentType> {
        self.entries.keys()
    }

    pub fn tag_field(&self, content_type: &ContentType) -> Option<&str> {
        self.entries
            .get(content_type)
            .map(|entry| entry.tag_field.as_str())
    }

    /// Resolve a reference to its object
    pub fn resolve(&self, reference: &ObjectRef) -> Result<ContentObject> {
        let entry = self.entries.get(&reference.content_type).ok_or_else(|| {
            TagCloudError::Lookup(format!("No model registered for '{}'", reference.content_type))
        })?;
        entry.loader.load(reference.object_id).ok_or_else(|| {
            TagCloudError::Lookup(format!("Object '{}' does not exist", reference))
        })
    }

    /// Resolve ranked references, leaving out the ones that no longer exist
    pub fn resolve_ranked(&self, ranked: Vec<(ObjectRef, u64)>) -> Vec<SimilarObject> {
        ranked
            .into_iter()
            .filter_map(|(reference, similar_tags)| match self.resolve(&reference) {
                Ok(object) => Some(SimilarObject {
                    object,
                    similar_tags,
                }),
                Err(e) => {
                    log::debug!("Skipping {}: {}", reference, e);
                    None
                }
            })
            .collect()
    }

    /// All objects of a content type
    pub fn objects(&self, content_type: &ContentType) -> Result<Vec<ContentObject>> {
        self.entries
            .get(content_type)
            .map(|entry| entry.loader.all())
            .ok_or_else(|| TagCloudError::Lookup(format!("No model registered for '{}'", content_type)))
    }
}

impl std::fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}
