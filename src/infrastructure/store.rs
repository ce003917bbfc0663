//! Tagging data stores

use crate::domain::relation::ModelMeta;
use crate::domain::{
    ContentLink, ContentObject, ContentRegistry, ContentType, ObjectId, ObjectRef, SimilarObject,
    SimilarQuery, TableLoader, Tag, TagCount, TagCountQuery, TagId, TaggedItem,
};
use crate::error::{Result, TagCloudError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no data path is given
pub const DATA_FILE: &str = "tagging.toml";

/// Environment variable naming a data file
pub const DATA_ENV: &str = "TAGCLOUD_DATA";

/// Query execution over tags, tagged items and content
///
/// `direct_target` is the content type of a model-specific through relation,
/// `None` for a generic one.
pub trait TagStore {
    /// Declared shape of a model, by identifier such as `taggit.TaggedItem`
    fn model_meta(&self, identifier: &str) -> Option<&ModelMeta>;

    fn registry(&self) -> &ContentRegistry;

    /// Rows of the through relation
    fn tagged_items(&self) -> &[TaggedItem];

    /// Tags annotated with usage counts
    fn count_tags(
        &self,
        query: &TagCountQuery,
        direct_target: Option<&ContentType>,
    ) -> Result<Vec<TagCount>>;

    /// Tags attached to one object
    fn tags_for(&self, object: &ObjectRef, direct_target: Option<&ContentType>) -> Result<Vec<Tag>>;

    /// Objects sharing tags with a source, with the shared count
    fn rank_similar(
        &self,
        query: &SimilarQuery,
        direct_target: Option<&ContentType>,
    ) -> Result<Vec<(ObjectRef, u64)>>;

    /// The store's own notion of similar objects, over every content type
    fn similar_objects(
        &self,
        source: &ObjectRef,
        direct_target: Option<&ContentType>,
        limit: Option<usize>,
    ) -> Result<Vec<SimilarObject>> {
        let tags = self.tags_for(source, direct_target)?;
        let query = SimilarQuery::new(tags.iter().map(|t| t.id))
            .excluding(source.clone())
            .with_limit(limit);
        let ranked = self.rank_similar(&query, direct_target)?;
        Ok(self.registry().resolve_ranked(ranked))
    }
}

impl std::fmt::Debug for dyn TagStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagStore")
            .field("registry", self.registry())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct RawContentType {
    model: ContentType,
    #[serde(default = "default_tag_field")]
    tag_field: String,
}

fn default_tag_field() -> String {
    crate::domain::scope::DEFAULT_TAG_FIELD.to_string()
}

#[derive(Debug, Deserialize)]
struct RawTag {
    id: TagId,
    name: String,
    slug: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    model: ContentType,
    id: ObjectId,
    label: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

/// A through row: `object = "app.model:id"` for generic relations,
/// `object_id = id` for model-specific ones
#[derive(Debug, Deserialize)]
struct RawTaggedItem {
    tag: TagId,
    object: Option<String>,
    object_id: Option<ObjectId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DataFile {
    content_types: Vec<RawContentType>,
    tags: Vec<RawTag>,
    objects: Vec<RawObject>,
    models: Vec<ModelMeta>,
    tagged_items: Vec<RawTaggedItem>,
}

/// Read-only store holding everything in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    models: Vec<ModelMeta>,
    tags: Vec<Tag>,
    items: Vec<TaggedItem>,
    registry: ContentRegistry,
}

impl MemoryStore {
    pub fn new(
        models: Vec<ModelMeta>,
        tags: Vec<Tag>,
        items: Vec<TaggedItem>,
        registry: ContentRegistry,
    ) -> Self {
        MemoryStore {
            models,
            tags,
            items,
            registry,
        }
    }

    /// Find the data file: explicit path, then `TAGCLOUD_DATA`, then
    /// `tagging.toml` in `dir`
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => std::env::var(DATA_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| dir.join(DATA_FILE)),
        };
        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagCloudError::DataNotFound(path.to_path_buf())
            } else {
                TagCloudError::Io(e)
            }
        })?;
        let store = Self::from_toml(&contents)?;
        log::info!(
            "Loaded {} tags and {} tagged items from {}",
            store.tags.len(),
            store.items.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let data: DataFile = toml::from_str(contents)?;

        let mut tables: BTreeMap<ContentType, Vec<ContentObject>> = BTreeMap::new();
        let mut tag_fields = BTreeMap::new();
        for ct in data.content_types {
            tag_fields.insert(ct.model.clone(), ct.tag_field);
            tables.entry(ct.model).or_default();
        }

        for raw in data.objects {
            let rows = tables.get_mut(&raw.model).ok_or_else(|| {
                TagCloudError::Config(format!(
                    "Object {} uses undeclared content type '{}'",
                    raw.id, raw.model
                ))
            })?;
            let mut object = ContentObject::new(ObjectRef::new(raw.model, raw.id), raw.label);
            object.attributes = raw.attributes;
            rows.push(object);
        }

        let mut registry = ContentRegistry::new();
        for (content_type, rows) in tables {
            let tag_field = tag_fields
                .remove(&content_type)
                .unwrap_or_else(default_tag_field);
            registry.register(content_type, &tag_field, Box::new(TableLoader::new(rows)));
        }

        let tags: Vec<Tag> = data
            .tags
            .into_iter()
            .map(|raw| {
                let mut tag = Tag::new(raw.id, raw.name);
                if let Some(slug) = raw.slug {
                    tag.slug = slug;
                }
                tag
            })
            .collect();
        let known_tags: HashSet<TagId> = tags.iter().map(|t| t.id).collect();

        let items = data
            .tagged_items
            .into_iter()
            .map(|raw| {
                if !known_tags.contains(&raw.tag) {
                    return Err(TagCloudError::Config(format!(
                        "Tagged item refers to unknown tag {}",
                        raw.tag
                    )));
                }
                let link = match (raw.object, raw.object_id) {
                    (Some(object), None) => ContentLink::Generic(object.parse()?),
                    (None, Some(id)) => ContentLink::Direct(id),
                    _ => {
                        return Err(TagCloudError::Config(format!(
                            "Tagged item for tag {} needs exactly one of 'object' or 'object_id'",
                            raw.tag
                        )))
                    }
                };
                Ok(TaggedItem {
                    tag_id: raw.tag,
                    link,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MemoryStore::new(data.models, tags, items, registry))
    }
}

impl TagStore for MemoryStore {
    fn model_meta(&self, identifier: &str) -> Option<&ModelMeta> {
        self.models
            .iter()
            .find(|m| m.identifier.eq_ignore_ascii_case(identifier))
    }

    fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    fn tagged_items(&self) -> &[TaggedItem] {
        &self.items
    }

    fn count_tags(
        &self,
        query: &TagCountQuery,
        direct_target: Option<&ContentType>,
    ) -> Result<Vec<TagCount>> {
        Ok(query.aggregate(&self.tags, &self.items, direct_target))
    }

    fn tags_for(&self, object: &ObjectRef, direct_target: Option<&ContentType>) -> Result<Vec<Tag>> {
        let ids: HashSet<TagId> = self
            .items
            .iter()
            .filter(|item| item.object_ref(direct_target).as_ref() == Some(object))
            .map(|item| item.tag_id)
            .collect();
        Ok(self
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect())
    }

    fn rank_similar(
        &self,
        query: &SimilarQuery,
        direct_target: Option<&ContentType>,
    ) -> Result<Vec<(ObjectRef, u64)>> {
        Ok(query.rank(&self.items, direct_target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DATA: &str = r#"
[[content_types]]
model = "blog.entry"

[[content_types]]
model = "shop.product"
tag_field = "labels"

[[tags]]
id = 1
name = "Rust"

[[tags]]
id = 2
name = "python"
slug = "py"

[[objects]]
model = "blog.entry"
id = 1
label = "Ownership"
attributes = { url = "/blog/ownership/" }

[[objects]]
model = "blog.entry"
id = 2
label = "Borrowing"

[[objects]]
model = "shop.product"
id = 1
label = "Book"

[[tagged_items]]
tag = 1
object = "blog.entry:1"

[[tagged_items]]
tag = 2
object = "blog.entry:1"

[[tagged_items]]
tag = 1
object = "blog.entry:2"

[[tagged_items]]
tag = 1
object = "shop.product:1"
"#;

    #[test]
    fn test_from_toml_builds_registry() {
        let store = MemoryStore::from_toml(DATA).unwrap();
        let entry = ContentType::new("blog", "entry");
        let product = ContentType::new("shop", "product");
        assert_eq!(store.registry().objects(&entry).unwrap().len(), 2);
        assert_eq!(store.registry().tag_field(&product), Some("labels"));

        let ownership = store
            .registry()
            .resolve(&ObjectRef::new(entry, 1))
            .unwrap();
        assert_eq!(ownership.attributes["url"], "/blog/ownership/");
    }

    #[test]
    fn test_tag_slug_override() {
        let store = MemoryStore::from_toml(DATA).unwrap();
        let py = store.tags.iter().find(|t| t.id == 2).unwrap();
        assert_eq!(py.slug, "py");
        let rust = store.tags.iter().find(|t| t.id == 1).unwrap();
        assert_eq!(rust.slug, "rust");
    }

    #[test]
    fn test_count_tags() {
        let store = MemoryStore::from_toml(DATA).unwrap();
        let counts = store.count_tags(&TagCountQuery::all(), None).unwrap();
        assert_eq!(counts[0].tag.name, "Rust");
        assert_eq!(counts[0].num_times, 3);
        assert_eq!(counts[1].num_times, 1);
    }

    #[test]
    fn test_tags_for_object() {
        let store = MemoryStore::from_toml(DATA).unwrap();
        let tags = store
            .tags_for(&"blog.entry:1".parse().unwrap(), None)
            .unwrap();
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_similar_objects_any_type() {
        let store = MemoryStore::from_toml(DATA).unwrap();
        let similar = store
            .similar_objects(&"blog.entry:1".parse().unwrap(), None, None)
            .unwrap();
        let labels: Vec<&str> = similar.iter().map(|s| s.object.label.as_str()).collect();
        assert_eq!(labels, vec!["Borrowing", "Book"]);
        assert!(similar.iter().all(|s| s.similar_tags == 1));
    }

    #[test]
    fn test_undeclared_content_type_is_error() {
        let data = "[[objects]]\nmodel = \"blog.entry\"\nid = 1\nlabel = \"x\"\n";
        assert!(matches!(
            MemoryStore::from_toml(data),
            Err(TagCloudError::Config(_))
        ));
    }

    #[test]
    fn test_tagged_item_needs_one_link() {
        let data = "[[tags]]\nid = 1\nname = \"a\"\n\n[[tagged_items]]\ntag = 1\n";
        let err = MemoryStore::from_toml(data).unwrap_err();
        assert!(err.to_string().contains("exactly one"));
    }

    #[test]
    fn test_tagged_item_unknown_tag() {
        let data = "[[tagged_items]]\ntag = 9\nobject_id = 1\n";
        assert!(MemoryStore::from_toml(data).is_err());
    }

    #[test]
    fn test_model_meta_lookup() {
        let data = r#"
[[models]]
identifier = "taggit.TaggedItem"

[[models.virtual_fields]]
name = "content_object"
kind = "generic_foreign_key"
"#;
        let store = MemoryStore::from_toml(data).unwrap();
        let meta = store.model_meta("taggit.taggeditem").unwrap();
        assert_eq!(meta.virtual_fields.len(), 1);
        assert!(store.model_meta("taggit.Other").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = MemoryStore::load_from_file(&temp.path().join("none.toml"));
        assert!(matches!(result, Err(TagCloudError::DataNotFound(_))));
    }
}
