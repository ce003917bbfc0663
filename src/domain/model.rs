//! Tagging entities: tags, content types, content objects and tagged items

use crate::error::{Result, TagCloudError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub type TagId = u64;
pub type ObjectId = u64;

/// A short label attachable to content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

impl Tag {
    pub fn new(id: TagId, name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = name.to_lowercase().replace(' ', "-");
        Tag { id, name, slug }
    }
}

/// Discriminator of a content model, written `app_label.model`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType {
    pub app_label: String,
    pub model: String,
}

impl ContentType {
    pub fn new(app_label: &str, model: &str) -> Self {
        ContentType {
            app_label: app_label.to_lowercase(),
            model: model.to_lowercase(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model)
    }
}

impl FromStr for ContentType {
    type Err = TagCloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('.') {
            Some((app, model)) if !app.is_empty() && !model.is_empty() && !model.contains('.') => {
                Ok(ContentType::new(app, model))
            }
            _ => Err(TagCloudError::Lookup(format!(
                "Invalid model identifier '{}' (expected app_label.model)",
                s
            ))),
        }
    }
}

impl Serialize for ContentType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Polymorphic reference to a content object: type discriminator plus id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef {
    pub content_type: ContentType,
    pub object_id: ObjectId,
}

impl ObjectRef {
    pub fn new(content_type: ContentType, object_id: ObjectId) -> Self {
        ObjectRef {
            content_type,
            object_id,
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.content_type, self.object_id)
    }
}

impl FromStr for ObjectRef {
    type Err = TagCloudError;

    /// Parse `app_label.model:id`
    fn from_str(s: &str) -> Result<Self> {
        let (model, id) = s.rsplit_once(':').ok_or_else(|| {
            TagCloudError::Lookup(format!(
                "Invalid object reference '{}' (expected app_label.model:id)",
                s
            ))
        })?;
        let object_id = id.trim().parse::<ObjectId>().map_err(|_| {
            TagCloudError::Lookup(format!("Invalid object id '{}' in '{}'", id, s))
        })?;
        Ok(ObjectRef::new(model.parse()?, object_id))
    }
}

/// A resolved content entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentObject {
    #[serde(rename = "ref")]
    pub reference: ObjectRef,
    pub label: String,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl ContentObject {
    pub fn new(reference: ObjectRef, label: impl Into<String>) -> Self {
        ContentObject {
            reference,
            label: label.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.reference.object_id
    }

    pub fn content_type(&self) -> &ContentType {
        &self.reference.content_type
    }
}

/// How a tagged item points at its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLink {
    /// Direct foreign key into the one content model of a model-specific relation
    Direct(ObjectId),
    /// Type + id pair of a generic relation
    Generic(ObjectRef),
}

/// One row of the through-relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedItem {
    pub tag_id: TagId,
    pub link: ContentLink,
}

impl TaggedItem {
    /// The referenced object, given the target of a model-specific relation
    pub fn object_ref(&self, direct_target: Option<&ContentType>) -> Option<ObjectRef> {
        match (&self.link, direct_target) {
            (ContentLink::Generic(reference), _) => Some(reference.clone()),
            (ContentLink::Direct(id), Some(target)) => Some(ObjectRef::new(target.clone(), *id)),
            (ContentLink::Direct(_), None) => None,
        }
    }
}

/// A tag annotated with how often it is used
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagCount {
    #[serde(flatten)]
    pub tag: Tag,
    pub num_times: u64,
}

/// A tag-cloud entry: a counted tag plus its display weight for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTag {
    #[serde(flatten)]
    pub count: TagCount,
    pub weight: f64,
}

/// A content object ranked by how many tags it shares with a source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarObject {
    #[serde(flatten)]
    pub object: ContentObject,
    pub similar_tags: u64,
}
