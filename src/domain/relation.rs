//! Through-model metadata and classification of tagging relations

use crate::domain::model::ContentType;
use crate::error::{Result, TagCloudError};
use serde::Deserialize;

/// Name of the field a through model uses to point at tagged content
pub const CONTENT_OBJECT_FIELD: &str = "content_object";

/// Kind of a declared model field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    ForeignKey { to: ContentType },
    GenericForeignKey,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Reverse accessor name on the referenced model
    #[serde(default)]
    pub related_name: Option<String>,
}

impl Field {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Field {
            name: name.to_string(),
            kind,
            related_name: None,
        }
    }
}

/// Declared shape of a model
///
/// Generic foreign keys don't map to a column, so they are listed among the
/// virtual fields rather than the concrete ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelMeta {
    /// Identifier such as `taggit.TaggedItem`
    pub identifier: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub virtual_fields: Vec<Field>,
}

impl ModelMeta {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// How a through model links tags to content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggingKind {
    /// Polymorphic reference to any content type
    Generic,
    /// Direct foreign key to one content type
    ModelSpecific { target: ContentType },
}

impl TaggingKind {
    pub fn is_generic(&self) -> bool {
        matches!(self, TaggingKind::Generic)
    }
}

/// Classify a through model as generic or model-specific
///
/// # Errors
///
/// Returns `ImproperlyConfigured` if the model has no `content_object` field,
/// or has one that is neither a foreign key nor a generic foreign key.
pub fn classify(through: &ModelMeta) -> Result<TaggingKind> {
    let err = || {
        TagCloudError::ImproperlyConfigured(format!(
            "The model {} doesn't seem to be a valid through model for tagging",
            through.identifier
        ))
    };

    if let Some(field) = through.field(CONTENT_OBJECT_FIELD) {
        return match &field.kind {
            FieldKind::ForeignKey { to } => Ok(TaggingKind::ModelSpecific { target: to.clone() }),
            _ => Err(err()),
        };
    }

    through
        .virtual_fields
        .iter()
        .find(|f| f.name == CONTENT_OBJECT_FIELD && f.kind == FieldKind::GenericForeignKey)
        .map(|_| TaggingKind::Generic)
        .ok_or_else(err)
}
