//! Scope strings restricting a tag query to an application or model
//!
//! Accepted forms: `app`, `app.model`, `project.app.model`, each optionally
//! followed by `:field` naming the tag field on the model.

use crate::domain::model::ContentType;
use crate::error::{Result, TagCloudError};
use std::fmt;

/// Name of the tag field assumed when a scope doesn't name one
pub const DEFAULT_TAG_FIELD: &str = "tags";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub app_label: String,
    pub model: Option<String>,
    pub tag_field: Option<String>,
}

impl Scope {
    /// Parse a scope string
    ///
    /// Splits from the right on `.` into at most three parts; a leading
    /// project prefix is ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TagCloudError::Lookup("Empty scope".to_string()));
        }

        let (path, tag_field) = match raw.split_once(':') {
            Some((path, field)) if !field.is_empty() => (path, Some(field.to_lowercase())),
            Some(_) => {
                return Err(TagCloudError::Lookup(format!(
                    "Missing tag field after ':' in scope '{}'",
                    raw
                )))
            }
            None => (raw, None),
        };

        let parts: Vec<&str> = path.rsplitn(3, '.').collect();
        let (app_label, model) = match parts.as_slice() {
            [app] => (*app, None),
            [model, app] | [model, app, _] => (*app, Some(model.to_lowercase())),
            _ => unreachable!("rsplitn(3) yields between one and three parts"),
        };

        if app_label.is_empty() || model.as_deref() == Some("") {
            return Err(TagCloudError::Lookup(format!("Invalid scope '{}'", raw)));
        }
        if tag_field.is_some() && model.is_none() {
            return Err(TagCloudError::Lookup(format!(
                "Scope '{}' names a tag field but no model",
                raw
            )));
        }

        Ok(Scope {
            app_label: app_label.to_lowercase(),
            model,
            tag_field,
        })
    }

    /// The content type named by this scope, if it names a model
    pub fn content_type(&self) -> Option<ContentType> {
        self.model
            .as_deref()
            .map(|model| ContentType::new(&self.app_label, model))
    }

    /// Whether a content type falls inside this scope
    pub fn matches(&self, content_type: &ContentType) -> bool {
        content_type.app_label == self.app_label
            && self
                .model
                .as_deref()
                .map_or(true, |model| content_type.model == model)
    }

    pub fn tag_field(&self) -> &str {
        self.tag_field.as_deref().unwrap_or(DEFAULT_TAG_FIELD)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.app_label)?;
        if let Some(model) = &self.model {
            write!(f, ".{}", model)?;
        }
        if let Some(field) = &self.tag_field {
            write!(f, ":{}", field)?;
        }
        Ok(())
    }
}
