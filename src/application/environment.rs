//! Tagging environment: settings, store and the classified through relation

use crate::domain::relation::FieldKind;
use crate::domain::{classify, ContentLink, ContentType, TaggedItem, TaggingKind};
use crate::error::{Result, TagCloudError};
use crate::infrastructure::config::DEFAULT_RELATED_NAME;
use crate::infrastructure::{PartialLoader, Settings, TagStore};

/// Field of the through model pointing at the tag
const TAG_FIELD: &str = "tag";

/// Everything a template tag needs at render time
///
/// Building one classifies the configured through model, so a schema that
/// matches neither tagging pattern fails here rather than mid-render.
#[derive(Debug)]
pub struct Environment {
    settings: Settings,
    store: Box<dyn TagStore>,
    kind: TaggingKind,
    count_relation: String,
    partials: PartialLoader,
}

impl Environment {
    pub fn new(settings: Settings, store: Box<dyn TagStore>) -> Result<Self> {
        settings.validate()?;

        let through = store.model_meta(&settings.tagged_item_model).ok_or_else(|| {
            TagCloudError::ImproperlyConfigured(format!(
                "Through model '{}' is not declared",
                settings.tagged_item_model
            ))
        })?;
        let kind = classify(through)?;
        check_links(store.tagged_items(), &kind)?;

        let mut count_relation = settings.tag_field_related_name.clone();
        if let Some(field) = through.field(TAG_FIELD) {
            if let FieldKind::ForeignKey { to } = &field.kind {
                let tag_model: ContentType = settings.tag_model.parse()?;
                if *to != tag_model {
                    return Err(TagCloudError::ImproperlyConfigured(format!(
                        "{}.{} points at '{}', not the tag model '{}'",
                        through.identifier, TAG_FIELD, to, settings.tag_model
                    )));
                }
            }
            if let Some(related) = &field.related_name {
                if *related != settings.tag_field_related_name {
                    if related == DEFAULT_RELATED_NAME {
                        log::debug!(
                            "Related name '{}' not found, falling back to '{}'",
                            settings.tag_field_related_name,
                            DEFAULT_RELATED_NAME
                        );
                        count_relation = DEFAULT_RELATED_NAME.to_string();
                    } else {
                        return Err(TagCloudError::ImproperlyConfigured(format!(
                            "Tag relation is named '{}', expected '{}'",
                            related, settings.tag_field_related_name
                        )));
                    }
                }
            }
        }

        log::debug!(
            "Through model {} classified as {}",
            through.identifier,
            describe(&kind)
        );

        let partials = PartialLoader::new(settings.templates_dir.clone());
        Ok(Environment {
            settings,
            store,
            kind,
            count_relation,
            partials,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn TagStore {
        self.store.as_ref()
    }

    pub fn kind(&self) -> &TaggingKind {
        &self.kind
    }

    /// Content type of a model-specific relation
    pub fn direct_target(&self) -> Option<&ContentType> {
        match &self.kind {
            TaggingKind::Generic => None,
            TaggingKind::ModelSpecific { target } => Some(target),
        }
    }

    /// Reverse relation name of the tag foreign key, after the default fallback
    ///
    /// Only reported by diagnostics; the in-memory store counts rows directly.
    pub fn count_relation(&self) -> &str {
        &self.count_relation
    }

    pub fn partials(&self) -> &PartialLoader {
        &self.partials
    }
}

/// Every through row must link the way the relation was classified
fn check_links(items: &[TaggedItem], kind: &TaggingKind) -> Result<()> {
    let mismatch = items.iter().find(|item| {
        matches!(
            (&item.link, kind),
            (ContentLink::Direct(_), TaggingKind::Generic)
                | (ContentLink::Generic(_), TaggingKind::ModelSpecific { .. })
        )
    });
    match mismatch {
        None => Ok(()),
        Some(item) => {
            let expected = match kind {
                TaggingKind::Generic => "'object = \"app.model:id\"'",
                TaggingKind::ModelSpecific { .. } => "'object_id'",
            };
            Err(TagCloudError::ImproperlyConfigured(format!(
                "Tagged item for tag {} doesn't match the {} relation, expected {}",
                item.tag_id,
                describe(kind),
                expected
            )))
        }
    }
}

/// Human-readable tagging kind
pub fn describe(kind: &TaggingKind) -> String {
    match kind {
        TaggingKind::Generic => "generic".to_string(),
        TaggingKind::ModelSpecific { target } => format!("model-specific ({})", target),
    }
}
