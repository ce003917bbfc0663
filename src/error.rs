//! Error types for tagcloud

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagcloud
#[derive(Debug, Error)]
pub enum TagCloudError {
    /// Malformed tag arguments, raised when a template is compiled
    #[error("'{tag}' {message}")]
    TemplateSyntax { tag: String, message: String },

    /// The tagging schema does not match a supported shape
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A model, object or context variable could not be found
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// A context value had the wrong type for the tag using it
    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data file not found: {0}")]
    DataNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Template error: {0}")]
    Template(String),
}

impl TagCloudError {
    /// Shorthand for a syntax error attributed to a template tag
    pub fn syntax(tag: &str, message: impl Into<String>) -> Self {
        TagCloudError::TemplateSyntax {
            tag: tag.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error happened while rendering (as opposed to compiling
    /// a template or loading configuration)
    pub fn is_render_time(&self) -> bool {
        matches!(
            self,
            TagCloudError::Lookup(_) | TagCloudError::Render(_) | TagCloudError::Template(_)
        )
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagCloudError::TemplateSyntax { .. } => 2,
            TagCloudError::ImproperlyConfigured(_) => 3,
            TagCloudError::DataNotFound(_) => 4,
            TagCloudError::Lookup(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagCloudError::TemplateSyntax { .. } => {
                format!(
                    "Template syntax error: {}\n\n\
                    Valid forms:\n\
                    • {{% get_tag_list [for <scope>] [limit <n>] as <var> %}}\n\
                    • {{% get_tag_cloud [for <scope>] [limit <n>] as <var> %}}\n\
                    • {{% get_similar_objects to <obj> as <var> [for <app.model>] %}}\n\
                    • {{% include_tag_list [<scope>] %}}, {{% include_tag_cloud [<scope>] %}}",
                    self
                )
            }
            TagCloudError::ImproperlyConfigured(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • The through model needs a 'content_object' field\n\
                    • Use kind = \"foreign_key\" (with 'to') for model-specific tagging\n\
                    • Use kind = \"generic_foreign_key\" as a virtual field for generic tagging\n\
                    • Check 'tagged_item_model' in tagcloud.toml",
                    msg
                )
            }
            TagCloudError::DataNotFound(path) => {
                format!(
                    "Data file not found: {}\n\n\
                    Suggestions:\n\
                    • Pass --data <file>\n\
                    • Set TAGCLOUD_DATA environment variable\n\
                    • Create tagging.toml in the current directory",
                    path.display()
                )
            }
            TagCloudError::Config(msg) => {
                if msg.contains("weight") {
                    format!(
                        "{}\n\n\
                        Expected: finite numbers with min_weight <= max_weight\n\
                        Example:\n\
                        [cloud]\n\
                        min_weight = 1.0\n\
                        max_weight = 6.0",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagCloudError
pub type Result<T> = std::result::Result<T, TagCloudError>;
