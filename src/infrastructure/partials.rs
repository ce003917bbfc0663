//! Inclusion partials for the tag-list and tag-cloud inclusion tags

use crate::error::{Result, TagCloudError};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const TAGLIST_PARTIAL: &str = "taglist_include.html";
pub const TAGCLOUD_PARTIAL: &str = "tagcloud_include.html";

// Built-in partials
const TAGLIST_TEMPLATE: &str = "<ul class=\"tag-list\">\n{{#each tags}}  <li><a href=\"/tags/{{slug}}/\">{{name}}</a> ({{num_times}})</li>\n{{/each}}</ul>\n";
const TAGCLOUD_TEMPLATE: &str = "<div class=\"tag-cloud\">\n{{#each tags}}  <a href=\"/tags/{{slug}}/\" style=\"font-size: {{weight}}em\">{{name}}</a>\n{{/each}}</div>\n";

/// Data handed to an inclusion partial
#[derive(Debug, Serialize)]
pub struct PartialContext<'a, T: Serialize> {
    /// The scope argument passed through from the inclusion tag
    pub forvar: Option<&'a str>,
    pub tags: &'a [T],
}

/// Loads partials from a templates directory, falling back to built-ins
pub struct PartialLoader {
    hbs: Handlebars<'static>,
    dir: Option<PathBuf>,
}

impl PartialLoader {
    pub fn new(dir: Option<PathBuf>) -> Self {
        PartialLoader {
            hbs: Handlebars::new(),
            dir,
        }
    }

    fn builtin(name: &str) -> Option<&'static str> {
        match name {
            TAGLIST_PARTIAL => Some(TAGLIST_TEMPLATE),
            TAGCLOUD_PARTIAL => Some(TAGCLOUD_TEMPLATE),
            _ => None,
        }
    }

    /// Load a partial by name: custom directory first, then built-in
    pub fn load(&self, name: &str) -> Result<String> {
        if let Some(path) = self.custom_path(name) {
            log::debug!("Using custom partial {}", path.display());
            return fs::read_to_string(&path).map_err(|e| {
                TagCloudError::Template(format!(
                    "Failed to read partial {}: {}",
                    path.display(),
                    e
                ))
            });
        }

        Self::builtin(name)
            .map(str::to_string)
            .ok_or_else(|| TagCloudError::Template(format!("Unknown partial: {}", name)))
    }

    fn custom_path(&self, name: &str) -> Option<PathBuf> {
        self.dir
            .as_deref()
            .map(|dir: &Path| dir.join(name))
            .filter(|path| path.is_file())
    }

    /// Render a partial with the given data
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = self.load(name)?;
        self.hbs
            .render_template(&template, data)
            .map_err(|e| TagCloudError::Template(format!("Failed to render {}: {}", name, e)))
    }
}

impl std::fmt::Debug for PartialLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialLoader").field("dir", &self.dir).finish()
    }
}
