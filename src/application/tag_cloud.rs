//! Tag cloud use case

use crate::application::environment::Environment;
use crate::application::tag_list::{TagListService, TagSource};
use crate::domain::weight::weigh;
use crate::domain::WeightedTag;
use crate::error::Result;

/// Service for building weighted tag clouds
pub struct TagCloudService<'a> {
    env: &'a Environment,
}

impl<'a> TagCloudService<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Weigh the tag list for `source` and order it by name for display
    ///
    /// Frequency bounds come from the list after `limit` is applied, so the
    /// least used tag shown always gets the minimum weight. This differs
    /// from weighing the whole list and truncating afterwards.
    pub fn execute(&self, source: &TagSource, limit: Option<usize>) -> Result<Vec<WeightedTag>> {
        let counts = TagListService::new(self.env).execute(source, limit)?;
        let cloud = &self.env.settings().cloud;

        let mut weighted = weigh(counts, cloud.min_weight, cloud.max_weight);
        weighted.sort_by(|a, b| a.count.tag.name.cmp(&b.count.tag.name));
        Ok(weighted)
    }
}
