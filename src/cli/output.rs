//! Output formatting utilities

use crate::domain::{SimilarObject, TagCount, WeightedTag};

/// Width of the name column, capped so one long tag doesn't push everything
fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(0).min(32)
}

/// Format tags with their usage counts
pub fn format_tag_counts(tags: &[TagCount]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let width = name_width(tags.iter().map(|t| t.tag.name.as_str()));
    let mut output = String::new();
    for count in tags {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            count.tag.name,
            count.num_times,
            width = width
        ));
    }
    output
}

/// Format a tag cloud, one tag per line with its weight
pub fn format_cloud(cloud: &[WeightedTag]) -> String {
    if cloud.is_empty() {
        return "No tags found".to_string();
    }

    let width = name_width(cloud.iter().map(|t| t.count.tag.name.as_str()));
    let mut output = String::new();
    for tag in cloud {
        output.push_str(&format!(
            "{:<width$}  {:.2}  ({})\n",
            tag.count.tag.name,
            tag.weight,
            tag.count.num_times,
            width = width
        ));
    }
    output
}

/// Format similar objects with the number of tags they share
pub fn format_similar(similar: &[SimilarObject]) -> String {
    if similar.is_empty() {
        return "No similar objects found".to_string();
    }

    let mut output = String::new();
    for item in similar {
        output.push_str(&format!(
            "{}  {}  ({} shared)\n",
            item.object.reference, item.object.label, item.similar_tags
        ));
    }
    output
}
