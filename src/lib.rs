//! tagcloud - Template tags for tag lists and tag clouds
//!
//! Provides `get_tag_list`, `get_tag_cloud`, `get_similar_objects` and the
//! inclusion tags over a tagging store where tags reach objects either
//! through a generic relation or through a model-specific one.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagCloudError;
