//! Application layer - Template tags and the use cases behind them

pub mod args;
pub mod context;
pub mod environment;
pub mod library;
pub mod similar_objects;
pub mod tag_cloud;
pub mod tag_list;
pub mod template;

pub use context::{Context, Value};
pub use environment::Environment;
pub use library::{Library, Node};
pub use similar_objects::SimilarObjectsService;
pub use tag_cloud::TagCloudService;
pub use tag_list::{TagListService, TagSource};
pub use template::Template;
