//! Domain layer - Tagging model, query construction and weighting

pub mod model;
pub mod query;
pub mod registry;
pub mod relation;
pub mod scope;
pub mod similar;
pub mod weight;

pub use model::{
    ContentLink, ContentObject, ContentType, ObjectId, ObjectRef, SimilarObject, Tag, TagCount,
    TagId, TaggedItem, WeightedTag,
};
pub use query::TagCountQuery;
pub use registry::{ContentLoader, ContentRegistry, TableLoader};
pub use relation::{classify, TaggingKind};
pub use scope::Scope;
pub use similar::SimilarQuery;
pub use weight::WeightFn;
