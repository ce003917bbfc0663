//! Infrastructure layer - Settings, data stores and partial templates

pub mod config;
pub mod partials;
pub mod store;

pub use config::Settings;
pub use partials::PartialLoader;
pub use store::{MemoryStore, TagStore};
