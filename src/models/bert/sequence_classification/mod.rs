/// Bert for Sequence Classification
pub mod model;

/// The model configuration
pub mod config;

/// Loading pretrained weights and building pipelines
pub mod loader;

pub use config::Config;
pub use loader::{load_pipeline, load_pretrained};
pub use model::{Model, ModelRecord};
