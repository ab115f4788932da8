/// Batching and tokenization
pub mod batcher;

/// Pipeline configuration
pub mod config;

/// Common model traits for text classification
pub mod model;

/// The inference pipeline
pub mod pipeline;

pub use batcher::{batch_ranges, Batcher, Infer};
pub use config::Config;
pub use model::{Model, ModelMetadata};
pub use pipeline::{ModelProperties, Pipeline};
