/// CLI Indexes: Pipelines
pub mod pipeline;

/// CLI Indexes: Text Classification Pipeline
pub mod text_classification;

pub use pipeline::{Pipeline, PipelineError};
