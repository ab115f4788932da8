/// CLI Indexes: Base Model trait
pub mod model;

/// CLI Indexes: BERT models
pub mod bert;

pub use model::{Model, ModelError};
