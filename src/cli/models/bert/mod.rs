/// CLI indexes: BERT model basics
pub mod model;

/// CLI indexes: BERT for Sequence Classification
pub mod sequence_classification;

pub use model::Model;
