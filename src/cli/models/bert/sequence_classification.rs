use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::cli::{models::bert::Model, pipelines::Pipeline};

/// Text Classification
/// -------------------

/// Available models to use with Bert for Text Classification
pub static TEXT_CLASSIFICATION_MODELS: &[Model; 3] = &[
    Model::new_russian_toxicity_classifier(),
    Model::new_base_uncased(),
    Model::new_base_cased(),
];

lazy_static! {
    /// Available models for each pipeline
    pub static ref MODELS_BY_PIPELINE: HashMap<Pipeline, &'static [Model; 3]> =
        [(Pipeline::TextClassification, TEXT_CLASSIFICATION_MODELS)]
            .iter()
            .copied()
            .collect();
}
