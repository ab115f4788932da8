use std::fmt::Display;

use crate::cli::models::bert::{self, sequence_classification::MODELS_BY_PIPELINE};

use super::text_classification;

/// Available Pipelines
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Pipeline {
    /// Text Classification
    TextClassification,
}

impl Pipeline {
    /// Get the default model variant for the given pipeline
    pub fn default_model(&self) -> bert::Model {
        match self {
            Pipeline::TextClassification => text_classification::DEFAULT_MODEL,
        }
    }

    /// Check whether a model can be used with this pipeline
    pub fn supports(&self, model: &bert::Model) -> bool {
        MODELS_BY_PIPELINE
            .get(self)
            .map(|models| models.contains(model))
            .unwrap_or(false)
    }
}

impl TryFrom<&str> for Pipeline {
    type Error = PipelineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value == text_classification::PIPELINE {
            Ok(Pipeline::TextClassification)
        } else {
            Err(PipelineError::Unknown(value.to_string()))
        }
    }
}

impl Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pipeline::TextClassification => text_classification::PIPELINE,
        };

        write!(f, "{}", name)
    }
}

/// Pipeline Error
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// No pipeline found for the given string
    #[error("no pipeline found for {0}")]
    Unknown(String),
}
