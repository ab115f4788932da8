use crate::datasets::DatasetError;

/// Text Classification
pub mod text_classification;

/// Pipeline Error
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Inference was attempted before a model was loaded
    #[error("model is not defined")]
    Uninitialized,

    /// The loaded model does not describe a usable classifier
    #[error("model is not a valid sequence classifier: {0}")]
    InvalidModel(String),

    /// Batches must hold at least one sample
    #[error("batch size must be greater than zero")]
    InvalidBatchSize,

    /// The tokenizer rejected its input or configuration
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// The model returned a different number of rows than it was given
    #[error("model produced {found} predictions for a batch of {expected}")]
    BatchMismatch {
        /// Samples in the batch
        expected: usize,

        /// Predictions returned
        found: usize,
    },

    /// Dataset access failure
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
