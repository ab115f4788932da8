use burn::{
    module::Module,
    tensor::{backend::Backend, Tensor},
};
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::batcher;

/// Structural facts a model reports about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ModelMetadata {
    /// Size of the vocabulary
    pub vocab_size: usize,

    /// Number of positions the embeddings can address
    pub max_position_embeddings: usize,

    /// Maximum generation/context length declared by the model config
    pub max_context_length: usize,

    /// Number of output classes
    pub n_classes: usize,

    /// The padding token ID
    pub pad_token_id: usize,
}

/// A trait for models that can be used for Text Classification
pub trait Model<B: Backend>: Module<B> {
    /// Forward pass for inference, returning logits as [batch_size, n_classes]
    fn infer(&self, input: batcher::Infer<B>) -> Tensor<B, 2>;

    /// Structural metadata of the loaded model
    fn metadata(&self) -> ModelMetadata;
}
