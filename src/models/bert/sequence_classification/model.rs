use bert_burn::{
    data::BertInferenceBatch,
    model::{BertModel, BertModelOutput},
};
use burn::{
    module::Module,
    nn::Linear,
    tensor::{backend::Backend, Tensor},
};
use derive_new::new;

use crate::pipelines::text_classification::{self, batcher, ModelMetadata};

/// BERT for sequence Classification
#[derive(Module, Debug, new)]
pub struct Model<B: Backend> {
    /// The base BERT model
    pub model: BertModel<B>,

    /// Linear layer for sequence classification
    pub output: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,

    /// Size of the vocabulary
    pub vocab_size: usize,

    /// Number of position embeddings
    pub max_position_embeddings: usize,

    /// Maximum context length declared by the Hugging Face config
    pub max_length: usize,

    /// The padding token ID
    pub pad_token_id: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Defines forward pass for inference, returning unnormalized class scores
    pub fn infer(&self, input: BertInferenceBatch<B>) -> Tensor<B, 2> {
        let [batch_size, _seq_length] = input.tokens.dims();

        let BertModelOutput {
            pooled_output,
            hidden_states,
        } = self.model.forward(input);

        self.output
            .forward(pooled_output.unwrap_or(hidden_states))
            .slice([0..batch_size, 0..1])
            .reshape([batch_size, self.n_classes])
    }
}

impl<B: Backend> text_classification::Model<B> for Model<B> {
    fn infer(&self, input: batcher::Infer<B>) -> Tensor<B, 2> {
        self.infer(BertInferenceBatch {
            tokens: input.tokens,
            mask_pad: input.mask_pad,
        })
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            vocab_size: self.vocab_size,
            max_position_embeddings: self.max_position_embeddings,
            max_context_length: self.max_length,
            n_classes: self.n_classes,
            pad_token_id: self.pad_token_id,
        }
    }
}
