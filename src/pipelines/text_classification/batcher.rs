use std::{fmt::Debug, ops::Range};

use burn::{
    data::dataloader,
    nn::attention::generate_padding_mask,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use derive_new::new;
use tokenizers::{Tokenizer, TruncationParams};

use crate::pipelines::PipelineError;

/// An inference batch for text classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Tokenized text as 2D tensor: [batch_size, seq_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Padding mask for the tokenized text containing booleans for padding locations
    pub mask_pad: Tensor<B, 2, Bool>,
}

/// Struct for batching text classification inputs
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// Tokenizer for converting text to token IDs
    pub tokenizer: Tokenizer,

    /// Maximum sequence length for tokenized text
    pub max_seq_length: usize,

    /// ID of the padding token
    pub pad_token_id: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher. The tokenizer is set to truncate at `max_seq_length` and its own
    /// padding is disabled, since batches are padded to their longest sequence here.
    pub fn new(
        mut tokenizer: Tokenizer,
        max_seq_length: usize,
        device: B::Device,
    ) -> Result<Self, PipelineError> {
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_seq_length,
                ..Default::default()
            }))
            .map_err(|e| PipelineError::Tokenizer(e.to_string()))?;
        tokenizer.with_padding(None);

        Ok(Self {
            tokenizer,
            max_seq_length,
            pad_token_id: 0,
            device,
        })
    }

    /// Use the given padding token ID
    pub fn with_pad_token_id(mut self, pad_token_id: usize) -> Self {
        self.pad_token_id = pad_token_id;
        self
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<String, Result<Infer<B>, PipelineError>>
    for Batcher<B>
{
    /// Tokenizes a list of texts into an inference batch
    fn batch(&self, items: Vec<String>) -> Result<Infer<B>, PipelineError> {
        let encodings = self
            .tokenizer
            .encode_batch(items, true)
            .map_err(|e| PipelineError::Tokenizer(e.to_string()))?;

        let token_ids_list: Vec<Vec<usize>> = encodings
            .iter()
            .map(|encoding| encoding.get_ids().iter().map(|t| *t as usize).collect())
            .collect();

        let padding = generate_padding_mask(
            self.pad_token_id,
            token_ids_list,
            Some(self.max_seq_length),
            &self.device,
        );

        Ok(Infer {
            tokens: padding.tensor,
            mask_pad: padding.mask,
        })
    }
}

/// Contiguous, non-overlapping index ranges covering `0..len` in order
pub fn batch_ranges(len: usize, batch_size: usize) -> impl Iterator<Item = Range<usize>> {
    let step = batch_size.max(1);

    (0..len)
        .step_by(step)
        .map(move |start| start..(start + step).min(len))
}
