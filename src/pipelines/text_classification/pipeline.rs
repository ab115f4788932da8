use std::{collections::BTreeMap, sync::Arc};

use burn::{
    data::{dataloader::batcher::Batcher as _, dataset::Dataset as _},
    tensor::{backend::Backend, Int, Tensor},
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokenizers::Tokenizer;

use crate::{
    datasets::{ColumnNames, Sample, Table, TaskDataset},
    pipelines::PipelineError,
    utils::timing::report_time,
};

use super::{batch_ranges, Batcher, Config, Infer, Model};

/// Token ID used to fill the synthetic input of the structural summary
const DUMMY_TOKEN_ID: i64 = 1;

/// Structural summary of a loaded model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelProperties {
    /// Shapes of the synthetic inputs, by input name
    pub input_shape: BTreeMap<String, Vec<usize>>,

    /// Number of positions the embeddings can address
    pub embedding_size: usize,

    /// Shape of the model output for the synthetic input
    pub output_shape: Vec<usize>,

    /// Number of trainable parameters
    pub num_trainable_params: usize,

    /// Size of the vocabulary
    pub vocab_size: usize,

    /// Total size of the parameters, in bytes
    pub size: usize,

    /// Maximum context length declared by the model config
    pub max_context_length: usize,
}

/// Text Classification inference pipeline
///
/// Owns the model and the tokenizer, and shares the dataset it runs over. Inference runs on a
/// plain (non-autodiff) backend, so no gradients are ever tracked.
pub struct Pipeline<B: Backend, M: Model<B>> {
    model: Option<M>,
    batcher: Batcher<B>,
    dataset: Arc<TaskDataset>,
    config: Config,
    device: B::Device,
}

impl<B: Backend, M: Model<B>> Pipeline<B, M> {
    /// Creates a pipeline without a model. Inference fails until one is provided.
    pub fn new(
        tokenizer: Tokenizer,
        dataset: Arc<TaskDataset>,
        config: Config,
        device: B::Device,
    ) -> Result<Self, PipelineError> {
        if config.batch_size == 0 {
            return Err(PipelineError::InvalidBatchSize);
        }

        let batcher = Batcher::new(tokenizer, config.max_length, device.clone())?;

        Ok(Self {
            model: None,
            batcher,
            dataset,
            config,
            device,
        })
    }

    /// Provide the model, moved to the pipeline's device
    pub fn with_model(mut self, model: M) -> Self {
        let model = model.to_device(&self.device);

        self.batcher = self
            .batcher
            .with_pad_token_id(model.metadata().pad_token_id);
        self.model = Some(model);

        self
    }

    /// The pipeline configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The dataset inference runs over
    pub fn dataset(&self) -> &TaskDataset {
        &self.dataset
    }

    fn model(&self) -> Result<&M, PipelineError> {
        self.model.as_ref().ok_or(PipelineError::Uninitialized)
    }

    /// Describe the model by running a dry forward pass over a synthetic input of shape
    /// [1, max_position_embeddings]
    pub fn analyze_model(&self) -> Result<ModelProperties, PipelineError> {
        let model = self.model()?;
        let metadata = model.metadata();

        if metadata.n_classes == 0 {
            return Err(PipelineError::InvalidModel("no output classes".to_string()));
        }

        if metadata.vocab_size == 0 || metadata.max_position_embeddings == 0 {
            return Err(PipelineError::InvalidModel(
                "empty vocabulary or position embeddings".to_string(),
            ));
        }

        let shape = [1, metadata.max_position_embeddings];

        let tokens = Tensor::<B, 2, Int>::ones(shape, &self.device).mul_scalar(DUMMY_TOKEN_ID);
        let mask_pad = Tensor::<B, 2, Int>::zeros(shape, &self.device).equal_elem(1);

        let output = model.infer(Infer::new(tokens, mask_pad));

        let num_params = model.num_params();

        Ok(ModelProperties {
            input_shape: BTreeMap::from([
                ("input_ids".to_string(), shape.to_vec()),
                ("attention_mask".to_string(), shape.to_vec()),
            ]),
            embedding_size: metadata.max_position_embeddings,
            output_shape: output.dims().to_vec(),
            num_trainable_params: num_params,
            vocab_size: metadata.vocab_size,
            size: num_params * std::mem::size_of::<B::FloatElem>(),
            max_context_length: metadata.max_context_length,
        })
    }

    /// Infer a single sample, returning `None` when no prediction comes back
    pub fn infer_sample(&self, sample: &Sample) -> Result<Option<String>, PipelineError> {
        report_time("infer_sample", || -> Result<Option<String>, PipelineError> {
            let predictions = self.infer_batch(vec![sample.source.clone()])?;

            Ok(predictions.into_iter().next())
        })
    }

    /// Infer the whole dataset in order, returning a table of targets and predictions
    pub fn infer_dataset(&self) -> Result<Table, PipelineError> {
        report_time("infer_dataset", || -> Result<Table, PipelineError> {
            let mut predictions = Table::new([
                ColumnNames::Target.as_str(),
                ColumnNames::Prediction.as_str(),
            ]);

            let total = self.dataset.len();

            info!(
                "Running inference over {} samples in batches of {}...",
                total, self.config.batch_size
            );

            for range in batch_ranges(total, self.config.batch_size) {
                debug!("Batch {:?} of {}", range, total);

                let samples = range
                    .map(|index| self.dataset.sample(index))
                    .collect::<Result<Vec<_>, _>>()?;

                let texts = samples.iter().map(|sample| sample.source.clone()).collect();
                let batch = self.infer_batch(texts)?;

                // Each sample needs exactly one prediction or the rows would misalign
                if batch.len() != samples.len() {
                    return Err(PipelineError::BatchMismatch {
                        expected: samples.len(),
                        found: batch.len(),
                    });
                }

                for (sample, prediction) in samples.into_iter().zip(batch) {
                    predictions.push(vec![Some(sample.target), Some(prediction)])?;
                }
            }

            Ok(predictions)
        })
    }

    /// Tokenize, run the forward pass and decode the arg-max class of each row the model returns
    fn infer_batch(&self, texts: Vec<String>) -> Result<Vec<String>, PipelineError> {
        let model = self.model()?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let input = self.batcher.batch(texts)?;

        let class_indexes = model
            .infer(input)
            .argmax(1)
            .into_data()
            .convert::<i64>()
            .value;

        Ok(class_indexes
            .into_iter()
            .map(|index| index.to_string())
            .collect())
    }
}
