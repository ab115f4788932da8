use std::{str::FromStr, sync::Arc};

use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    module::{Module, Param},
    nn::Linear,
    tensor::{backend::Backend, Tensor},
};
use burn_text_eval::{
    datasets::{Table, TaskDataset},
    pipelines::text_classification::{Config, Infer, Model, ModelMetadata, Pipeline},
};
use tokenizers::Tokenizer;

pub type TestBackend = NdArray;

/// Word-level vocabulary: [PAD] 0, [UNK] 1, good 2, bad 3, awful 4
pub static TOKENIZER: &str = r#"{
  "version": "1.0",
  "truncation": null,
  "padding": null,
  "added_tokens": [],
  "normalizer": null,
  "pre_tokenizer": { "type": "Whitespace" },
  "post_processor": null,
  "decoder": null,
  "model": {
    "type": "WordLevel",
    "vocab": { "[PAD]": 0, "[UNK]": 1, "good": 2, "bad": 3, "awful": 4 },
    "unk_token": "[UNK]"
  }
}"#;

pub fn tokenizer() -> Tokenizer {
    Tokenizer::from_str(TOKENIZER).unwrap()
}

pub fn device() -> NdArrayDevice {
    NdArrayDevice::Cpu
}

/// Scores only the first token of each text: ids 1 and 2 land on class 0, ids 3 and 4 on class 1
#[derive(Module, Debug)]
pub struct TinyModel<B: Backend> {
    output: Linear<B>,
}

impl<B: Backend> TinyModel<B> {
    pub fn new(device: &B::Device) -> Self {
        Self {
            output: Linear {
                weight: Param::from_tensor(Tensor::from_floats([[-1.0, 1.0]], device)),
                bias: Some(Param::from_tensor(Tensor::from_floats([2.5, -2.5], device))),
            },
        }
    }
}

impl<B: Backend> Model<B> for TinyModel<B> {
    fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        let [batch_size, _] = input.tokens.dims();

        let first = input.tokens.slice([0..batch_size, 0..1]).float();

        self.output.forward(first)
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata::new(5, 8, 8, 2, 0)
    }
}

pub fn samples(rows: &[(&str, &str)]) -> Arc<TaskDataset> {
    let table = Table::from_rows(
        ["source", "target"],
        rows.iter()
            .map(|(source, target)| vec![Some(source.to_string()), Some(target.to_string())])
            .collect(),
    )
    .unwrap();

    Arc::new(TaskDataset::new(table).unwrap())
}

pub fn config(batch_size: usize) -> Config {
    Config::new("tiny".to_string()).with_batch_size(batch_size)
}

pub fn pipeline(
    dataset: Arc<TaskDataset>,
    batch_size: usize,
) -> Pipeline<TestBackend, TinyModel<TestBackend>> {
    pipeline_with(dataset, batch_size, TinyModel::new(&device()))
}

#[allow(dead_code)]
pub fn pipeline_with<M: Model<TestBackend>>(
    dataset: Arc<TaskDataset>,
    batch_size: usize,
    model: M,
) -> Pipeline<TestBackend, M> {
    Pipeline::new(tokenizer(), dataset, config(batch_size), device())
        .unwrap()
        .with_model(model)
}
