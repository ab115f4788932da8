mod common;

use burn::{
    data::dataloader::batcher::Batcher as _,
    module::Module,
    tensor::{backend::Backend, ElementConversion, Tensor},
};
use burn_text_eval::{
    datasets::Sample,
    pipelines::{
        text_classification::{Batcher, Infer, Model, ModelMetadata, Pipeline},
        PipelineError,
    },
};
use pretty_assertions::assert_eq;

use common::{TestBackend, TinyModel};

/// Token id of "awful" in the test vocabulary
const AWFUL: i64 = 4;

/// Returns no rows at all
#[derive(Module, Debug)]
struct SilentModel<B: Backend> {
    inner: TinyModel<B>,
}

impl<B: Backend> Model<B> for SilentModel<B> {
    fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        Tensor::zeros([0, 2], &input.tokens.device())
    }

    fn metadata(&self) -> ModelMetadata {
        self.inner.metadata()
    }
}

/// Returns no rows for any batch mentioning "awful"
#[derive(Module, Debug)]
struct SqueamishModel<B: Backend> {
    inner: TinyModel<B>,
}

impl<B: Backend> Model<B> for SqueamishModel<B> {
    fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        let hits: i64 = input
            .tokens
            .clone()
            .equal_elem(AWFUL)
            .int()
            .sum()
            .into_scalar()
            .elem();

        if hits > 0 {
            return Tensor::zeros([0, 2], &input.tokens.device());
        }

        self.inner.infer(input)
    }

    fn metadata(&self) -> ModelMetadata {
        self.inner.metadata()
    }
}

/// Declares no output classes
#[derive(Module, Debug)]
struct ClasslessModel<B: Backend> {
    inner: TinyModel<B>,
}

impl<B: Backend> Model<B> for ClasslessModel<B> {
    fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        self.inner.infer(input)
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata::new(5, 8, 8, 0, 0)
    }
}

#[test]
fn test_infer_dataset_preserves_order_across_batches() {
    let dataset = common::samples(&[
        ("good", "0"),
        ("bad", "1"),
        ("awful good", "1"),
        ("good bad", "1"),
        ("unknown words", "0"),
    ]);

    let predictions = common::pipeline(dataset, 2).infer_dataset().unwrap();

    assert_eq!(predictions.headers(), &["target", "prediction"]);
    assert_eq!(
        predictions.column("target").unwrap(),
        vec![Some("0"), Some("1"), Some("1"), Some("1"), Some("0")]
    );
    assert_eq!(
        predictions.column("prediction").unwrap(),
        vec![Some("0"), Some("1"), Some("1"), Some("0"), Some("0")]
    );
}

#[test]
fn test_batch_size_does_not_change_predictions() {
    let rows = [("good", "0"), ("bad", "1"), ("awful", "1"), ("good", "0")];

    let single = common::pipeline(common::samples(&rows), 1).infer_dataset().unwrap();
    let whole = common::pipeline(common::samples(&rows), 64).infer_dataset().unwrap();

    assert_eq!(single, whole);
}

#[test]
fn test_empty_dataset_yields_empty_predictions() {
    let predictions = common::pipeline(common::samples(&[]), 4).infer_dataset().unwrap();

    assert_eq!(predictions.headers(), &["target", "prediction"]);
    assert!(predictions.is_empty());
}

#[test]
fn test_infer_sample() {
    let pipeline = common::pipeline(common::samples(&[]), 4);

    let prediction = pipeline
        .infer_sample(&Sample::new("bad good".to_string(), "1".to_string()))
        .unwrap();

    assert_eq!(prediction, Some("1".to_string()));
}

#[test]
fn test_infer_sample_without_output_is_none() {
    let model = SilentModel {
        inner: TinyModel::new(&common::device()),
    };
    let pipeline = common::pipeline_with(common::samples(&[]), 4, model);

    let prediction = pipeline
        .infer_sample(&Sample::new("good".to_string(), "0".to_string()))
        .unwrap();

    assert_eq!(prediction, None);
}

#[test]
fn test_failed_batch_aborts_the_whole_run() {
    let model = SqueamishModel {
        inner: TinyModel::new(&common::device()),
    };
    let dataset = common::samples(&[("good", "0"), ("bad", "1"), ("awful", "1")]);

    let result = common::pipeline_with(dataset, 2, model).infer_dataset();

    assert!(matches!(
        result,
        Err(PipelineError::BatchMismatch {
            expected: 1,
            found: 0
        })
    ));
}

#[test]
fn test_analyze_model_rejects_a_model_without_classes() {
    let model = ClasslessModel {
        inner: TinyModel::new(&common::device()),
    };

    let result = common::pipeline_with(common::samples(&[]), 4, model).analyze_model();

    assert!(matches!(result, Err(PipelineError::InvalidModel(_))));
}

#[test]
fn test_inference_requires_a_model() {
    let pipeline: Pipeline<TestBackend, TinyModel<TestBackend>> = Pipeline::new(
        common::tokenizer(),
        common::samples(&[("good", "0")]),
        common::config(4),
        common::device(),
    )
    .unwrap();

    assert!(matches!(
        pipeline.infer_dataset(),
        Err(PipelineError::Uninitialized)
    ));
    assert!(matches!(
        pipeline.analyze_model(),
        Err(PipelineError::Uninitialized)
    ));
}

#[test]
fn test_rejects_zero_batch_size() {
    let result: Result<Pipeline<TestBackend, TinyModel<TestBackend>>, _> = Pipeline::new(
        common::tokenizer(),
        common::samples(&[]),
        common::config(0),
        common::device(),
    );

    assert!(matches!(result, Err(PipelineError::InvalidBatchSize)));
}

#[test]
fn test_analyze_model() {
    let properties = common::pipeline(common::samples(&[]), 4)
        .analyze_model()
        .unwrap();

    assert_eq!(properties.input_shape["input_ids"], vec![1, 8]);
    assert_eq!(properties.input_shape["attention_mask"], vec![1, 8]);
    assert_eq!(properties.embedding_size, 8);
    assert_eq!(properties.output_shape, vec![1, 2]);
    assert_eq!(properties.num_trainable_params, 4);
    assert_eq!(properties.vocab_size, 5);
    assert_eq!(properties.size, 4 * std::mem::size_of::<f32>());
    assert_eq!(properties.max_context_length, 8);
}

#[test]
fn test_batcher_pads_to_longest_sequence() {
    let batcher = Batcher::<TestBackend>::new(common::tokenizer(), 8, common::device()).unwrap();

    let batch = batcher.batch(vec!["good".to_string(), "bad awful".to_string()]);
    let batch = batch.unwrap();

    assert_eq!(batch.tokens.dims(), [2, 2]);
    assert_eq!(
        batch.tokens.into_data().convert::<i64>().value,
        vec![2, 0, 3, 4]
    );
    assert_eq!(batch.mask_pad.into_data().value, vec![false, true, false, false]);
}

#[test]
fn test_batcher_truncates_long_texts() {
    let batcher = Batcher::<TestBackend>::new(common::tokenizer(), 2, common::device()).unwrap();

    let batch = batcher
        .batch(vec!["good bad awful good".to_string()])
        .unwrap();

    assert_eq!(batch.tokens.dims(), [1, 2]);
    assert_eq!(batch.tokens.into_data().convert::<i64>().value, vec![2, 3]);
}
