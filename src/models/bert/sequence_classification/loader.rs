use std::{path::Path, sync::Arc};

use bert_burn::model::BertModel;
use burn::{
    module::{ConstantRecord, Module, Param},
    nn::{LinearConfig, LinearRecord},
    tensor::{backend::Backend, Data, Shape, Tensor},
};
use candle_core::{safetensors, DType, Device};
use log::{info, warn};
use tokenizers::Tokenizer;

use crate::{
    datasets::TaskDataset,
    pipelines::text_classification::{self, Pipeline},
    utils::hugging_face::download_hf_model,
};

use super::{Config, Model, ModelRecord};

/// Build a BERT classifier from a Hugging Face `config.json` and `model.safetensors`
pub fn load_pretrained<B: Backend>(
    config_file: &Path,
    model_file: &Path,
    device: &B::Device,
) -> anyhow::Result<Model<B>> {
    let config = Config::load_pretrained(config_file)?;
    let n_classes = config.id2label.len();

    info!("Loading weights...");

    let output = match load_classifier::<B>(model_file, config.model.hidden_size, n_classes, device)?
    {
        Some(record) => record,
        None => {
            warn!("No classification head found in the weights, using a randomly initialized one");

            let output = LinearConfig::new(config.model.hidden_size, n_classes).init(device);

            LinearRecord {
                weight: output.weight,
                bias: output.bias,
            }
        }
    };

    let record = ModelRecord {
        model: BertModel::from_safetensors(model_file.to_path_buf(), device, config.model.clone()),
        output,
        n_classes: ConstantRecord::new(),
        vocab_size: ConstantRecord::new(),
        max_position_embeddings: ConstantRecord::new(),
        max_length: ConstantRecord::new(),
        pad_token_id: ConstantRecord::new(),
    };

    info!("Creating model...");

    Ok(config.init(device).load_record(record))
}

/// Download a pretrained classifier and its tokenizer, and build a pipeline over `dataset`
pub async fn load_pipeline<B: Backend>(
    config: text_classification::Config,
    dataset: Arc<TaskDataset>,
    device: B::Device,
) -> anyhow::Result<Pipeline<B, Model<B>>> {
    let files = download_hf_model(&config.model_name).await?;

    let tokenizer = Tokenizer::from_file(&files.tokenizer)
        .map_err(|e| anyhow!("Unable to load tokenizer: {}", e))?;

    let model = load_pretrained::<B>(&files.config, &files.weights, &device)?;

    Ok(Pipeline::new(tokenizer, dataset, config, device)?.with_model(model))
}

/// Read the `classifier.weight` and `classifier.bias` tensors, if present
fn load_classifier<B: Backend>(
    model_file: &Path,
    hidden_size: usize,
    n_classes: usize,
    device: &B::Device,
) -> anyhow::Result<Option<LinearRecord<B>>> {
    let weights = safetensors::load(model_file, &Device::Cpu)
        .map_err(|e| anyhow!("Error loading weights: {}", e))?;

    let (Some(weight), Some(bias)) = (
        weights.get("classifier.weight"),
        weights.get("classifier.bias"),
    ) else {
        return Ok(None);
    };

    // PyTorch stores linear weights as [out, in], Burn as [in, out]
    let weight = to_burn_tensor::<B, 2>(weight, device)?.transpose();
    let bias = to_burn_tensor::<B, 1>(bias, device)?;

    if weight.dims() != [hidden_size, n_classes] || bias.dims() != [n_classes] {
        return Err(anyhow!(
            "Classification head has shape {:?}, expected [{}, {}]",
            weight.dims(),
            hidden_size,
            n_classes
        ));
    }

    Ok(Some(LinearRecord {
        weight: Param::from_tensor(weight),
        bias: Some(Param::from_tensor(bias)),
    }))
}

fn to_burn_tensor<B: Backend, const D: usize>(
    tensor: &candle_core::Tensor,
    device: &B::Device,
) -> anyhow::Result<Tensor<B, D>> {
    let dims: [usize; D] = tensor
        .dims()
        .try_into()
        .map_err(|_| anyhow!("Expected a {}-dimensional tensor, got {:?}", D, tensor.dims()))?;

    let values = tensor
        .to_dtype(DType::F32)?
        .flatten_all()?
        .to_vec1::<f32>()?;

    Ok(Tensor::from_data(
        Data::new(values, Shape::new(dims)).convert(),
        device,
    ))
}
