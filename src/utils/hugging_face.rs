use std::path::PathBuf;

use hf_hub::api::tokio::{Api, ApiRepo};
use log::info;

/// Local paths of a pretrained model downloaded from the Hub
#[derive(Debug, Clone)]
pub struct PretrainedFiles {
    /// The model `config.json`
    pub config: PathBuf,

    /// The `model.safetensors` weights
    pub weights: PathBuf,

    /// The `tokenizer.json` definition
    pub tokenizer: PathBuf,
}

/// Download model config, weights and tokenizer from Hugging Face Hub
/// If file exists in cache, it will not be downloaded again
pub async fn download_hf_model(model_name: &str) -> anyhow::Result<PretrainedFiles> {
    let api = Api::new().map_err(|e| anyhow!("Unable to reach Hugging Face Hub: {}", e))?;
    let repo = api.model(model_name.to_string());

    info!("Fetching {} from Hugging Face Hub...", model_name);

    let config = fetch(&repo, model_name, "config.json").await?;
    let weights = fetch(&repo, model_name, "model.safetensors").await?;
    let tokenizer = fetch(&repo, model_name, "tokenizer.json").await?;

    Ok(PretrainedFiles {
        config,
        weights,
        tokenizer,
    })
}

async fn fetch(repo: &ApiRepo, model_name: &str, file: &str) -> anyhow::Result<PathBuf> {
    repo.get(file).await.map_err(|e| {
        anyhow!(
            "Failed to download: {} file with name: {} from HuggingFace Hub: {}",
            model_name,
            file,
            e
        )
    })
}

/// Download a single file from a Hugging Face Hub dataset repository
pub async fn download_hf_dataset_file(repo_id: &str, file: &str) -> anyhow::Result<PathBuf> {
    let api = Api::new().map_err(|e| anyhow!("Unable to reach Hugging Face Hub: {}", e))?;

    info!("Fetching {}/{} from Hugging Face Hub...", repo_id, file);

    api.dataset(repo_id.to_string())
        .get(file)
        .await
        .map_err(|e| {
            anyhow!(
                "Failed to download: {} from dataset {} on HuggingFace Hub: {}",
                file,
                repo_id,
                e
            )
        })
}
