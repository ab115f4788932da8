use std::{collections::BTreeMap, path::Path};

use bert_burn::model::BertModelConfig;
use burn::{config::Config as _, nn::LinearConfig, tensor::backend::Backend};
use serde::Deserialize;

use super::model::Model;

/// Hugging Face default for `max_length` when a config does not set it
const DEFAULT_MAX_LENGTH: usize = 20;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// The base BERT config
    pub model: BertModelConfig,

    /// A map from class ids to class name labels
    pub id2label: BTreeMap<usize, String>,

    /// Maximum context length declared by the Hugging Face config
    #[config(default = 20)]
    pub max_length: usize,
}

/// The classification fields of a Hugging Face `config.json` that the BERT config ignores
#[derive(Deserialize)]
struct ClassificationFields {
    #[serde(default)]
    id2label: BTreeMap<String, String>,

    #[serde(default = "default_max_length")]
    max_length: usize,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Config {
    /// Load a pretrained model configuration from a Hugging Face `config.json`
    pub fn load_pretrained<P: AsRef<Path>>(config_file: P) -> anyhow::Result<Self> {
        let mut model = BertModelConfig::load(config_file.as_ref())
            .map_err(|e| anyhow!("Unable to load Hugging Face Config file: {}", e))?;

        // Inference only
        model.hidden_dropout_prob = 0.0;

        // The classification head is trained on the pooled [CLS] output
        model.with_pooling_layer = Some(true);

        let contents = std::fs::read_to_string(config_file.as_ref())?;
        let fields: ClassificationFields = serde_json::from_str(&contents)?;

        let id2label = fields
            .id2label
            .into_iter()
            .map(|(id, label)| {
                id.parse::<usize>()
                    .map(|id| (id, label))
                    .map_err(|e| anyhow!("Invalid class id {}: {}", id, e))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        if id2label.is_empty() {
            return Err(anyhow!(
                "Classes are not defined in the model configuration"
            ));
        }

        Ok(Config::new(model, id2label).with_max_length(fields.max_length))
    }

    /// Initializes a Bert model with default weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let model = self.model.init(device);

        let n_classes = self.id2label.len();

        let output = LinearConfig::new(self.model.hidden_size, n_classes).init(device);

        Model {
            model,
            output,
            n_classes,
            vocab_size: self.model.vocab_size,
            max_position_embeddings: self.model.max_position_embeddings,
            max_length: self.max_length,
            pad_token_id: self.model.pad_token_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static HF_CONFIG: &str = r#"{
        "architectures": ["BertForSequenceClassification"],
        "hidden_dropout_prob": 0.1,
        "hidden_size": 8,
        "id2label": {"0": "neutral", "1": "toxic"},
        "intermediate_size": 16,
        "layer_norm_eps": 1e-12,
        "max_position_embeddings": 32,
        "model_type": "bert",
        "num_attention_heads": 2,
        "num_hidden_layers": 1,
        "pad_token_id": 0,
        "type_vocab_size": 2,
        "vocab_size": 30
    }"#;

    #[test]
    fn test_load_pretrained_enables_the_pooler() {
        let dir = std::env::temp_dir().join(format!("burn-text-eval-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("config.json");
        std::fs::write(&path, HF_CONFIG).unwrap();

        let config = Config::load_pretrained(&path).unwrap();

        assert_eq!(config.model.with_pooling_layer, Some(true));
        assert_eq!(config.model.hidden_dropout_prob, 0.0);
        assert_eq!(config.id2label[&1], "toxic");
        assert_eq!(config.max_length, DEFAULT_MAX_LENGTH);
    }

    #[test]
    fn test_reads_classification_fields() {
        let fields: ClassificationFields =
            serde_json::from_str(r#"{"id2label": {"0": "neutral", "1": "toxic"}, "vocab_size": 3}"#)
                .unwrap();

        assert_eq!(fields.id2label.len(), 2);
        assert_eq!(fields.max_length, DEFAULT_MAX_LENGTH);
    }
}
