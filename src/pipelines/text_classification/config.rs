/// Configuration for the text classification pipeline
#[derive(burn::config::Config)]
pub struct Config {
    /// Model name (e.g., "s-nlp/russian_toxicity_classifier")
    pub model_name: String,

    /// Maximum sequence length after tokenization
    #[config(default = 120)]
    pub max_length: usize,

    /// Batch size
    #[config(default = 64)]
    pub batch_size: usize,

    /// Compute device (e.g., "cpu", "cuda", "cuda:1", "mps")
    #[config(default = "\"cpu\".to_string()")]
    pub device: String,
}
