use crate::cli::models::ModelError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
/// Represents a BERT model with a specific underlying name
pub struct Model {
    /// The specific BERT-architecture model in use
    pub name: &'static str,
}

impl Model {
    /// Create a new BERT model
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Create a new BERT model using the `s-nlp/russian_toxicity_classifier` model
    pub const fn new_russian_toxicity_classifier() -> Self {
        Self::new(RUSSIAN_TOXICITY_CLASSIFIER)
    }

    /// Create a new BERT model using the `bert-base-uncased` model
    pub const fn new_base_uncased() -> Self {
        Self::new(BERT_BASE_UNCASED)
    }

    /// Create a new BERT model using the `bert-base-cased` model
    pub const fn new_base_cased() -> Self {
        Self::new(BERT_BASE_CASED)
    }
}

impl crate::cli::models::Model for Model {
    fn model_type(&self) -> &str {
        BASE_MODEL
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl TryFrom<&str> for Model {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ALL_MODELS
            .iter()
            .find(|model| model.name == value)
            .copied()
            .ok_or_else(|| ModelError::Unknown(value.to_string()))
    }
}

/// Model Variants
/// --------------

/// The base model name
pub static BASE_MODEL: &str = "bert";

/// s-nlp/russian_toxicity_classifier
pub const RUSSIAN_TOXICITY_CLASSIFIER: &str = "s-nlp/russian_toxicity_classifier";

/// bert-base-uncased
pub const BERT_BASE_UNCASED: &str = "bert-base-uncased";

/// bert-base-cased
pub const BERT_BASE_CASED: &str = "bert-base-cased";

/// All available BERT models
pub static ALL_MODELS: &[Model; 3] = &[
    Model::new_russian_toxicity_classifier(),
    Model::new_base_uncased(),
    Model::new_base_cased(),
];
