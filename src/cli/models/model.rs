/// A Model trait for taxonomy, used in the CLI options
pub trait Model {
    /// The name of the model
    fn name(&self) -> &str;

    /// The type of model
    fn model_type(&self) -> &str;
}

/// Model Error
#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    /// No model found for the given string
    #[error("no model found for {0}")]
    Unknown(String),
}
