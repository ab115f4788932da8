/// Hugging Face utilities
pub mod hugging_face;

/// Stage timing
pub mod timing;
