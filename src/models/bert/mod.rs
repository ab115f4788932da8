/// BERT for Sequence Classification (such as toxicity detection)
pub mod sequence_classification;
