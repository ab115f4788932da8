use std::collections::BTreeMap;

use burn::config::Config;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::utils::timing::report_time;

use super::{ColumnNames, DatasetError, Table};

/// The canonical binary labels every sample carries after preprocessing
pub static CANONICAL_LABELS: &[&str; 2] = &["0", "1"];

/// Descriptive statistics of a raw dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProperties {
    /// Number of rows
    pub dataset_number_of_samples: usize,

    /// Number of columns
    pub dataset_columns: usize,

    /// Rows that repeat an earlier row exactly
    pub dataset_duplicates: usize,

    /// Rows with every cell missing
    pub dataset_empty_rows: usize,

    /// Shortest text, in characters. Missing texts are ignored.
    pub dataset_sample_min_len: Option<usize>,

    /// Longest text, in characters. Missing texts are ignored.
    pub dataset_sample_max_len: Option<usize>,
}

/// Lookup table from raw label encodings to canonical labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMapping(BTreeMap<String, String>);

impl LabelMapping {
    /// Build a mapping from `(raw, canonical)` pairs
    pub fn new<R: Into<String>, C: Into<String>>(pairs: impl IntoIterator<Item = (R, C)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(raw, canonical)| (raw.into(), canonical.into()))
                .collect(),
        )
    }

    /// Translate a raw label. Unknown encodings pass through untouched.
    pub fn map<'a>(&'a self, raw: &'a str) -> &'a str {
        self.0.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Whether a label belongs to the canonical set
    pub fn is_canonical(label: &str) -> bool {
        CANONICAL_LABELS.contains(&label)
    }
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self::new([
            (r#"{"not_toxic":true}"#, "0"),
            (r#"{"toxic_content":true}"#, "1"),
        ])
    }
}

/// Configuration for the raw data preprocessor
#[derive(Config)]
pub struct PreprocessorConfig {
    /// Raw column holding the text
    #[config(default = "\"toxic_comment\".to_string()")]
    pub source_column: String,

    /// Raw column holding the label
    #[config(default = "\"reasons\".to_string()")]
    pub target_column: String,

    /// Raw label encodings mapped to canonical labels
    #[config(default = "LabelMapping::default()")]
    pub labels: LabelMapping,
}

/// Analyzes and cleans raw datasets
pub trait Preprocessor {
    /// Compute descriptive statistics without modifying the input
    fn analyze(&self, raw: &Table) -> Result<DatasetProperties, DatasetError>;

    /// Produce the cleaned table, leaving the input untouched
    fn transform(&self, raw: &Table) -> Result<Table, DatasetError>;
}

/// Preprocessor for the binary toxicity datasets
#[derive(Clone)]
pub struct RawDataPreprocessor {
    config: PreprocessorConfig,
}

impl RawDataPreprocessor {
    /// Create a preprocessor from a config
    pub fn new(config: PreprocessorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &PreprocessorConfig {
        &self.config
    }

    /// Find the text column, accepting both the raw and canonical names
    fn source_column<'a>(&'a self, table: &Table) -> Result<&'a str, DatasetError> {
        [self.config.source_column.as_str(), ColumnNames::Source.as_str()]
            .into_iter()
            .find(|name| table.column_index(name).is_ok())
            .ok_or_else(|| DatasetError::MissingColumn(self.config.source_column.clone()))
    }
}

impl Default for RawDataPreprocessor {
    fn default() -> Self {
        Self::new(PreprocessorConfig::new())
    }
}

impl Preprocessor for RawDataPreprocessor {
    fn analyze(&self, raw: &Table) -> Result<DatasetProperties, DatasetError> {
        let lengths: Vec<usize> = raw
            .column(self.source_column(raw)?)?
            .into_iter()
            .flatten()
            .map(|text| text.chars().count())
            .collect();

        Ok(DatasetProperties {
            dataset_number_of_samples: raw.len(),
            dataset_columns: raw.width(),
            dataset_duplicates: raw.duplicated().into_iter().filter(|dup| *dup).count(),
            dataset_empty_rows: raw.empty_rows(),
            dataset_sample_min_len: lengths.iter().min().copied(),
            dataset_sample_max_len: lengths.iter().max().copied(),
        })
    }

    fn transform(&self, raw: &Table) -> Result<Table, DatasetError> {
        report_time("transform", || -> Result<Table, DatasetError> {
            let mut data = raw.clone();

            data.drop_duplicates();

            data.rename(&[
                (self.config.source_column.as_str(), ColumnNames::Source.as_str()),
                (self.config.target_column.as_str(), ColumnNames::Target.as_str()),
            ]);

            data.column_index(ColumnNames::Source.as_str())?;
            let target = data.column_index(ColumnNames::Target.as_str())?;

            let before = data.len();

            let mut cleaned = Table::new(data.headers().to_vec());
            for mut row in data.rows().iter().cloned() {
                let label = row[target]
                    .as_deref()
                    .map(|raw| self.config.labels.map(raw).to_string());

                match label {
                    Some(label) if LabelMapping::is_canonical(&label) => {
                        row[target] = Some(label);
                        cleaned.push(row)?;
                    }
                    _ => {}
                }
            }

            debug!(
                "Dropped {} rows with unrecognized labels",
                before - cleaned.len()
            );

            Ok(cleaned)
        })
    }
}
