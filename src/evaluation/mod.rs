use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    datasets::{ColumnNames, DatasetError, Table},
    utils::timing::report_time,
};

/// Classification metrics
pub mod metrics;

pub use metrics::{Average, Metric};

/// Metric scores by name
pub type MetricsResult = BTreeMap<String, f64>;

/// Scores a persisted set of predictions
pub trait Evaluator {
    /// Compute every requested metric. `None` means no metrics were requested.
    fn run(&self) -> Result<Option<MetricsResult>, EvaluationError>;
}

/// Evaluates a predictions table written by the text classification pipeline
#[derive(Debug, Clone)]
pub struct TaskEvaluator {
    data_path: PathBuf,
    metrics: Vec<Metric>,
}

impl TaskEvaluator {
    /// Create an evaluator over the CSV file at `data_path`
    pub fn new<P: AsRef<Path>>(data_path: P, metrics: impl IntoIterator<Item = Metric>) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            metrics: metrics.into_iter().collect(),
        }
    }

    /// The requested metrics, in order
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }
}

impl Evaluator for TaskEvaluator {
    fn run(&self) -> Result<Option<MetricsResult>, EvaluationError> {
        if self.metrics.is_empty() {
            return Ok(None);
        }

        report_time("evaluate", || -> Result<Option<MetricsResult>, EvaluationError> {
            let data = Table::from_csv(&self.data_path)?;

            info!(
                "Evaluating {} predictions from {}",
                data.len(),
                self.data_path.display()
            );

            let references = required_column(&data, ColumnNames::Target)?;
            let predictions = required_column(&data, ColumnNames::Prediction)?;

            let mut results = MetricsResult::new();

            for metric in &self.metrics {
                // Later metrics overwrite colliding keys
                results.extend(metric.compute(&predictions, &references, Average::Micro)?);
            }

            Ok(Some(results))
        })
    }
}

/// Read a column where every row must have a value
fn required_column(data: &Table, column: ColumnNames) -> Result<Vec<&str>, EvaluationError> {
    data.column(column.as_str())?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or(EvaluationError::MissingValue {
                column: column.as_str(),
                row,
            })
        })
        .collect()
}

/// Evaluation Error
#[derive(thiserror::Error, Debug)]
pub enum EvaluationError {
    /// No metric is registered under the given name
    #[error("no metric found for {0}")]
    UnknownMetric(String),

    /// Predictions and references differ in length
    #[error("{predictions} predictions but {references} references")]
    LengthMismatch {
        /// Number of predictions
        predictions: usize,

        /// Number of references
        references: usize,
    },

    /// A predictions table row lacks a value
    #[error("missing {column} value in row {row}")]
    MissingValue {
        /// The column with the gap
        column: &'static str,

        /// Zero-based row index
        row: usize,
    },

    /// Reading the predictions table failed
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_predictions(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("burn-text-eval-evaluator-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();

        path
    }

    #[test]
    fn test_scores_three_of_four() {
        let path = write_predictions("three_of_four.csv", "target,prediction\n0,0\n1,1\n1,0\n0,0\n");

        let result = TaskEvaluator::new(&path, [Metric::Accuracy]).run().unwrap();

        assert_eq!(result, Some(BTreeMap::from([("accuracy".to_string(), 0.75)])));
    }

    #[test]
    fn test_merges_metrics_and_is_deterministic() {
        let path = write_predictions("merged.csv", "target,prediction\n0,1\n1,1\n1,1\n0,0\n");
        let evaluator = TaskEvaluator::new(&path, [Metric::Accuracy, Metric::F1, Metric::Accuracy]);

        let first = evaluator.run().unwrap().unwrap();
        let second = evaluator.run().unwrap().unwrap();

        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["accuracy", "f1"]);
        assert_eq!(first["accuracy"].to_bits(), second["accuracy"].to_bits());
        assert_eq!(first["f1"].to_bits(), second["f1"].to_bits());
    }

    #[test]
    fn test_no_metrics_means_no_result() {
        let evaluator = TaskEvaluator::new("does-not-exist.csv", []);

        assert_eq!(evaluator.run().unwrap(), None);
    }

    #[test]
    fn test_requires_prediction_column() {
        let path = write_predictions("no_prediction.csv", "target,other\n0,1\n");

        let result = TaskEvaluator::new(&path, [Metric::Accuracy]).run();

        assert!(matches!(
            result,
            Err(EvaluationError::Dataset(DatasetError::MissingColumn(_)))
        ));
    }

    #[test]
    fn test_rejects_missing_values() {
        let path = write_predictions("gap.csv", "target,prediction\n0,\n");

        let result = TaskEvaluator::new(&path, [Metric::Accuracy]).run();

        assert!(matches!(
            result,
            Err(EvaluationError::MissingValue { column: "prediction", row: 0 })
        ));
    }
}
