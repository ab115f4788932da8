use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::EvaluationError;

/// The label treated as positive by binary averaging
pub static POSITIVE_LABEL: &str = "1";

/// How per-class scores are combined
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Average {
    /// Pool every sample before scoring
    Micro,

    /// Score each class, then take the unweighted mean
    Macro,

    /// Score only the positive class
    Binary,
}

/// Available Metrics
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Share of exact matches
    Accuracy,

    /// True positives over predicted positives
    Precision,

    /// True positives over actual positives
    Recall,

    /// Harmonic mean of precision and recall
    F1,
}

impl Metric {
    /// Get the unique string token that identifies this metric
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
        }
    }

    /// Score `predictions` against `references`. The result holds a single entry named after the
    /// metric.
    pub fn compute(
        &self,
        predictions: &[&str],
        references: &[&str],
        average: Average,
    ) -> Result<BTreeMap<String, f64>, EvaluationError> {
        if predictions.len() != references.len() {
            return Err(EvaluationError::LengthMismatch {
                predictions: predictions.len(),
                references: references.len(),
            });
        }

        let counts = Counts::new(predictions, references);

        let score = match self {
            Metric::Accuracy => counts.accuracy(),
            Metric::Precision => counts.averaged(average, ClassCounts::precision),
            Metric::Recall => counts.averaged(average, ClassCounts::recall),
            Metric::F1 => counts.averaged(average, ClassCounts::f1),
        };

        Ok(BTreeMap::from([(self.as_str().to_string(), score)]))
    }
}

impl FromStr for Metric {
    type Err = EvaluationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "accuracy" => Ok(Metric::Accuracy),
            "precision" => Ok(Metric::Precision),
            "recall" => Ok(Metric::Recall),
            "f1" => Ok(Metric::F1),
            _ => Err(EvaluationError::UnknownMetric(value.to_string())),
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confusion counts for one class, one-vs-rest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ClassCounts {
    tp: usize,
    fp: usize,
    fn_: usize,
}

impl ClassCounts {
    fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    fn f1(&self) -> f64 {
        f1(self.precision(), self.recall())
    }
}

/// Per-class confusion counts over a whole prediction set
struct Counts {
    correct: usize,
    total: usize,
    classes: BTreeMap<String, ClassCounts>,
}

impl Counts {
    fn new(predictions: &[&str], references: &[&str]) -> Self {
        let labels: BTreeSet<&str> = predictions.iter().chain(references).copied().collect();

        let mut classes: BTreeMap<String, ClassCounts> = labels
            .into_iter()
            .map(|label| (label.to_string(), ClassCounts::default()))
            .collect();

        let mut correct = 0;

        for (prediction, reference) in predictions.iter().zip(references) {
            if prediction == reference {
                correct += 1;

                if let Some(counts) = classes.get_mut(*prediction) {
                    counts.tp += 1;
                }
            } else {
                if let Some(counts) = classes.get_mut(*prediction) {
                    counts.fp += 1;
                }

                if let Some(counts) = classes.get_mut(*reference) {
                    counts.fn_ += 1;
                }
            }
        }

        Self {
            correct,
            total: predictions.len(),
            classes,
        }
    }

    fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }

    fn micro(&self) -> ClassCounts {
        self.classes
            .values()
            .fold(ClassCounts::default(), |acc, counts| ClassCounts {
                tp: acc.tp + counts.tp,
                fp: acc.fp + counts.fp,
                fn_: acc.fn_ + counts.fn_,
            })
    }

    fn averaged(&self, average: Average, score: fn(&ClassCounts) -> f64) -> f64 {
        match average {
            Average::Micro => score(&self.micro()),
            Average::Macro => {
                if self.classes.is_empty() {
                    return 0.0;
                }

                self.classes.values().map(score).sum::<f64>() / self.classes.len() as f64
            }
            Average::Binary => self
                .classes
                .get(POSITIVE_LABEL)
                .map(score)
                .unwrap_or(0.0),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    numerator as f64 / denominator as f64
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }

    2.0 * precision * recall / (precision + recall)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TARGETS: [&str; 4] = ["0", "1", "1", "0"];
    const PREDICTIONS: [&str; 4] = ["0", "1", "0", "0"];

    fn score(metric: Metric, average: Average) -> f64 {
        metric.compute(&PREDICTIONS, &TARGETS, average).unwrap()[metric.as_str()]
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(score(Metric::Accuracy, Average::Micro), 0.75);
    }

    #[test]
    fn test_micro_scores_match_accuracy_for_single_label_data() {
        for metric in [Metric::Precision, Metric::Recall, Metric::F1] {
            assert_eq!(score(metric, Average::Micro), 0.75);
        }
    }

    #[test]
    fn test_binary_scores() {
        assert_eq!(score(Metric::Precision, Average::Binary), 1.0);
        assert_eq!(score(Metric::Recall, Average::Binary), 0.5);
        assert!((score(Metric::F1, Average::Binary) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_macro_precision() {
        // class 0: 2 / 3, class 1: 1 / 1
        let expected = (2.0 / 3.0 + 1.0) / 2.0;

        assert!((score(Metric::Precision, Average::Macro) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let result = Metric::Accuracy.compute(&[], &[], Average::Micro).unwrap();

        assert_eq!(result["accuracy"], 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let result = Metric::F1.compute(&["0"], &[], Average::Micro);

        assert!(matches!(result, Err(EvaluationError::LengthMismatch { .. })));
    }

    #[test]
    fn test_parses_identifiers() {
        assert_eq!("F1".parse::<Metric>().unwrap(), Metric::F1);
        assert_eq!(Metric::Accuracy.to_string(), "accuracy");
        assert!(matches!(
            "bleu".parse::<Metric>(),
            Err(EvaluationError::UnknownMetric(name)) if name == "bleu"
        ));
    }
}
