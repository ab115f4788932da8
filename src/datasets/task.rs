use burn::data::dataset;
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::{ColumnNames, DatasetError, Table};

/// A single text classification sample
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Sample {
    /// The text for classification
    pub source: String,

    /// The ground truth label
    pub target: String,
}

/// Indexable view of a preprocessed table
#[derive(Debug, Clone)]
pub struct TaskDataset {
    data: Table,
    source: usize,
    target: usize,
}

impl TaskDataset {
    /// Wrap a preprocessed table. It must carry the canonical source and target columns.
    pub fn new(data: Table) -> Result<Self, DatasetError> {
        let source = data.column_index(ColumnNames::Source.as_str())?;
        let target = data.column_index(ColumnNames::Target.as_str())?;

        Ok(Self {
            data,
            source,
            target,
        })
    }

    /// Returns the sample at `index`, failing when it lies past the end
    pub fn sample(&self, index: usize) -> Result<Sample, DatasetError> {
        let row = self.data.row(index).ok_or(DatasetError::IndexOutOfRange {
            index,
            len: self.data.len(),
        })?;

        Ok(Sample {
            source: row[self.source].clone().unwrap_or_default(),
            target: row[self.target].clone().unwrap_or_default(),
        })
    }

    /// The preprocessed table
    pub fn data(&self) -> &Table {
        &self.data
    }
}

impl dataset::Dataset<Sample> for TaskDataset {
    fn get(&self, index: usize) -> Option<Sample> {
        self.sample(index).ok()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
