use std::fmt::Display;

/// In-memory tables
pub mod table;

/// Raw data import
pub mod importer;

/// Raw data analysis and preprocessing
pub mod preprocess;

/// The task dataset consumed by the pipelines
pub mod task;

pub use importer::{Importer, RawDataImporter};
pub use preprocess::{DatasetProperties, LabelMapping, Preprocessor, RawDataPreprocessor};
pub use table::Table;
pub use task::{Sample, TaskDataset};

/// Canonical column names shared by every stage
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ColumnNames {
    /// The text to classify
    Source,

    /// The ground truth label
    Target,

    /// The predicted label
    Prediction,
}

impl ColumnNames {
    /// Get the column header for this name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnNames::Source => "source",
            ColumnNames::Target => "target",
            ColumnNames::Prediction => "prediction",
        }
    }
}

impl Display for ColumnNames {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The obtained data could not be read as a table
    #[error("data is not tabular: {0}")]
    NotTabular(String),

    /// A required column is absent
    #[error("missing column {0}")]
    MissingColumn(String),

    /// A row does not have one cell per column
    #[error("row has {found} cells, expected {expected}")]
    RowWidth {
        /// The number of columns in the table
        expected: usize,

        /// The number of cells in the row
        found: usize,
    },

    /// Indexed access beyond the end of the dataset
    #[error("index {index} is out of range for a dataset of length {len}")]
    IndexOutOfRange {
        /// The requested index
        index: usize,

        /// The dataset length
        len: usize,
    },

    /// CSV read or write failure
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
