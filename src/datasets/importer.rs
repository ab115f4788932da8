use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;

use crate::utils::{hugging_face::download_hf_dataset_file, timing::report_time};

use super::{DatasetError, Table};

/// A source of raw, unprocessed tabular data
#[async_trait]
pub trait Importer {
    /// Obtain the raw table
    async fn obtain(&self) -> anyhow::Result<Table>;
}

/// Where the raw data lives
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Source {
    /// A CSV file inside a Hugging Face Hub dataset repository
    Hub {
        /// Repository id (e.g., "s-nlp/ru_paradetox_toxicity")
        repo: String,

        /// File name inside the repository
        file: String,
    },

    /// A CSV file on the local filesystem
    Local(PathBuf),
}

/// Imports a raw CSV dataset from the Hub or from disk
#[derive(Debug, Clone)]
pub struct RawDataImporter {
    source: Source,
}

impl RawDataImporter {
    /// Import from a Hugging Face Hub dataset repository
    pub fn from_hub(repo: &str, file: &str) -> Self {
        Self {
            source: Source::Hub {
                repo: repo.to_string(),
                file: file.to_string(),
            },
        }
    }

    /// Import from a local file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::Local(path.as_ref().to_path_buf()),
        }
    }

    /// The configured source
    pub fn source(&self) -> &Source {
        &self.source
    }
}

#[async_trait]
impl Importer for RawDataImporter {
    async fn obtain(&self) -> anyhow::Result<Table> {
        let path = match &self.source {
            Source::Hub { repo, file } => download_hf_dataset_file(repo, file).await?,
            Source::Local(path) => path.clone(),
        };

        info!("Reading raw data from {}", path.display());

        let table = report_time("obtain", || read_tabular(&path))?;

        Ok(table)
    }
}

/// Read a CSV file, reporting anything else as non-tabular data
fn read_tabular(path: &Path) -> Result<Table, DatasetError> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if !is_csv {
        return Err(DatasetError::NotTabular(format!(
            "{} is not a CSV file",
            path.display()
        )));
    }

    match Table::from_csv(path) {
        Err(DatasetError::Csv(e)) => Err(DatasetError::NotTabular(e.to_string())),
        other => other,
    }
}
