use std::{fmt::Display, path::PathBuf};

use crate::datasets::RawDataImporter;

/// Prefix marking a Hugging Face Hub dataset file (e.g., `hf://owner/repo/train.csv`)
pub static HUB_PREFIX: &str = "hf://";

/// Where the raw dataset comes from
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Dataset {
    /// A CSV file inside a Hub dataset repository
    Hub {
        /// Repository id (e.g., "owner/repo")
        repo: String,

        /// File path inside the repository
        file: String,
    },

    /// A local CSV file
    Local(PathBuf),
}

impl Dataset {
    /// Build the importer for this source
    pub fn importer(&self) -> RawDataImporter {
        match self {
            Dataset::Hub { repo, file } => RawDataImporter::from_hub(repo, file),
            Dataset::Local(path) => RawDataImporter::from_path(path),
        }
    }
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let Some(location) = value.strip_prefix(HUB_PREFIX) else {
            return Ok(Dataset::Local(PathBuf::from(value)));
        };

        let mut parts = location.splitn(3, '/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), Some(file))
                if !owner.is_empty() && !name.is_empty() && !file.is_empty() =>
            {
                Ok(Dataset::Hub {
                    repo: format!("{}/{}", owner, name),
                    file: file.to_string(),
                })
            }
            _ => Err(Self::Error::Unknown(value.to_string())),
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dataset::Hub { repo, file } => write!(f, "{}{}/{}", HUB_PREFIX, repo, file),
            Dataset::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}, expected a path or hf://owner/repo/file.csv")]
    Unknown(String),
}
