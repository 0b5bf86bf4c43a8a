//! Dataset store loading and validation.
//!
//! # Invariants
//! - Record order is the dataset file order and never changes.
//! - `project_name` is non-blank and unique.

use crate::model::project::ProjectRecord;
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset load and validation error.
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    /// JSON is malformed or a row misses `organization`/`location`.
    Json(serde_json::Error),
    InvalidRecord {
        index: usize,
        message: String,
    },
    DuplicateProjectName(String),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read dataset: {err}"),
            Self::Json(err) => write!(f, "failed to decode dataset: {err}"),
            Self::InvalidRecord { index, message } => {
                write!(f, "invalid dataset record #{index}: {message}")
            }
            Self::DuplicateProjectName(name) => {
                write!(f, "duplicate project name in dataset: `{name}`")
            }
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidRecord { .. } | Self::DuplicateProjectName(_) => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Ordered, validated, read-only project list.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<ProjectRecord>,
}

impl DatasetStore {
    /// Builds a store from already-decoded records.
    ///
    /// # Errors
    /// - `InvalidRecord` when a `project_name` is blank.
    /// - `DuplicateProjectName` when two records share a name.
    pub fn from_records(records: Vec<ProjectRecord>) -> DatasetResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.project_name.trim().is_empty() {
                return Err(DatasetError::InvalidRecord {
                    index,
                    message: "projectName cannot be blank".to_string(),
                });
            }
            if !seen.insert(record.project_name.as_str()) {
                return Err(DatasetError::DuplicateProjectName(
                    record.project_name.clone(),
                ));
            }
        }

        info!(
            "event=dataset_load module=dataset status=ok records={}",
            records.len()
        );
        Ok(Self { records })
    }

    /// Decodes a JSON array of project rows.
    pub fn from_json_str(json: &str) -> DatasetResult<Self> {
        let records: Vec<ProjectRecord> = serde_json::from_str(json).map_err(|err| {
            error!("event=dataset_load module=dataset status=error reason=decode");
            DatasetError::from(err)
        })?;
        Self::from_records(records)
    }

    /// Reads and decodes a JSON dataset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Records in dataset order.
    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
