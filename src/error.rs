//! Error types for the record store and its persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::credentials::RecordId;

/// Errors raised by the store, the view layer, and the persistence adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An operation referenced an id that is not in the store.
    #[error("no record with id {0}")]
    NotFound(RecordId),

    /// A display row index that does not exist in the current view.
    #[error("no row {index} in the current view ({rows} rows shown)")]
    RowNotFound { index: usize, rows: usize },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Reserved for required-field checks. Fields are currently accepted as given.
    #[error("invalid record: {0}")]
    Validation(String),

    /// The in-memory change was applied but could not be persisted.
    #[error("change kept in memory but not saved: {source}")]
    Unsaved {
        records: Vec<RecordId>,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        StoreError::Read {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        StoreError::Write {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True for both unknown ids and unknown display rows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::RowNotFound { .. })
    }

    pub fn is_unsaved(&self) -> bool {
        matches!(self, StoreError::Unsaved { .. })
    }

    /// Ids touched by a mutation whose save failed.
    pub fn unsaved_records(&self) -> &[RecordId] {
        match self {
            StoreError::Unsaved { records, .. } => records,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
