//! CSV persistence for the record collection.
//!
//! The file is a plain table with the header `url,username,password,comment,tags`.
//! Every save rewrites the whole file through a temporary file in the same
//! directory, so a failed write never leaves a truncated table behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::credentials::{CredentialRecord, RecordFields};
use crate::error::{Result, StoreError};

/// Column names of the persisted table, in order.
pub const HEADER: [&str; 5] = ["url", "username", "password", "comment", "tags"];

/// Loads and saves the whole record collection.
pub trait PersistenceAdapter {
    /// Reads every stored row in file order.
    fn load(&self) -> Result<Vec<RecordFields>>;

    /// Replaces the stored collection with `records`.
    fn save(&mut self, records: &[CredentialRecord]) -> Result<()>;

    /// Human-readable location, for messages.
    fn location(&self) -> String;
}

/// Stores the collection in a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceAdapter for CsvStorage {
    fn load(&self) -> Result<Vec<RecordFields>> {
        if !self.path.exists() {
            log::info!(
                "No data file at {}, starting with an empty collection",
                self.path.display()
            );
            return Ok(Vec::new());
        }
        read_table(&self.path)
    }

    fn save(&mut self, records: &[CredentialRecord]) -> Result<()> {
        write_table(&self.path, records.iter().map(CredentialRecord::fields))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reads a table of records from `path`.
///
/// Missing `comment`/`tags` columns read as empty strings and unknown
/// columns are ignored, so tables exported by other tools can be imported.
pub fn read_table(path: &Path) -> Result<Vec<RecordFields>> {
    let file = File::open(path).map_err(|e| StoreError::read(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for row in reader.deserialize::<RecordFields>() {
        rows.push(row.map_err(|e| StoreError::read(path, e))?);
    }

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Writes `rows` to `path`, replacing any existing file.
///
/// The header row is written even when there are no records.
pub fn write_table<'a>(
    path: &Path,
    rows: impl IntoIterator<Item = &'a RecordFields>,
) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| StoreError::write(path, e))?;
    }

    let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| StoreError::write(path, e))?;

    let mut count = 0usize;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file_mut());
        writer
            .write_record(HEADER)
            .map_err(|e| StoreError::write(path, e))?;
        for row in rows {
            writer
                .serialize(row)
                .map_err(|e| StoreError::write(path, e))?;
            count += 1;
        }
        writer.flush().map_err(|e| StoreError::write(path, e))?;
    }

    temp.as_file_mut()
        .flush()
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| StoreError::write(path, e))?;
    temp.persist(path)
        .map_err(|e| StoreError::write(path, e.error))?;

    log::debug!("Wrote {} rows to {}", count, path.display());
    Ok(())
}
