//! The view layer: composes the store, visibility state, and search into
//! display rows, and routes every mutation through stable record ids.
//!
//! Nothing here is cached. Each call to [`ViewCoordinator::current_view`]
//! recomputes the rows from the current store, so a read after a mutation
//! always reflects it.

use std::path::Path;

use crate::credentials::{CredentialRecord, RecordFields, RecordId, RecordStore};
use crate::error::{Result, StoreError};
use crate::logging::timed;
use crate::search::{matching, matching_ids};
use crate::storage::{self, CsvStorage, PersistenceAdapter};
use crate::visibility::{VisibilityTracker, mask};

/// Shown in place of an empty comment or tag list.
pub const PLACEHOLDER: &str = "-";

/// One display-ready row of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: RecordId,
    pub url: String,
    pub username: String,
    /// The secret when revealed, otherwise its mask.
    pub secret_display: String,
    pub comment: String,
    pub tags: String,
    pub revealed: bool,
}

impl DisplayRow {
    fn compose(record: &CredentialRecord, revealed: bool) -> Self {
        let secret_display = if revealed {
            record.secret().to_string()
        } else {
            mask(record.secret())
        };

        Self {
            id: record.id(),
            url: record.url().to_string(),
            username: record.username().to_string(),
            secret_display,
            comment: or_placeholder(record.comment()),
            tags: or_placeholder(record.tags()),
            revealed,
        }
    }
}

fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Owns the record store and visibility state and keeps them, the persisted
/// table, and every computed view consistent.
pub struct ViewCoordinator<S: PersistenceAdapter = CsvStorage> {
    store: RecordStore,
    visibility: VisibilityTracker,
    storage: S,
}

impl<S: PersistenceAdapter> ViewCoordinator<S> {
    /// Loads the collection from `storage`.
    ///
    /// A load failure leaves the collection empty; the error is returned
    /// alongside so the caller can tell the user.
    pub fn open(storage: S) -> (Self, Option<StoreError>) {
        let (store, load_error) = match timed("load", || storage.load()) {
            Ok(rows) => {
                log::info!("Loaded {} records from {}", rows.len(), storage.location());
                (RecordStore::from_fields(rows), None)
            }
            Err(e) => {
                log::error!("Failed to load records: {}", e);
                (RecordStore::new(), Some(e))
            }
        };

        let coordinator = Self {
            store,
            visibility: VisibilityTracker::new(),
            storage,
        };
        (coordinator, load_error)
    }

    /// Rows matching `query`, in collection order.
    pub fn current_view(&self, query: &str) -> Vec<DisplayRow> {
        let rows: Vec<DisplayRow> = matching(query, self.store.list())
            .map(|record| DisplayRow::compose(record, self.visibility.is_visible(record.id())))
            .collect();

        log::debug!("View for query {:?} has {} rows", query, rows.len());
        rows
    }

    /// Maps a 0-based row index of the view for `query` to its record id.
    pub fn resolve_position(&self, display_index: usize, query: &str) -> Result<RecordId> {
        let ids = matching_ids(query, self.store.list());
        ids.get(display_index)
            .copied()
            .ok_or(StoreError::RowNotFound {
                index: display_index,
                rows: ids.len(),
            })
    }

    /// The stored record, with its real secret.
    pub fn record(&self, id: RecordId) -> Result<&CredentialRecord> {
        self.store.get(id)
    }

    pub fn records(&self) -> &[CredentialRecord] {
        self.store.list()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add(&mut self, fields: RecordFields) -> Result<RecordId> {
        let url = fields.url.clone();
        let id = self.store.add(fields);
        log::info!("Added record {} for {}", id, url);
        self.persist(vec![id])?;
        Ok(id)
    }

    /// Replaces the fields of `id`. The new secret starts masked.
    pub fn update(&mut self, id: RecordId, fields: RecordFields) -> Result<()> {
        self.store.update(id, fields)?;
        self.visibility.forget(id);
        log::info!("Updated record {}", id);
        self.persist(vec![id])
    }

    /// Removes the record and forgets its visibility in the same step.
    pub fn delete(&mut self, id: RecordId) -> Result<CredentialRecord> {
        let removed = self.store.delete(id)?;
        self.visibility.forget(id);
        log::info!("Deleted record {} for {}", id, removed.url());
        self.persist(vec![id])?;
        Ok(removed)
    }

    pub fn reveal(&mut self, id: RecordId) -> Result<()> {
        self.ensure_exists(id)?;
        self.visibility.reveal(id);
        log::debug!("Revealed secret of record {}", id);
        Ok(())
    }

    pub fn hide(&mut self, id: RecordId) -> Result<()> {
        self.ensure_exists(id)?;
        self.visibility.hide(id);
        log::debug!("Hid secret of record {}", id);
        Ok(())
    }

    /// Flips visibility and returns whether the secret is now shown.
    pub fn toggle(&mut self, id: RecordId) -> Result<bool> {
        self.ensure_exists(id)?;
        let visible = self.visibility.toggle(id);
        log::debug!("Toggled record {} to {}", id, if visible { "revealed" } else { "masked" });
        Ok(visible)
    }

    pub fn is_visible(&self, id: RecordId) -> bool {
        self.visibility.is_visible(id)
    }

    /// Appends every row of the table at `path`, in file order, then saves once.
    ///
    /// Nothing is added when the table cannot be read.
    pub fn import(&mut self, path: &Path) -> Result<Vec<RecordId>> {
        let rows = storage::read_table(path)?;
        let ids: Vec<RecordId> = rows.into_iter().map(|row| self.store.add(row)).collect();
        log::info!("Imported {} records from {}", ids.len(), path.display());
        self.persist(ids.clone())?;
        Ok(ids)
    }

    /// Writes the whole collection, with real secrets, to `path`.
    pub fn export(&self, path: &Path) -> Result<usize> {
        storage::write_table(path, self.store.list().iter().map(CredentialRecord::fields))?;
        log::info!("Exported {} records to {}", self.store.len(), path.display());
        Ok(self.store.len())
    }

    /// Saves the current collection without changing it.
    pub fn save(&mut self) -> Result<()> {
        timed("save", || self.storage.save(self.store.list()))
    }

    fn ensure_exists(&self, id: RecordId) -> Result<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    /// Saves after a mutation. The mutation itself is never rolled back.
    fn persist(&mut self, records: Vec<RecordId>) -> Result<()> {
        self.save().map_err(|e| {
            log::error!("Failed to save records to {}: {}", self.storage.location(), e);
            StoreError::Unsaved {
                records,
                source: Box::new(e),
            }
        })
    }
}
