//! Credential records and the ordered store that owns them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Session-scoped identifier of a record.
///
/// Assigned once when the record enters the store and never reused, even
/// after the record is deleted. Ids are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The user-editable fields of a record, in persisted column order.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub url: String,
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub tags: String,
}

impl RecordFields {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }
}

// The secret never reaches logs or panic messages.
impl fmt::Debug for RecordFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordFields")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("comment", &self.comment)
            .field("tags", &self.tags)
            .finish()
    }
}

/// A stored credential: an immutable id plus its current fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    id: RecordId,
    fields: RecordFields,
}

impl CredentialRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }

    pub fn url(&self) -> &str {
        &self.fields.url
    }

    pub fn username(&self) -> &str {
        &self.fields.username
    }

    pub fn secret(&self) -> &str {
        &self.fields.secret
    }

    pub fn comment(&self) -> &str {
        &self.fields.comment
    }

    pub fn tags(&self) -> &str {
        &self.fields.tags
    }
}

/// Ordered collection of credential records, addressed by [`RecordId`].
///
/// Records keep insertion order. Duplicate field values are allowed; only
/// ids are unique.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<CredentialRecord>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store from loaded rows, assigning fresh ids in row order.
    pub fn from_fields(rows: impl IntoIterator<Item = RecordFields>) -> Self {
        let mut store = Self::new();
        for fields in rows {
            store.add(fields);
        }
        store
    }

    /// Appends a record and returns its newly assigned id.
    pub fn add(&mut self, fields: RecordFields) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        self.records.push(CredentialRecord { id, fields });
        id
    }

    pub fn get(&self, id: RecordId) -> Result<&CredentialRecord> {
        self.position(id)
            .map(|pos| &self.records[pos])
            .ok_or(StoreError::NotFound(id))
    }

    /// Replaces every mutable field in place. Id and position are unchanged.
    pub fn update(&mut self, id: RecordId, fields: RecordFields) -> Result<()> {
        let pos = self.position(id).ok_or(StoreError::NotFound(id))?;
        self.records[pos].fields = fields;
        Ok(())
    }

    /// Removes the record and returns it.
    pub fn delete(&mut self, id: RecordId) -> Result<CredentialRecord> {
        let pos = self.position(id).ok_or(StoreError::NotFound(id))?;
        Ok(self.records.remove(pos))
    }

    pub fn list(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(url: &str, user: &str) -> RecordFields {
        RecordFields::new(url, user, "secret")
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut store = RecordStore::new();
        let a = store.add(fields("a.com", "ann"));
        let b = store.add(fields("b.com", "ben"));

        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a, RecordId::new(1));
        assert_eq!(b.to_string(), "#2");
        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].url(), "a.com");
        assert_eq!(store.list()[1].url(), "b.com");
    }

    #[test]
    fn test_ids_never_reused_after_delete() {
        let mut store = RecordStore::new();
        let a = store.add(fields("a.com", "ann"));
        store.delete(a).unwrap();
        let b = store.add(fields("a.com", "ann"));

        assert_ne!(a, b);
        assert!(matches!(store.get(a), Err(StoreError::NotFound(id)) if id == a));
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut store = RecordStore::new();
        let a = store.add(fields("a.com", "ann"));
        let b = store.add(fields("b.com", "ben"));
        store.add(fields("c.com", "cid"));

        let new_fields = RecordFields::new("b.org", "benjamin", "pw").with_comment("work");
        store.update(b, new_fields.clone()).unwrap();

        assert_eq!(store.list()[0].id(), a);
        assert_eq!(store.list()[1].id(), b);
        assert_eq!(store.get(b).unwrap().fields(), &new_fields);
    }

    #[test]
    fn test_missing_id_is_not_found() {
        let mut store = RecordStore::new();
        let ghost = RecordId::new(42);

        assert!(store.get(ghost).is_err());
        assert!(store.update(ghost, fields("x", "y")).is_err());
        assert!(store.delete(ghost).is_err());
    }

    #[test]
    fn test_duplicates_are_appended() {
        let mut store = RecordStore::new();
        let a = store.add(fields("a.com", "ann"));
        let b = store.add(fields("a.com", "ann"));

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_fields_preserves_order() {
        let store = RecordStore::from_fields(vec![fields("1", "u"), fields("2", "u")]);
        let urls: Vec<&str> = store.list().iter().map(|r| r.url()).collect();
        assert_eq!(urls, vec!["1", "2"]);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let f = RecordFields::new("a.com", "ann", "hunter2");
        let debug = format!("{:?}", f);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
