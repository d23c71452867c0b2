//! Query matching over the record collection.
//!
//! Matching is a case-insensitive substring test against the url and
//! username of each record. Comments, tags, and secrets are never searched.

use crate::credentials::{CredentialRecord, RecordId};

/// Matching records, in collection order.
///
/// An empty query matches everything.
pub fn matching<'a>(
    query: &str,
    records: &'a [CredentialRecord],
) -> impl Iterator<Item = &'a CredentialRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(move |record| needle.is_empty() || matches(&needle, record))
}

/// Ids of [`matching`] records.
pub fn matching_ids(query: &str, records: &[CredentialRecord]) -> Vec<RecordId> {
    matching(query, records).map(CredentialRecord::id).collect()
}

/// `needle` must already be lowercased.
fn matches(needle: &str, record: &CredentialRecord) -> bool {
    record.url().to_lowercase().contains(needle)
        || record.username().to_lowercase().contains(needle)
}
