//! Shared service state
//!
//! One process-wide collection and one session gate, handed to every
//! handler through axum state. Each mutating batch holds the write lock for
//! its whole duration, so concurrent batches never interleave; listings sort
//! a private copy under the read lock.

use std::sync::RwLock;

use super::errors::ApiError;
use crate::collection::{Collection, LargeRecordFilter, SortOrder};
use crate::record::Record;
use crate::session::{Credentials, InMemorySessionStore, SessionConfig, SessionGate};

/// What a listing request asks for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Keep only records over the large-field threshold
    pub large_only: bool,
    /// Effective sort order
    pub order: SortOrder,
}

/// State shared by all handlers
pub struct ConfigService {
    collection: RwLock<Collection>,
    gate: SessionGate<InMemorySessionStore>,
}

impl ConfigService {
    pub fn new(credentials: Credentials, session_config: SessionConfig) -> Self {
        Self {
            collection: RwLock::new(Collection::new()),
            gate: SessionGate::new(InMemorySessionStore::new(), credentials, session_config),
        }
    }

    pub fn gate(&self) -> &SessionGate<InMemorySessionStore> {
        &self.gate
    }

    /// Sorted (and optionally filtered) copy of the store
    pub fn list(&self, query: &ListQuery) -> Result<Collection, ApiError> {
        let collection = self
            .collection
            .read()
            .map_err(|_| ApiError::Internal("collection lock poisoned".to_string()))?;

        let sorted = collection.sorted(&query.order);
        if query.large_only {
            let large = LargeRecordFilter::default().apply(&sorted);
            Ok(Collection::from(large))
        } else {
            Ok(sorted)
        }
    }

    /// Adds records, returning the duplicates
    pub fn add(&self, records: Vec<Record>) -> Result<Collection, ApiError> {
        let mut collection = self
            .collection
            .write()
            .map_err(|_| ApiError::Internal("collection lock poisoned".to_string()))?;
        Ok(collection.merge_add(records))
    }

    /// Deletes records by unique value, returning the ones not found
    pub fn remove(&self, records: Vec<Record>) -> Result<Collection, ApiError> {
        let mut collection = self
            .collection
            .write()
            .map_err(|_| ApiError::Internal("collection lock poisoned".to_string()))?;
        Ok(collection.merge_delete(records))
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.collection.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
