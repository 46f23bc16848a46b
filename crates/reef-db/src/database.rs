use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::collection::Collection;
use crate::error::DbError;

/// A named mapping from collection name to collection.
///
/// Each collection sits behind its own lock so mutating statements against
/// different collections proceed without ordering between them, while
/// statements against the same collection serialize.
pub struct Database {
    name: String,
    collections: HashMap<String, Arc<RwLock<Collection>>>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Database {
        Database {
            name: name.into(),
            collections: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a collection. Idempotent — re-creating an existing collection
    /// is a no-op success and leaves its records untouched.
    pub fn create_collection(&mut self, name: &str, columns: Vec<String>) {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(Collection::new(name, columns))));
    }

    /// Drop a collection, discarding all its records.
    pub fn drop_collection(&mut self, name: &str) -> Result<(), DbError> {
        self.collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DbError::CollectionNotFound(name.to_string()))
    }

    pub fn collection(&self, name: &str) -> Result<Arc<RwLock<Collection>>, DbError> {
        self.collections
            .get(name)
            .cloned()
            .ok_or_else(|| DbError::CollectionNotFound(name.to_string()))
    }

    pub fn collection_names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }
}
