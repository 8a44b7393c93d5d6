use std::collections::HashMap;
use std::sync::RwLock;

use lexdiff_types::LawState;

use crate::error::StoreError;
use crate::store::DocumentStore;

/// In-memory document store for tests, the CLI, and embedding.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    inner: RwLock<HashMap<String, LawState>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, returning the one it replaced.
    pub fn insert(
        &self,
        reference: impl Into<String>,
        law: LawState,
    ) -> Result<Option<LawState>, StoreError> {
        let mut documents = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(documents.insert(reference.into(), law))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let documents = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Stored references, sorted.
    pub fn references(&self) -> Result<Vec<String>, StoreError> {
        let documents = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut references: Vec<_> = documents.keys().cloned().collect();
        references.sort();
        Ok(references)
    }
}

impl FromIterator<(String, LawState)> for InMemoryDocumentStore {
    fn from_iter<I: IntoIterator<Item = (String, LawState)>>(iter: I) -> Self {
        Self {
            inner: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, reference: &str) -> Result<Option<LawState>, StoreError> {
        let documents = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(documents.get(reference).cloned())
    }
}
