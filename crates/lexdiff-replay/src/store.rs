use lexdiff_types::LawState;

use crate::error::StoreError;

/// Read boundary for step documents.
///
/// A timeline step's `reference` is its key. A change-bearing step that
/// carries no change set is replayed by diffing against the document the
/// store returns for it.
pub trait DocumentStore: Send + Sync {
    fn load(&self, reference: &str) -> Result<Option<LawState>, StoreError>;

    fn contains(&self, reference: &str) -> Result<bool, StoreError> {
        Ok(self.load(reference)?.is_some())
    }
}
