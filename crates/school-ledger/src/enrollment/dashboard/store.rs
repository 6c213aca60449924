use super::super::domain::{SchoolId, SchoolRecord};
use super::super::ledger::LedgerSnapshot;

/// External school store: supplies school records and accepts updated ledgers.
pub trait SchoolStore: Send + Sync {
    fn schools(&self) -> Result<Vec<SchoolRecord>, StoreError>;
    fn fetch(&self, id: &SchoolId) -> Result<Option<SchoolRecord>, StoreError>;
    fn persist_ledger(&self, id: &SchoolId, snapshot: LedgerSnapshot) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("school {0} not found")]
    NotFound(SchoolId),
    #[error("school store unavailable: {0}")]
    Unavailable(String),
}
