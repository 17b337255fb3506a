use async_trait::async_trait;
use thiserror::Error;

use crate::models::incident::{Incident, NewIncident};

pub mod memory;
pub mod mongo;

/// The backing store could not complete a read or write. The message is for
/// the server log; callers only ever receive a generic failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Persistence contract for incident records: append one, or read them back
/// newest-first, optionally narrowed to an exact category match.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Durably append one record, assigning its `id` and `createdAt`.
    async fn insert(&self, incident: NewIncident) -> Result<Incident, StoreError>;

    /// All records (`None`) or the exact-category subset (`Some`), sorted by
    /// `createdAt` descending.
    async fn find(&self, category: Option<&str>) -> Result<Vec<Incident>, StoreError>;
}
