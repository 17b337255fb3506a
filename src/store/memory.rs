use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::Mutex;

use super::{IncidentStore, StoreError};
use crate::models::incident::{Incident, NewIncident};

/// In-process store with the same contract as the MongoDB backend. Backs the
/// HTTP-level tests; set `fail` to exercise the server-error paths.
#[derive(Default)]
pub struct MemoryIncidentStore {
    pub records: Mutex<Vec<Incident>>,
    pub fail: bool,
}

#[async_trait]
impl IncidentStore for MemoryIncidentStore {
    async fn insert(&self, incident: NewIncident) -> Result<Incident, StoreError> {
        if self.fail {
            return Err(StoreError(String::from("memory store unavailable")));
        }

        let record = Incident {
            id: ObjectId::new().to_hex(),
            category: incident.category,
            description: incident.description,
            location: incident.location,
            coordinates: incident.coordinates,
            created_at: Utc::now(),
        };
        self.records.lock().await.push(record.clone());

        Ok(record)
    }

    async fn find(&self, category: Option<&str>) -> Result<Vec<Incident>, StoreError> {
        if self.fail {
            return Err(StoreError(String::from("memory store unavailable")));
        }

        let records = self.records.lock().await;
        let mut incidents: Vec<Incident> = records
            .iter()
            .rev()
            .filter(|record| category.map_or(true, |category| record.category == category))
            .cloned()
            .collect();
        // Stable sort over the reversed log keeps same-timestamp records
        // newest-insertion-first.
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(incidents)
    }
}
