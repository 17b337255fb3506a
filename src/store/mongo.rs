use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::FindOptions,
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::{IncidentStore, StoreError};
use crate::models::incident::{Coordinates, Incident, NewIncident};

const DEFAULT_DATABASE: &str = "notonmywatch";

/// Document layout in the `incidents` collection. `createdAt` is a native
/// BSON datetime so the sort key is the same field the API exposes.
#[derive(Debug, Serialize, Deserialize)]
struct IncidentDocument {
    _id: ObjectId,
    category: String,
    description: String,
    location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<Coordinates>,
    #[serde(rename = "createdAt")]
    created_at: DateTime,
}

impl From<IncidentDocument> for Incident {
    fn from(document: IncidentDocument) -> Self {
        Incident {
            id: document._id.to_hex(),
            category: document.category,
            description: document.description,
            location: document.location,
            coordinates: document.coordinates,
            created_at: document.created_at.to_chrono(),
        }
    }
}

/// MongoDB-backed incident store. Holds an explicitly constructed collection
/// handle, built once at startup and shared with the routes that need it.
pub struct MongoIncidentStore {
    collection: Collection<IncidentDocument>,
}

impl MongoIncidentStore {
    /// Connect with `uri` and open the `incidents` collection. The database
    /// name comes from the URI path when present.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|error| StoreError(format!("failed to connect to database: {error}")))?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        Ok(MongoIncidentStore {
            collection: database.collection::<IncidentDocument>("incidents"),
        })
    }
}

#[async_trait]
impl IncidentStore for MongoIncidentStore {
    async fn insert(&self, incident: NewIncident) -> Result<Incident, StoreError> {
        let document = IncidentDocument {
            _id: ObjectId::new(),
            category: incident.category,
            description: incident.description,
            location: incident.location,
            coordinates: incident.coordinates,
            created_at: DateTime::now(),
        };

        self.collection
            .insert_one(&document, None)
            .await
            .map_err(|error| StoreError(format!("failed to insert incident: {error}")))?;

        Ok(document.into())
    }

    async fn find(&self, category: Option<&str>) -> Result<Vec<Incident>, StoreError> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();

        let mut cursor = self
            .collection
            .find(filter, options)
            .await
            .map_err(|error| StoreError(format!("failed to fetch incidents: {error}")))?;

        let mut incidents = Vec::new();
        while let Some(document) = cursor.next().await {
            let document = document
                .map_err(|error| StoreError(format!("failed to read incident: {error}")))?;
            incidents.push(document.into());
        }

        Ok(incidents)
    }
}
