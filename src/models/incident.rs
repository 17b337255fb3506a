use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The report categories offered by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentCategory {
    Harassment,
    Theft,
    UnsafeArea,
    Other,
}

impl IncidentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentCategory::Harassment => "harassment",
            IncidentCategory::Theft => "theft",
            IncidentCategory::UnsafeArea => "unsafe_area",
            IncidentCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A stored incident report, as returned by the list operation. Immutable
/// once created; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A report that passed validation but has not been persisted yet. The store
/// assigns `id` and `createdAt` on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncident {
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Raw create payload. The required fields stay optional here so that
/// completeness is decided by [`IncidentRequest::validate`] rather than by
/// deserialization or the storage layer.
#[derive(Debug, Default, Deserialize)]
pub struct IncidentRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// A required field was missing or empty. The field name is for the server
/// log; callers only see a generic client-error message.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required field: {field}")]
pub struct ValidationError {
    pub field: &'static str,
}

impl IncidentRequest {
    pub fn validate(self) -> Result<NewIncident, ValidationError> {
        let category = required(self.category, "category")?;
        let description = required(self.description, "description")?;
        let location = required(self.location, "location")?;

        Ok(NewIncident {
            category,
            description,
            location,
            coordinates: self.coordinates,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError { field }),
    }
}

/// Query parameters accepted by the list operation.
#[derive(Debug, Default, Deserialize)]
pub struct IncidentListQuery {
    pub category: Option<String>,
}

impl IncidentListQuery {
    /// The narrowing filter with the sentinel collapsed away: an omitted,
    /// empty, or `"all"` category means unfiltered.
    pub fn category_filter(&self) -> Option<&str> {
        match self.category.as_deref() {
            None | Some("") | Some("all") => None,
            Some(category) => Some(category),
        }
    }
}
