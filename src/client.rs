//! Reporting client: the submission-form state machine and the HTTP calls
//! against the incident store service.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::time::sleep;

use crate::models::incident::{Incident, IncidentCategory, NewIncident};
use crate::routes::ErrorResponse;

/// How long a successful-submission confirmation stays visible before the
/// form resets.
pub const CONFIRMATION_DISPLAY: Duration = Duration::from_secs(3);

const GENERIC_SUBMIT_ERROR: &str = "Failed to submit report. Please try again.";
const GENERIC_FETCH_ERROR: &str = "Failed to fetch incidents.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A required field is empty; the service was not contacted.
    #[error("Please fill in all fields.")]
    IncompleteForm,
    /// The service rejected the request or could not be reached.
    #[error("{0}")]
    Submission(String),
}

/// Category narrowing for the browse view. `All` maps to the service's
/// `all` sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(IncidentCategory),
}

impl CategoryFilter {
    pub fn as_query(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

pub struct ReportingClient {
    http: Client,
    base_url: String,
}

impl ReportingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ReportingClient {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// POST one validated report. Failures carry the service's `{error}`
    /// message when one is provided, a generic message otherwise.
    pub async fn submit_incident(&self, incident: &NewIncident) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/api/incidents", self.base_url))
            .json(incident)
            .send()
            .await
            .map_err(|_| ClientError::Submission(String::from(GENERIC_SUBMIT_ERROR)))?;

        if response.status().is_success() {
            return Ok(());
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| String::from(GENERIC_SUBMIT_ERROR));
        Err(ClientError::Submission(message))
    }

    /// GET the incident list for `filter`, newest first. Callers re-issue
    /// this on every filter change; nothing is cached.
    pub async fn list_incidents(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Incident>, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/incidents", self.base_url))
            .query(&[("category", filter.as_query())])
            .send()
            .await
            .map_err(|_| ClientError::Submission(String::from(GENERIC_FETCH_ERROR)))?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| String::from(GENERIC_FETCH_ERROR));
            return Err(ClientError::Submission(message));
        }

        response
            .json::<Vec<Incident>>()
            .await
            .map_err(|_| ClientError::Submission(String::from(GENERIC_FETCH_ERROR)))
    }
}

/// Where the submission form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    /// A request is in flight; further submission attempts are refused.
    Submitting,
    /// The service accepted the report; the confirmation is on display.
    Submitted,
    /// The last submission failed; field values are kept for a retry.
    Failed(String),
}

/// The incident submission form: three field values plus an explicit
/// `Idle -> Submitting -> Submitted | Failed -> Idle` state machine.
#[derive(Debug, Default)]
pub struct ReportForm {
    pub category: String,
    pub description: String,
    pub location: String,
    pub state: FormState,
}

impl ReportForm {
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Whether a new submission attempt is currently allowed.
    pub fn can_submit(&self) -> bool {
        self.state != FormState::Submitting
    }

    /// Local completeness check and transition to `Submitting`. Refuses a
    /// second in-flight submission. Never contacts the service.
    pub fn begin_submit(&mut self) -> Result<NewIncident, ClientError> {
        if !self.can_submit() {
            return Err(ClientError::Submission(String::from(
                "A submission is already in progress.",
            )));
        }
        if self.category.is_empty() || self.description.is_empty() || self.location.is_empty() {
            return Err(ClientError::IncompleteForm);
        }

        self.state = FormState::Submitting;
        Ok(NewIncident {
            category: self.category.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            coordinates: None,
        })
    }

    /// Record the service outcome: `Submitted` on success, `Failed` with the
    /// user-facing message otherwise.
    pub fn complete_submit(&mut self, outcome: &Result<(), ClientError>) {
        self.state = match outcome {
            Ok(()) => FormState::Submitted,
            Err(error) => FormState::Failed(error.to_string()),
        };
    }

    /// Validate, submit, and record the outcome in one step.
    pub async fn submit(&mut self, client: &ReportingClient) -> Result<(), ClientError> {
        let incident = self.begin_submit()?;
        let outcome = client.submit_incident(&incident).await;
        self.complete_submit(&outcome);
        outcome
    }

    /// Hold the confirmation for the display interval, then clear every
    /// field and return to `Idle`. No-op unless a submission just succeeded.
    pub async fn clear_confirmation(&mut self) {
        if self.state != FormState::Submitted {
            return;
        }

        sleep(CONFIRMATION_DISPLAY).await;
        self.category.clear();
        self.description.clear();
        self.location.clear();
        self.state = FormState::Idle;
    }

    /// Dismiss a failure message, keeping field values for the retry.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, FormState::Failed(_)) {
            self.state = FormState::Idle;
        }
    }
}
