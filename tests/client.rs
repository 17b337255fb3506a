use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use notonmywatch::client::{CategoryFilter, ClientError, FormState, ReportForm, ReportingClient};
use notonmywatch::models::incident::{IncidentCategory, NewIncident};
use notonmywatch::routes;
use notonmywatch::store::{memory::MemoryIncidentStore, IncidentStore};

/// Serve the app over `store` on an ephemeral local port and return the
/// base URL for a `ReportingClient`.
fn spawn_service(store: MemoryIncidentStore) -> std::io::Result<String> {
    let store: web::Data<dyn IncidentStore> =
        web::Data::from(Arc::new(store) as Arc<dyn IncidentStore>);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let port = server.addrs()[0].port();
    actix_web::rt::spawn(server.run());

    Ok(format!("http://127.0.0.1:{port}"))
}

fn filled_form() -> ReportForm {
    ReportForm {
        category: "harassment".to_string(),
        description: "followed on Main St".to_string(),
        location: "Main St & 5th".to_string(),
        ..ReportForm::default()
    }
}

#[actix_web::test]
async fn submitted_report_round_trips_through_the_service() {
    let base_url = spawn_service(MemoryIncidentStore::default()).unwrap();
    let client = ReportingClient::new(base_url);

    let mut form = filled_form();
    form.submit(&client).await.unwrap();
    assert_eq!(form.state(), &FormState::Submitted);

    let incidents = client.list_incidents(&CategoryFilter::All).await.unwrap();
    assert_eq!(incidents.len(), 1);
    assert_eq!(incidents[0].category, "harassment");
    assert_eq!(incidents[0].description, "followed on Main St");
    assert!(!incidents[0].id.is_empty());

    let narrowed = client
        .list_incidents(&CategoryFilter::Only(IncidentCategory::Theft))
        .await
        .unwrap();
    assert!(narrowed.is_empty());
}

#[actix_web::test]
async fn service_error_message_reaches_the_form() {
    let base_url = spawn_service(MemoryIncidentStore {
        fail: true,
        ..MemoryIncidentStore::default()
    })
    .unwrap();
    let client = ReportingClient::new(base_url);

    let mut form = filled_form();
    let outcome = form.submit(&client).await;
    assert_eq!(
        outcome,
        Err(ClientError::Submission(String::from(
            "Failed to log incident."
        )))
    );
    assert_eq!(
        form.state(),
        &FormState::Failed(String::from("Failed to log incident."))
    );
    assert_eq!(form.description, "followed on Main St");

    let fetched = client.list_incidents(&CategoryFilter::All).await;
    assert_eq!(
        fetched,
        Err(ClientError::Submission(String::from(
            "Failed to fetch incidents."
        )))
    );
}

#[actix_web::test]
async fn rejected_payload_carries_the_service_message() {
    let base_url = spawn_service(MemoryIncidentStore::default()).unwrap();
    let client = ReportingClient::new(base_url);

    let incomplete = NewIncident {
        category: "harassment".to_string(),
        description: String::new(),
        location: "Main St & 5th".to_string(),
        coordinates: None,
    };
    let outcome = client.submit_incident(&incomplete).await;
    assert_eq!(
        outcome,
        Err(ClientError::Submission(String::from(
            "Missing required fields."
        )))
    );
}

#[actix_web::test]
async fn unreachable_service_falls_back_to_generic_messages() {
    // Discard port; nothing listens there.
    let client = ReportingClient::new("http://127.0.0.1:9");

    let mut form = filled_form();
    let outcome = form.submit(&client).await;
    assert_eq!(
        outcome,
        Err(ClientError::Submission(String::from(
            "Failed to submit report. Please try again."
        )))
    );
    assert!(matches!(form.state(), FormState::Failed(_)));
    assert_eq!(form.category, "harassment");

    let fetched = client.list_incidents(&CategoryFilter::All).await;
    assert_eq!(
        fetched,
        Err(ClientError::Submission(String::from(
            "Failed to fetch incidents."
        )))
    );
}
