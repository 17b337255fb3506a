use actix_web::{get, post, web, HttpResponse};
use tracing::{debug, error};

use crate::models::incident::{IncidentListQuery, IncidentRequest};
use crate::routes::{ErrorResponse, MessageResponse};
use crate::store::IncidentStore;

#[post("/api/incidents")]
pub async fn create_incident(
    store: web::Data<dyn IncidentStore>,
    payload: web::Json<IncidentRequest>,
) -> HttpResponse {
    let incident = match payload.into_inner().validate() {
        Ok(incident) => incident,
        Err(error) => {
            debug!("rejected incident report: {error}");
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: String::from("Missing required fields."),
            });
        }
    };

    match store.insert(incident).await {
        Ok(incident) => {
            debug!(id = %incident.id, "incident logged");
            HttpResponse::Created().json(MessageResponse {
                message: String::from("Incident logged successfully."),
            })
        }
        Err(error) => {
            error!("failed to log incident: {error}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: String::from("Failed to log incident."),
            })
        }
    }
}

#[get("/api/incidents")]
pub async fn get_incidents(
    store: web::Data<dyn IncidentStore>,
    query: web::Query<IncidentListQuery>,
) -> HttpResponse {
    match store.find(query.category_filter()).await {
        Ok(incidents) => HttpResponse::Ok().json(incidents),
        Err(error) => {
            error!("failed to fetch incidents: {error}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: String::from("Failed to fetch incidents."),
            })
        }
    }
}
