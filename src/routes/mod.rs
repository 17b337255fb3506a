use actix_web::{get, web, HttpResponse};
use serde::{Deserialize, Serialize};

pub mod incident;

/// Success acknowledgment body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Failure body. Carries a generic message, never internal storage detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("NotOnMyWatch backend is running.")
}

/// Mounts every route; shared between the server binary and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(incident::create_incident)
        .service(incident::get_incidents);
}
