use actix_web::{web, HttpResponse};

use crate::error::ApiError;

pub mod bookings;
pub mod dashboard;
pub mod guests;
pub mod rooms;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)));
    rooms::configure(cfg);
    guests::configure(cfg);
    bookings::configure(cfg);
    dashboard::configure(cfg);
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// Caller-side required-field check, run before anything is dispatched.
pub(crate) fn require(fields: &[(&str, bool)]) -> Result<(), ApiError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationFailed(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

pub(crate) fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
