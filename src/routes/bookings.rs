use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    api::{ApiRequest, Method, Target},
    error::ApiError,
    models::{BookingPatch, Room},
    pricing::{compute_total, nights_between},
    state::AppState,
};

use super::require;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/bookings/quote").route(web::get().to(quote)))
        .service(
            web::resource("/bookings")
                .route(web::get().to(list))
                .route(web::post().to(create)),
        )
        .service(
            web::resource("/bookings/{id}")
                .route(web::put().to(update))
                .route(web::patch().to(update))
                .route(web::delete().to(remove)),
        );
}

async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let request = ApiRequest::new(Target::Bookings, None, Method::Get);
    let response = state.api.dispatch(request, None).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn create(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();
    let patch = parse(&payload)?;
    require(&[
        ("guestId", patch.guest_id.is_some()),
        ("roomId", patch.room_id.is_some()),
        ("checkIn", patch.check_in.is_some()),
        ("checkOut", patch.check_out.is_some()),
    ])?;
    check_date_order(&patch)?;
    let request = ApiRequest::new(Target::Bookings, None, Method::Post);
    let response = state.api.dispatch(request, Some(payload)).await?;
    log::info!("Booking created");
    Ok(HttpResponse::Created().json(response))
}

async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();
    let patch = parse(&payload)?;
    check_date_order(&patch)?;
    let request = ApiRequest::new(Target::Bookings, Some(path.into_inner()), Method::Put);
    let response = state.api.dispatch(request, Some(payload)).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn remove(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let request = ApiRequest::new(Target::Bookings, Some(path.into_inner()), Method::Delete);
    let response = state.api.dispatch(request, None).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteQuery {
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
}

/// Live price preview: nights and total for a room and date range. A
/// non-positive night count quotes zero instead of erroring, so the caller
/// can keep polling while dates are being picked.
async fn quote(
    state: web::Data<AppState>,
    query: web::Query<QuoteQuery>,
) -> Result<HttpResponse, ApiError> {
    let request = ApiRequest::new(Target::Rooms, None, Method::Get);
    let response = state.api.dispatch(request, None).await?;
    let rooms: Vec<Room> = serde_json::from_value(response["data"].clone())
        .map_err(|err| ApiError::RequestFailed(format!("Malformed rooms response: {err}")))?;
    let room = rooms
        .into_iter()
        .find(|room| room.id == query.room_id)
        .ok_or(ApiError::NotFound("Room"))?;
    let nights = nights_between(query.check_in, query.check_out);
    let total = compute_total(nights, room.price);
    Ok(HttpResponse::Ok().json(json!({
        "data": { "nights": nights, "totalPrice": total }
    })))
}

/// Checkout strictly after checkin, whenever both dates are in the patch.
fn check_date_order(patch: &BookingPatch) -> Result<(), ApiError> {
    if let (Some(check_in), Some(check_out)) = (patch.check_in, patch.check_out) {
        if nights_between(check_in, check_out) <= 0 {
            return Err(ApiError::ValidationFailed(
                "Check-out date must be after check-in date".to_string(),
            ));
        }
    }
    Ok(())
}

fn parse(payload: &Value) -> Result<BookingPatch, ApiError> {
    serde_json::from_value(payload.clone())
        .map_err(|err| ApiError::ValidationFailed(format!("Invalid booking payload: {err}")))
}
