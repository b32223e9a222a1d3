use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::{ApiRequest, Method, Target},
    error::ApiError,
    models::RoomPatch,
    state::AppState,
};

use super::{filled, require};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/rooms")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/rooms/{id}")
            .route(web::put().to(update))
            .route(web::patch().to(update))
            .route(web::delete().to(remove)),
    );
}

async fn list(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let request = ApiRequest::new(Target::Rooms, None, Method::Get);
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
        ("number", filled(&patch.number)),
        ("type", filled(&patch.room_type)),
        ("price", patch.price.is_some()),
        ("capacity", patch.capacity.is_some()),
    ])?;
    let request = ApiRequest::new(Target::Rooms, None, Method::Post);
    let response = state.api.dispatch(request, Some(payload)).await?;
    log::info!("Room created");
    Ok(HttpResponse::Created().json(response))
}

async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let payload = body.into_inner();
    parse(&payload)?;
    let request = ApiRequest::new(Target::Rooms, Some(path.into_inner()), Method::Put);
    let response = state.api.dispatch(request, Some(payload)).await?;
    Ok(HttpResponse::Ok().json(response))
}

async fn remove(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let request = ApiRequest::new(Target::Rooms, Some(path.into_inner()), Method::Delete);
    let response = state.api.dispatch(request, None).await?;
    Ok(HttpResponse::Ok().json(response))
}

fn parse(payload: &Value) -> Result<RoomPatch, ApiError> {
    serde_json::from_value(payload.clone())
        .map_err(|err| ApiError::ValidationFailed(format!("Invalid room payload: {err}")))
}
