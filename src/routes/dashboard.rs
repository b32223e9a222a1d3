use actix_web::{web, HttpResponse};

use crate::{
    api::{ApiRequest, Method, Target},
    error::ApiError,
    state::AppState,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/dashboard").route(web::get().to(stats)));
}

async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let request = ApiRequest::new(Target::Dashboard, None, Method::Get);
    let response = state.api.dispatch(request, None).await?;
    Ok(HttpResponse::Ok().json(response))
}
