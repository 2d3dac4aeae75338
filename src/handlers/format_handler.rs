use actix_web::{post, web, HttpResponse};

use crate::{errors::AppError, models::dto::request::FormatRequest, services::display_service};

#[post("/api/format")]
pub async fn format_text(request: web::Json<FormatRequest>) -> Result<HttpResponse, AppError> {
    let response = display_service::render(request.into_inner())?;
    Ok(HttpResponse::Ok().json(response))
}
