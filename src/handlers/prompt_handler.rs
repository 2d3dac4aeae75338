use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{app_state::AppState, errors::AppError, models::dto::request::CreatePromptRequest};

#[post("/api/prompts")]
pub async fn create_prompt(
    state: web::Data<Arc<AppState>>,
    request: web::Json<CreatePromptRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.prompt_service.create_prompt(request).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/prompts/{assignment_id}")]
pub async fn get_prompt(
    state: web::Data<Arc<AppState>>,
    assignment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let prompt = state.prompt_service.get_prompt(&assignment_id).await?;
    Ok(HttpResponse::Ok().json(prompt))
}

#[get("/api/assignments")]
pub async fn list_assignments(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let assignments = state.prompt_service.list_assignments().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "assignments": assignments })))
}

#[get("/api/students/{assignment_id}")]
pub async fn list_students(
    state: web::Data<Arc<AppState>>,
    assignment_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.prompt_service.list_students(&assignment_id).await?;
    Ok(HttpResponse::Ok().json(response))
}
