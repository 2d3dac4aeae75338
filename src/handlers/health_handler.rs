use std::sync::Arc;

use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::{app_state::AppState, models::dto::response::HealthResponse};

const SERVICE_NAME: &str = "compass-api";

#[get("/api/health")]
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let database = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                log::warn!("Database health check failed: {}", e);
                "error"
            }
        },
        None => "not_configured",
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.llm_model.clone(),
        database: database.to_string(),
        active_sessions: state.chat_service.active_session_count().await,
        timestamp: Utc::now(),
    })
}
