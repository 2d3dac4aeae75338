use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{AnalyzeAssignmentRequest, DiagnosticsQueryRequest},
        response::DiagnosticsQueryResponse,
    },
};

#[post("/api/diagnostics/analyze")]
pub async fn analyze_assignment(
    state: web::Data<Arc<AppState>>,
    request: web::Json<AnalyzeAssignmentRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .diagnostics_service
        .analyze_assignment(&request.assignment_id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/diagnostics/query")]
pub async fn query_diagnostics(
    state: web::Data<Arc<AppState>>,
    request: web::Json<DiagnosticsQueryRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let answer = state
        .diagnostics_service
        .query(&request.assignment_id, &request.question)
        .await?;

    Ok(HttpResponse::Ok().json(DiagnosticsQueryResponse {
        question: request.question,
        answer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::prompts::ANALYSIS_REQUIRED_MESSAGE,
        handlers::json_config,
        services::llm_client::MockLanguageModel,
        test_utils::{
            repositories::{InMemoryChatHistoryRepository, InMemoryPromptRepository},
            test_helpers::test_app_state,
        },
    };
    use actix_web::{http::StatusCode, test, App};

    fn app_state() -> Arc<AppState> {
        test_app_state(
            Arc::new(InMemoryPromptRepository::new()),
            Arc::new(InMemoryChatHistoryRepository::new()),
            Arc::new(MockLanguageModel::new()),
        )
    }

    #[actix_web::test]
    async fn test_analyze_without_histories_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(json_config())
                .service(analyze_assignment),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/diagnostics/analyze")
            .set_json(serde_json::json!({"assignment_id": "bio_1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_query_before_analysis() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .app_data(json_config())
                .service(query_diagnostics),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/diagnostics/query")
            .set_json(serde_json::json!({"assignment_id": "bio_1", "question": "Who struggled?"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["answer"], ANALYSIS_REQUIRED_MESSAGE);
        assert_eq!(body["question"], "Who struggled?");
    }
}
