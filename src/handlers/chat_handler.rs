use std::sync::Arc;

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::SessionKey,
        dto::{request::ChatRequest, response::ChatResponse},
    },
    services::PromptPolicy,
};

#[post("/api/chat")]
pub async fn chat(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ChatRequest>,
    http_request: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let key = SessionKey::new(request.student_id, request.assignment_id);
    log::info!(
        "Chat message for session {} (request {})",
        key,
        get_request_id(&http_request).unwrap_or_default()
    );

    let response = state
        .chat_service
        .send_message(&key, &request.message, PromptPolicy::StoredOnly)
        .await?;

    Ok(HttpResponse::Ok().json(ChatResponse {
        response,
        session_id: key.to_string(),
        timestamp: Utc::now(),
    }))
}

#[get("/api/chat/history/{student_id}/{assignment_id}")]
pub async fn get_chat_history(
    state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (student_id, assignment_id) = path.into_inner();
    let history = state
        .chat_service
        .get_history(&student_id, &assignment_id)
        .await?;
    Ok(HttpResponse::Ok().json(history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::json_config,
        repositories::ChatHistoryRepository,
        services::llm_client::MockLanguageModel,
        test_utils::{
            fixtures::{test_history, test_prompt},
            repositories::{InMemoryChatHistoryRepository, InMemoryPromptRepository},
            test_helpers::{assert_error_status, test_app_state},
        },
    };
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_chat_returns_reply_and_session_id() {
        let prompts = Arc::new(InMemoryPromptRepository::new());
        prompts.insert(test_prompt("bio_1")).await;

        let mut llm = MockLanguageModel::new();
        llm.expect_generate()
            .returning(|_| Ok("Which phase comes first?".to_string()));

        let state = test_app_state(prompts, Arc::new(InMemoryChatHistoryRepository::new()), Arc::new(llm));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(chat),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({
                "student_id": "s1",
                "assignment_id": "bio_1",
                "message": "Explain mitosis"
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["response"], "Which phase comes first?");
        assert_eq!(body["session_id"], "s1_bio_1");
    }

    #[actix_web::test]
    async fn test_chat_without_prompt_is_not_found() {
        let state = test_app_state(
            Arc::new(InMemoryPromptRepository::new()),
            Arc::new(InMemoryChatHistoryRepository::new()),
            Arc::new(MockLanguageModel::new()),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(chat),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({
                "student_id": "s1",
                "assignment_id": "unknown",
                "message": "hi"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_chat_missing_field_is_bad_request() {
        let state = test_app_state(
            Arc::new(InMemoryPromptRepository::new()),
            Arc::new(InMemoryChatHistoryRepository::new()),
            Arc::new(MockLanguageModel::new()),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(json_config())
                .service(chat),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(serde_json::json!({"student_id": "s1"}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_history_lookup() {
        let histories = Arc::new(InMemoryChatHistoryRepository::new());
        histories
            .save(test_history("s1", "bio_1", &[("q", "a")]))
            .await
            .unwrap();

        let state = test_app_state(
            Arc::new(InMemoryPromptRepository::new()),
            histories,
            Arc::new(MockLanguageModel::new()),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_chat_history),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/chat/history/s1/bio_1")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_messages"], 2);

        let req = test::TestRequest::get()
            .uri("/api/chat/history/s2/bio_1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
