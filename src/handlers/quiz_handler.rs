use std::sync::Arc;

use actix_web::{post, web, HttpResponse};
use chrono::Utc;
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::SessionKey,
        dto::{
            request::{QuizPromptRequest, QuizSessionRequest},
            response::{ClearSessionResponse, QuizPromptResponse, SessionInfoResponse},
        },
    },
    services::{chat_service::quiz_context_prompt, PromptPolicy},
};

#[post("/api/quiz/process-prompt")]
pub async fn process_prompt(
    state: web::Data<Arc<AppState>>,
    request: web::Json<QuizPromptRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let key = SessionKey::new(request.student_id, request.assignment_id);
    let message = quiz_context_prompt(&request.prompt, &request.question_text);

    let response = state
        .chat_service
        .send_message(&key, &message, PromptPolicy::QuizFallback)
        .await?;

    Ok(HttpResponse::Ok().json(QuizPromptResponse {
        response,
        question_id: request.question_id,
        session_id: key.to_string(),
        timestamp: Utc::now(),
    }))
}

#[post("/api/quiz/session-info")]
pub async fn session_info(
    state: web::Data<Arc<AppState>>,
    request: web::Json<QuizSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let key = SessionKey::new(request.student_id, request.assignment_id);

    let response = match state.chat_service.session_message_count(&key).await {
        Some(message_count) => SessionInfoResponse {
            session_id: key.to_string(),
            student_id: Some(key.student_id.clone()),
            assignment_id: Some(key.assignment_id.clone()),
            message_count: Some(message_count),
            exists: true,
        },
        None => SessionInfoResponse {
            session_id: key.to_string(),
            student_id: None,
            assignment_id: None,
            message_count: None,
            exists: false,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/quiz/clear-session")]
pub async fn clear_session(
    state: web::Data<Arc<AppState>>,
    request: web::Json<QuizSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let key = SessionKey::new(request.student_id, request.assignment_id);
    let cleared = state.chat_service.clear_session(&key).await;

    Ok(HttpResponse::Ok().json(ClearSessionResponse {
        session_id: key.to_string(),
        cleared,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        handlers::json_config,
        services::llm_client::MockLanguageModel,
        test_utils::{
            repositories::{InMemoryChatHistoryRepository, InMemoryPromptRepository},
            test_helpers::{assert_success_status, test_app_state},
        },
    };
    use actix_web::{test, App};

    fn quiz_state(llm: MockLanguageModel) -> Arc<AppState> {
        test_app_state(
            Arc::new(InMemoryPromptRepository::new()),
            Arc::new(InMemoryChatHistoryRepository::new()),
            Arc::new(llm),
        )
    }

    #[actix_web::test]
    async fn test_process_prompt_with_defaults() {
        let mut llm = MockLanguageModel::new();
        llm.expect_generate()
            .withf(|request| request.prompt == "[Question: What is 2^10?]\n\nStudent asks: hint please")
            .times(1)
            .returning(|_| Ok("Try doubling 1 ten times.".to_string()));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(quiz_state(llm)))
                .app_data(json_config())
                .service(process_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quiz/process-prompt")
            .set_json(serde_json::json!({
                "prompt": "hint please",
                "questionText": "What is 2^10?"
            }))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["response"], "Try doubling 1 ten times.");
        assert_eq!(body["questionId"], "unknown");
        assert_eq!(body["sessionId"], "anonymous_student_default_quiz");
    }

    #[actix_web::test]
    async fn test_session_lifecycle() {
        let mut llm = MockLanguageModel::new();
        llm.expect_generate().returning(|_| Ok("ok".to_string()));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(quiz_state(llm)))
                .app_data(json_config())
                .service(process_prompt)
                .service(session_info)
                .service(clear_session),
        )
        .await;

        let session = serde_json::json!({"studentId": "s1", "assignmentId": "quiz_3"});

        let req = test::TestRequest::post()
            .uri("/api/quiz/session-info")
            .set_json(&session)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["exists"], false);
        assert!(body.get("messageCount").is_none());

        let req = test::TestRequest::post()
            .uri("/api/quiz/process-prompt")
            .set_json(serde_json::json!({"prompt": "hi", "studentId": "s1", "assignmentId": "quiz_3"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());

        let req = test::TestRequest::post()
            .uri("/api/quiz/session-info")
            .set_json(&session)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["exists"], true);
        assert_eq!(body["messageCount"], 2);
        assert_eq!(body["sessionId"], "s1_quiz_3");

        let req = test::TestRequest::post()
            .uri("/api/quiz/clear-session")
            .set_json(&session)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["cleared"], true);
    }

    #[actix_web::test]
    async fn test_empty_prompt_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(quiz_state(MockLanguageModel::new())))
                .app_data(json_config())
                .service(process_prompt),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quiz/process-prompt")
            .set_json(serde_json::json!({"prompt": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
