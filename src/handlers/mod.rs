pub mod chat_handler;
pub mod diagnostics_handler;
pub mod format_handler;
pub mod health_handler;
pub mod prompt_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use chat_handler::{chat, get_chat_history};
pub use diagnostics_handler::{analyze_assignment, query_diagnostics};
pub use format_handler::format_text;
pub use health_handler::health_check;
pub use prompt_handler::{create_prompt, get_prompt, list_assignments, list_students};
pub use quiz_handler::{clear_session, process_prompt, session_info};

/// Malformed or incomplete JSON bodies are reported as validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {}", err);
        AppError::ValidationError(err.to_string()).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(format_text)
        .service(process_prompt)
        .service(session_info)
        .service(clear_session)
        .service(chat)
        .service(get_chat_history)
        .service(create_prompt)
        .service(get_prompt)
        .service(list_assignments)
        .service(list_students)
        .service(analyze_assignment)
        .service(query_diagnostics)
        .service(health_check);
}
