pub mod chat_service;
pub mod diagnostics_service;
pub mod display_service;
pub mod llm_client;
pub mod prompt_service;

pub use chat_service::{ChatService, PromptPolicy};
pub use diagnostics_service::DiagnosticsService;
pub use llm_client::{AnthropicClient, LanguageModel};
pub use prompt_service::PromptService;
