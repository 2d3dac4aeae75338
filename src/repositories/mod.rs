pub mod chat_history_repository;
pub mod prompt_repository;

pub use chat_history_repository::{ChatHistoryRepository, MongoChatHistoryRepository};
pub use prompt_repository::{MongoPromptRepository, PromptRepository};
