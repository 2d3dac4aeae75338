pub mod assignment_prompt;
pub mod chat_history;
pub mod student_analysis;
pub use assignment_prompt::{AssignmentMetadata, AssignmentPrompt};
pub use chat_history::{ChatHistory, ChatMessage, ChatRole, SessionKey};
pub use student_analysis::{AssignmentAnalysis, CanonicalCategory, StudentAnalysis};
