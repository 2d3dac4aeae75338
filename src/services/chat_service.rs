use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    constants::prompts::{BASE_SYSTEM_PROMPT, QUIZ_GUIDELINES},
    errors::{AppError, AppResult},
    models::domain::{ChatHistory, ChatMessage, ChatRole, SessionKey},
    repositories::{ChatHistoryRepository, PromptRepository},
    services::llm_client::{GenerationRequest, LanguageModel},
};

const CHAT_MAX_TOKENS: u32 = 2048;

/// Where the system prompt for a conversation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPolicy {
    /// The assignment must have a stored prompt.
    StoredOnly,
    /// Fall back to the base prompt with quiz guidelines.
    QuizFallback,
}

type Conversation = Arc<Mutex<Vec<ChatMessage>>>;

pub struct ChatService {
    prompts: Arc<dyn PromptRepository>,
    histories: Arc<dyn ChatHistoryRepository>,
    llm: Arc<dyn LanguageModel>,
    sessions: RwLock<HashMap<SessionKey, Conversation>>,
}

impl ChatService {
    pub fn new(
        prompts: Arc<dyn PromptRepository>,
        histories: Arc<dyn ChatHistoryRepository>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            prompts,
            histories,
            llm,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Sends one student message and returns the assistant's reply. The
    /// exchange is appended to the session and persisted before returning.
    pub async fn send_message(
        &self,
        key: &SessionKey,
        message: &str,
        policy: PromptPolicy,
    ) -> AppResult<String> {
        let system_prompt = self.system_prompt(&key.assignment_id, policy).await?;
        let session = self.session(key).await?;

        // Held across the model call so one student's messages stay ordered.
        let mut conversation = session.lock().await;

        let request = GenerationRequest::new(build_context(&conversation, message))
            .with_system_prompt(system_prompt)
            .with_max_tokens(CHAT_MAX_TOKENS);
        let response = self.llm.generate(request).await?;

        let timestamp = Utc::now();
        let mut updated = conversation.clone();
        updated.push(ChatMessage::new(ChatRole::Student, message, timestamp));
        updated.push(ChatMessage::new(ChatRole::Assistant, response.clone(), timestamp));

        self.histories
            .save(ChatHistory::new(&key.student_id, &key.assignment_id, updated.clone()))
            .await?;
        *conversation = updated;

        log::info!("Session {} now has {} messages", key, conversation.len());
        Ok(response)
    }

    pub async fn get_history(&self, student_id: &str, assignment_id: &str) -> AppResult<ChatHistory> {
        self.histories
            .find(student_id, assignment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Chat history not found".to_string()))
    }

    /// Message count of an active session, `None` when no session is open.
    pub async fn session_message_count(&self, key: &SessionKey) -> Option<usize> {
        let session = self.sessions.read().await.get(key).cloned()?;
        let conversation = session.lock().await;
        Some(conversation.len())
    }

    /// Drops the in-memory session. Stored history is kept.
    pub async fn clear_session(&self, key: &SessionKey) -> bool {
        let Some(session) = self.sessions.read().await.get(key).cloned() else {
            return false;
        };

        // An in-flight exchange must be persisted before the session can be
        // reopened from stored history.
        let _conversation = session.lock().await;

        let mut sessions = self.sessions.write().await;
        let removed = match sessions.get(key) {
            Some(current) if Arc::ptr_eq(current, &session) => sessions.remove(key).is_some(),
            _ => false,
        };
        if removed {
            log::info!("Cleared session {}", key);
        }
        removed
    }

    pub async fn active_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn system_prompt(&self, assignment_id: &str, policy: PromptPolicy) -> AppResult<String> {
        match self.prompts.find_by_assignment_id(assignment_id).await? {
            Some(prompt) => Ok(prompt.system_prompt),
            None if policy == PromptPolicy::QuizFallback => {
                log::info!(
                    "No stored prompt for '{}', using default quiz prompt",
                    assignment_id
                );
                Ok(format!("{}{}", BASE_SYSTEM_PROMPT, QUIZ_GUIDELINES))
            }
            None => Err(AppError::NotFound(format!(
                "Prompt not found for assignment: {}",
                assignment_id
            ))),
        }
    }

    async fn session(&self, key: &SessionKey) -> AppResult<Conversation> {
        if let Some(session) = self.sessions.read().await.get(key) {
            return Ok(Arc::clone(session));
        }

        let conversation = self
            .histories
            .find(&key.student_id, &key.assignment_id)
            .await?
            .map(|history| history.conversation)
            .unwrap_or_default();

        let mut sessions = self.sessions.write().await;
        // Another request may have opened the session while history loaded.
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| {
                log::info!("Opened session {} with {} stored messages", key, conversation.len());
                Arc::new(Mutex::new(conversation))
            });
        Ok(Arc::clone(session))
    }
}

/// Model input for a new message, with the previous exchanges inlined.
pub fn build_context(conversation: &[ChatMessage], message: &str) -> String {
    if conversation.is_empty() {
        return message.to_string();
    }

    let mut context = String::from("\n\nPrevious conversation:\n");
    for entry in conversation {
        context.push_str(&format!("{}: {}\n", entry.role, entry.content));
    }
    context.push_str(&format!("\nStudent: {}", message));
    context
}

/// Quiz prompts carry the question they were asked about.
pub fn quiz_context_prompt(prompt: &str, question_text: &str) -> String {
    if question_text.is_empty() {
        prompt.to_string()
    } else {
        format!("[Question: {}]\n\nStudent asks: {}", question_text, prompt)
    }
}
