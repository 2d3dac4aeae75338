use chrono::Utc;

use crate::models::domain::{
    AssignmentMetadata, AssignmentPrompt, ChatHistory, ChatMessage, ChatRole,
};

pub mod fixtures {
    use super::*;

    /// A prompt with exam content, as a professor would set it up.
    pub fn test_prompt(assignment_id: &str) -> AssignmentPrompt {
        AssignmentPrompt::new(
            assignment_id,
            "You are a careful biology tutor.".to_string(),
            AssignmentMetadata {
                course: "BIO 101".to_string(),
                professor: "Dr. Reyes".to_string(),
                exam_content: "1. Describe the phases of mitosis.".to_string(),
                ..Default::default()
            },
        )
    }

    /// One question-and-answer exchange per entry.
    pub fn test_history(student_id: &str, assignment_id: &str, exchanges: &[(&str, &str)]) -> ChatHistory {
        let now = Utc::now();
        let conversation = exchanges
            .iter()
            .flat_map(|(question, answer)| {
                [
                    ChatMessage::new(ChatRole::Student, *question, now),
                    ChatMessage::new(ChatRole::Assistant, *answer, now),
                ]
            })
            .collect();

        ChatHistory::new(student_id, assignment_id, conversation)
    }
}

pub mod repositories {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::AppResult,
        models::domain::{AssignmentPrompt, ChatHistory},
        repositories::{ChatHistoryRepository, PromptRepository},
    };

    #[derive(Default)]
    pub struct InMemoryPromptRepository {
        prompts: RwLock<HashMap<String, AssignmentPrompt>>,
    }

    impl InMemoryPromptRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert(&self, prompt: AssignmentPrompt) {
            self.prompts
                .write()
                .await
                .insert(prompt.assignment_id.clone(), prompt);
        }
    }

    #[async_trait]
    impl PromptRepository for InMemoryPromptRepository {
        async fn save(&self, prompt: AssignmentPrompt) -> AppResult<AssignmentPrompt> {
            self.insert(prompt.clone()).await;
            Ok(prompt)
        }

        async fn find_by_assignment_id(&self, assignment_id: &str) -> AppResult<Option<AssignmentPrompt>> {
            Ok(self.prompts.read().await.get(assignment_id).cloned())
        }

        async fn find_all(&self) -> AppResult<Vec<AssignmentPrompt>> {
            let mut prompts: Vec<_> = self.prompts.read().await.values().cloned().collect();
            prompts.sort_by(|a, b| a.assignment_id.cmp(&b.assignment_id));
            Ok(prompts)
        }

        async fn ensure_indexes(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct InMemoryChatHistoryRepository {
        histories: RwLock<HashMap<(String, String), ChatHistory>>,
    }

    impl InMemoryChatHistoryRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl ChatHistoryRepository for InMemoryChatHistoryRepository {
        async fn save(&self, history: ChatHistory) -> AppResult<ChatHistory> {
            let key = (history.student_id.clone(), history.assignment_id.clone());
            self.histories.write().await.insert(key, history.clone());
            Ok(history)
        }

        async fn find(&self, student_id: &str, assignment_id: &str) -> AppResult<Option<ChatHistory>> {
            let key = (student_id.to_string(), assignment_id.to_string());
            Ok(self.histories.read().await.get(&key).cloned())
        }

        async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<ChatHistory>> {
            let mut histories: Vec<_> = self
                .histories
                .read()
                .await
                .values()
                .filter(|history| history.assignment_id == assignment_id)
                .cloned()
                .collect();
            histories.sort_by(|a, b| a.student_id.cmp(&b.student_id));
            Ok(histories)
        }

        async fn list_students(&self, assignment_id: &str) -> AppResult<Vec<String>> {
            Ok(self
                .find_by_assignment(assignment_id)
                .await?
                .into_iter()
                .map(|history| history.student_id)
                .collect())
        }

        async fn ensure_indexes(&self) -> AppResult<()> {
            Ok(())
        }
    }
}

pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use super::repositories::{InMemoryChatHistoryRepository, InMemoryPromptRepository};
    use crate::{app_state::AppState, config::Config, services::llm_client::LanguageModel};

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// App state backed by in-memory repositories and the given model.
    pub fn test_app_state(
        prompts: Arc<InMemoryPromptRepository>,
        histories: Arc<InMemoryChatHistoryRepository>,
        llm: Arc<dyn LanguageModel>,
    ) -> Arc<AppState> {
        Arc::new(AppState::from_parts(Config::test_config(), prompts, histories, llm))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::repositories::*;
    use crate::repositories::{ChatHistoryRepository, PromptRepository};

    #[test]
    fn test_fixtures_history_alternates_roles() {
        let history = test_history("s1", "bio_1", &[("q1", "a1"), ("q2", "a2")]);
        assert_eq!(history.total_messages, 4);
        assert_eq!(history.message_contents(), vec!["q1", "a1", "q2", "a2"]);
    }

    #[tokio::test]
    async fn test_in_memory_history_upserts_per_student() {
        let repo = InMemoryChatHistoryRepository::new();
        repo.save(test_history("s2", "bio_1", &[("q", "a")])).await.unwrap();
        repo.save(test_history("s1", "bio_1", &[("q", "a")])).await.unwrap();
        repo.save(test_history("s1", "bio_1", &[("q", "a"), ("q", "a")])).await.unwrap();

        assert_eq!(repo.list_students("bio_1").await.unwrap(), vec!["s1", "s2"]);
        assert_eq!(repo.find("s1", "bio_1").await.unwrap().unwrap().total_messages, 4);
    }

    #[tokio::test]
    async fn test_in_memory_prompts_sorted() {
        let repo = InMemoryPromptRepository::new();
        repo.save(test_prompt("chem_1")).await.unwrap();
        repo.save(test_prompt("bio_1")).await.unwrap();

        let ids: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.assignment_id)
            .collect();
        assert_eq!(ids, vec!["bio_1", "chem_1"]);
    }
}
