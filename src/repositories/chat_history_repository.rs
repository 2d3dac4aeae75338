use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, CHAT_HISTORIES_COLLECTION},
    errors::AppResult,
    models::domain::ChatHistory,
};

#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// Inserts or replaces the history of one student on one assignment.
    async fn save(&self, history: ChatHistory) -> AppResult<ChatHistory>;
    async fn find(&self, student_id: &str, assignment_id: &str) -> AppResult<Option<ChatHistory>>;
    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<ChatHistory>>;
    /// Student ids with a stored history for the assignment, sorted.
    async fn list_students(&self, assignment_id: &str) -> AppResult<Vec<String>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoChatHistoryRepository {
    collection: Collection<ChatHistory>,
}

impl MongoChatHistoryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(CHAT_HISTORIES_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl ChatHistoryRepository for MongoChatHistoryRepository {
    async fn save(&self, history: ChatHistory) -> AppResult<ChatHistory> {
        let filter = doc! {
            "student_id": history.student_id.as_str(),
            "assignment_id": history.assignment_id.as_str(),
        };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, &history)
            .with_options(options)
            .await?;

        Ok(history)
    }

    async fn find(&self, student_id: &str, assignment_id: &str) -> AppResult<Option<ChatHistory>> {
        let history = self
            .collection
            .find_one(doc! { "student_id": student_id, "assignment_id": assignment_id })
            .await?;
        Ok(history)
    }

    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<ChatHistory>> {
        let cursor = self
            .collection
            .find(doc! { "assignment_id": assignment_id })
            .sort(doc! { "student_id": 1 })
            .await?;
        let histories: Vec<ChatHistory> = cursor.try_collect().await?;
        Ok(histories)
    }

    async fn list_students(&self, assignment_id: &str) -> AppResult<Vec<String>> {
        let mut students: Vec<String> = self
            .find_by_assignment(assignment_id)
            .await?
            .into_iter()
            .map(|history| history.student_id)
            .collect();
        students.sort();
        students.dedup();
        Ok(students)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("student_assignment_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "assignment_id": 1, "student_id": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Ensured indexes on {} collection", CHAT_HISTORIES_COLLECTION);

        Ok(())
    }
}
