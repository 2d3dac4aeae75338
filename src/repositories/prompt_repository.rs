use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, PROMPTS_COLLECTION},
    errors::AppResult,
    models::domain::AssignmentPrompt,
};

#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Inserts or replaces the prompt stored for the assignment.
    async fn save(&self, prompt: AssignmentPrompt) -> AppResult<AssignmentPrompt>;
    async fn find_by_assignment_id(&self, assignment_id: &str) -> AppResult<Option<AssignmentPrompt>>;
    async fn find_all(&self) -> AppResult<Vec<AssignmentPrompt>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoPromptRepository {
    collection: Collection<AssignmentPrompt>,
}

impl MongoPromptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(PROMPTS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl PromptRepository for MongoPromptRepository {
    async fn save(&self, prompt: AssignmentPrompt) -> AppResult<AssignmentPrompt> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "assignment_id": prompt.assignment_id.as_str() }, &prompt)
            .with_options(options)
            .await?;

        log::info!("Saved system prompt for assignment '{}'", prompt.assignment_id);
        Ok(prompt)
    }

    async fn find_by_assignment_id(&self, assignment_id: &str) -> AppResult<Option<AssignmentPrompt>> {
        let prompt = self
            .collection
            .find_one(doc! { "assignment_id": assignment_id })
            .await?;
        Ok(prompt)
    }

    async fn find_all(&self) -> AppResult<Vec<AssignmentPrompt>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "assignment_id": 1 })
            .await?;
        let prompts: Vec<AssignmentPrompt> = cursor.try_collect().await?;
        Ok(prompts)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("assignment_id_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "assignment_id": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Ensured indexes on {} collection", PROMPTS_COLLECTION);

        Ok(())
    }
}
