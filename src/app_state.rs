use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ChatHistoryRepository, MongoChatHistoryRepository, MongoPromptRepository, PromptRepository,
    },
    services::{
        llm_client::{AnthropicClient, LanguageModel},
        ChatService, DiagnosticsService, PromptService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ChatService>,
    pub prompt_service: Arc<PromptService>,
    pub diagnostics_service: Arc<DiagnosticsService>,
    pub config: Arc<Config>,
    /// Absent when the state is assembled without a live database.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let prompt_repository = Arc::new(MongoPromptRepository::new(&db));
        prompt_repository.ensure_indexes().await?;

        let history_repository = Arc::new(MongoChatHistoryRepository::new(&db));
        history_repository.ensure_indexes().await?;

        let llm: Arc<dyn LanguageModel> = Arc::new(AnthropicClient::new(&config)?);

        let mut state = Self::from_parts(config, prompt_repository, history_repository, llm);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires the services over the given repositories and model client.
    pub fn from_parts(
        config: Config,
        prompts: Arc<dyn PromptRepository>,
        histories: Arc<dyn ChatHistoryRepository>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        let chat_service = Arc::new(ChatService::new(
            prompts.clone(),
            histories.clone(),
            llm.clone(),
        ));
        let prompt_service = Arc::new(PromptService::new(
            prompts.clone(),
            histories.clone(),
            llm.clone(),
        ));
        let diagnostics_service = Arc::new(DiagnosticsService::new(prompts, histories, llm));

        Self {
            chat_service,
            prompt_service,
            diagnostics_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
