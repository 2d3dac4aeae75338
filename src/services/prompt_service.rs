use std::sync::Arc;

use crate::{
    constants::prompts::{
        BASE_SYSTEM_PROMPT, INSTRUCTION_TRANSLATOR_PROMPT, RESTRICTION_VALIDATOR_PROMPT,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{AssignmentMetadata, AssignmentPrompt},
        dto::{
            request::CreatePromptRequest,
            response::{AssignmentSummary, CreatePromptResponse, StudentListResponse},
        },
    },
    repositories::{ChatHistoryRepository, PromptRepository},
    services::llm_client::{GenerationRequest, LanguageModel},
};

const PROMPT_BUILD_MAX_TOKENS: u32 = 2048;
const PREVIEW_CHARS: usize = 200;

/// Turns professor instructions into stored assignment system prompts.
pub struct PromptService {
    prompts: Arc<dyn PromptRepository>,
    histories: Arc<dyn ChatHistoryRepository>,
    llm: Arc<dyn LanguageModel>,
}

impl PromptService {
    pub fn new(
        prompts: Arc<dyn PromptRepository>,
        histories: Arc<dyn ChatHistoryRepository>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            prompts,
            histories,
            llm,
        }
    }

    pub async fn create_prompt(&self, request: CreatePromptRequest) -> AppResult<CreatePromptResponse> {
        let metadata: AssignmentMetadata = request.metadata.into();
        let assignment_context = format!(
            "{}\n\nASSIGNMENT:\n{}",
            request.professor_instructions, metadata.exam_content
        );

        let restrictions = self.translate_instructions(&assignment_context).await?;
        let validation = self.validate_restrictions(&restrictions).await?;
        let system_prompt = format!(
            "{}{}\n\nASSIGNMENT:\n{}",
            BASE_SYSTEM_PROMPT, restrictions, metadata.exam_content
        );

        let saved = self
            .prompts
            .save(AssignmentPrompt::new(&request.assignment_id, system_prompt, metadata))
            .await?;

        Ok(CreatePromptResponse {
            assignment_id: saved.assignment_id,
            status: "created".to_string(),
            prompt_preview: preview(&saved.system_prompt),
            validation,
        })
    }

    pub async fn get_prompt(&self, assignment_id: &str) -> AppResult<AssignmentPrompt> {
        self.prompts
            .find_by_assignment_id(assignment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Prompt not found for assignment: {}", assignment_id))
            })
    }

    pub async fn list_assignments(&self) -> AppResult<Vec<AssignmentSummary>> {
        let summaries = self
            .prompts
            .find_all()
            .await?
            .into_iter()
            .map(|prompt| AssignmentSummary {
                assignment_id: prompt.assignment_id,
                metadata: prompt.metadata,
            })
            .collect();
        Ok(summaries)
    }

    pub async fn list_students(&self, assignment_id: &str) -> AppResult<StudentListResponse> {
        let students = self.histories.list_students(assignment_id).await?;
        Ok(StudentListResponse {
            assignment_id: assignment_id.to_string(),
            students,
        })
    }

    async fn translate_instructions(&self, assignment_context: &str) -> AppResult<String> {
        let prompt = format!(
            "Professor's Instructions:\n{}\n\nConvert these into clear, enforceable restrictions for an AI teaching assistant.",
            assignment_context
        );

        self.llm
            .generate(
                GenerationRequest::new(prompt)
                    .with_system_prompt(INSTRUCTION_TRANSLATOR_PROMPT)
                    .with_max_tokens(PROMPT_BUILD_MAX_TOKENS),
            )
            .await
    }

    async fn validate_restrictions(&self, restrictions: &str) -> AppResult<String> {
        let prompt = format!(
            "Restrictions to validate:\n{}\n\nIdentify any loopholes or weaknesses.",
            restrictions
        );

        self.llm
            .generate(
                GenerationRequest::new(prompt)
                    .with_system_prompt(RESTRICTION_VALIDATOR_PROMPT)
                    .with_max_tokens(PROMPT_BUILD_MAX_TOKENS),
            )
            .await
    }
}

fn preview(system_prompt: &str) -> String {
    let mut preview: String = system_prompt.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
