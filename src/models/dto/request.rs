use serde::Deserialize;
use validator::Validate;

use crate::formatter::FormatStyle;
use crate::models::domain::AssignmentMetadata;

fn default_question_id() -> String {
    "unknown".to_string()
}

fn default_student_id() -> String {
    "anonymous_student".to_string()
}

fn default_quiz_assignment_id() -> String {
    "default_quiz".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 200))]
    pub student_id: String,

    #[validate(length(min = 1, max = 200))]
    pub assignment_id: String,

    #[validate(length(min = 1))]
    pub message: String,
}

/// Prompt typed into the quiz-page widget.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizPromptRequest {
    #[validate(length(min = 1))]
    pub prompt: String,

    #[serde(default = "default_question_id")]
    pub question_id: String,

    #[serde(default)]
    pub question_text: String,

    // Widget settings are sent along but do not affect the reply.
    #[serde(default)]
    pub settings: serde_json::Value,

    #[serde(default = "default_student_id")]
    #[validate(length(min = 1, max = 200))]
    pub student_id: String,

    #[serde(default = "default_quiz_assignment_id")]
    #[validate(length(min = 1, max = 200))]
    pub assignment_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSessionRequest {
    #[serde(default = "default_student_id")]
    pub student_id: String,

    #[serde(default = "default_quiz_assignment_id")]
    pub assignment_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PromptMetadataRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub course: String,

    #[serde(default)]
    #[validate(length(max = 200))]
    pub professor: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub exam_content: String,
}

impl From<PromptMetadataRequest> for AssignmentMetadata {
    fn from(request: PromptMetadataRequest) -> Self {
        AssignmentMetadata {
            created_at: None,
            course: request.course,
            professor: request.professor,
            description: request.description,
            exam_content: request.exam_content,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePromptRequest {
    #[validate(length(min = 1, max = 200))]
    pub assignment_id: String,

    #[validate(length(min = 1))]
    pub professor_instructions: String,

    #[serde(default)]
    #[validate(nested)]
    pub metadata: PromptMetadataRequest,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeAssignmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub assignment_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiagnosticsQueryRequest {
    #[validate(length(min = 1, max = 200))]
    pub assignment_id: String,

    #[validate(length(min = 1))]
    pub question: String,
}

/// Text to render for a widget, given directly or as a backend reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatRequest {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub payload: Option<serde_json::Value>,

    #[serde(default)]
    pub style: FormatStyle,

    #[serde(default)]
    pub escape_html: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_defaults() {
        let request: QuizPromptRequest =
            serde_json::from_str(r#"{"prompt":"What is a heap?"}"#).unwrap();

        assert_eq!(request.question_id, "unknown");
        assert_eq!(request.question_text, "");
        assert_eq!(request.student_id, "anonymous_student");
        assert_eq!(request.assignment_id, "default_quiz");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_quiz_prompt_camel_case_fields() {
        let request: QuizPromptRequest = serde_json::from_str(
            r#"{"prompt":"hint?","questionId":"question-1","questionText":"Big-O of merge sort?","studentId":"s9","assignmentId":"quiz_2","settings":{"tone":"brief"}}"#,
        )
        .unwrap();

        assert_eq!(request.question_id, "question-1");
        assert_eq!(request.student_id, "s9");
        assert_eq!(request.settings["tone"], "brief");
    }

    #[test]
    fn test_empty_prompt_fails_validation() {
        let request: QuizPromptRequest = serde_json::from_str(r#"{"prompt":""}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_chat_request_requires_message() {
        let result = serde_json::from_str::<ChatRequest>(r#"{"student_id":"s","assignment_id":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_prompt_metadata_is_optional() {
        let request: CreatePromptRequest = serde_json::from_str(
            r#"{"assignment_id":"bio_midterm_1","professor_instructions":"Concepts only"}"#,
        )
        .unwrap();

        assert!(request.validate().is_ok());
        let metadata: AssignmentMetadata = request.metadata.into();
        assert!(metadata.exam_content.is_empty());
    }

    #[test]
    fn test_format_request_defaults() {
        let request: FormatRequest = serde_json::from_str(r#"{"text":"- a"}"#).unwrap();
        assert_eq!(request.style, FormatStyle::Hint);
        assert!(!request.escape_html);
        assert!(request.payload.is_none());
    }
}
