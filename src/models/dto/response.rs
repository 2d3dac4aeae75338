use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{AssignmentMetadata, StudentAnalysis};

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPromptResponse {
    pub response: String,
    pub question_id: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoResponse {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_count: Option<usize>,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSessionResponse {
    pub session_id: String,
    pub cleared: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePromptResponse {
    pub assignment_id: String,
    pub status: String,
    pub prompt_preview: String,
    pub validation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    pub assignment_id: String,
    #[serde(flatten)]
    pub metadata: AssignmentMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentListResponse {
    pub assignment_id: String,
    pub students: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub assignment_id: String,
    pub total_students: usize,
    pub overview: String,
    pub statistics: String,
    pub student_analyses: Vec<StudentAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsQueryResponse {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatResponse {
    pub markup: String,
    pub block_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub model: String,
    pub database: String,
    pub active_sessions: usize,
    pub timestamp: DateTime<Utc>,
}
