use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssignmentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exam_content: String,
}

/// System prompt the student-facing assistant uses for one assignment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AssignmentPrompt {
    pub assignment_id: String,
    pub system_prompt: String,
    #[serde(default)]
    pub metadata: AssignmentMetadata,
}

impl AssignmentPrompt {
    pub fn new(assignment_id: &str, system_prompt: String, mut metadata: AssignmentMetadata) -> Self {
        if metadata.created_at.is_none() {
            metadata.created_at = Some(Utc::now());
        }

        Self {
            assignment_id: assignment_id.to_string(),
            system_prompt,
            metadata,
        }
    }
}
