use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Student,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::Student => write!(f, "Student"),
            ChatRole::Assistant => write!(f, "Assistant"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
        }
    }
}

/// Stored conversation of one student on one assignment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatHistory {
    pub student_id: String,
    pub assignment_id: String,
    pub conversation: Vec<ChatMessage>,
    pub saved_at: DateTime<Utc>,
    pub total_messages: usize,
}

impl ChatHistory {
    pub fn new(student_id: &str, assignment_id: &str, conversation: Vec<ChatMessage>) -> Self {
        Self {
            student_id: student_id.to_string(),
            assignment_id: assignment_id.to_string(),
            total_messages: conversation.len(),
            conversation,
            saved_at: Utc::now(),
        }
    }

    /// Message bodies in conversation order, student and assistant alternating.
    pub fn message_contents(&self) -> Vec<String> {
        self.conversation
            .iter()
            .map(|message| message.content.clone())
            .collect()
    }
}

/// Identifies a chat session: one student working on one assignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub student_id: String,
    pub assignment_id: String,
}

impl SessionKey {
    pub fn new(student_id: impl Into<String>, assignment_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            assignment_id: assignment_id.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.student_id, self.assignment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatRole::Student).unwrap();
        assert_eq!(json, "\"student\"");
        assert_eq!(ChatRole::Assistant.to_string(), "Assistant");
    }

    #[test]
    fn test_history_counts_messages() {
        let now = Utc::now();
        let history = ChatHistory::new(
            "s1",
            "a1",
            vec![
                ChatMessage::new(ChatRole::Student, "hi", now),
                ChatMessage::new(ChatRole::Assistant, "hello", now),
            ],
        );

        assert_eq!(history.total_messages, 2);
        assert_eq!(history.message_contents(), vec!["hi", "hello"]);
    }

    #[test]
    fn test_session_key_display() {
        assert_eq!(SessionKey::new("student123", "quiz_1").to_string(), "student123_quiz_1");
    }
}
