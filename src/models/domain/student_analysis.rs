use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UnderstoodTopic {
    pub category: String,
    #[serde(default)]
    pub evidence: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StruggledTopic {
    pub category: String,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub severity: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AskedTopic {
    pub category: String,
    #[serde(default)]
    pub resolution: String,
}

/// Model-produced diagnosis of one student's conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentAnalysis {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub understood_well: Vec<UnderstoodTopic>,
    #[serde(default)]
    pub struggled_with: Vec<StruggledTopic>,
    #[serde(default)]
    pub asked_about: Vec<AskedTopic>,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub engagement_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Understood,
    Struggled,
}

/// Category label established by the first analysed student and reused for
/// the rest of the class.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CanonicalCategory {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl StudentAnalysis {
    pub fn canonical_categories(&self) -> Vec<CanonicalCategory> {
        let understood = self.understood_well.iter().map(|topic| CanonicalCategory {
            category: topic.category.clone(),
            kind: CategoryKind::Understood,
        });
        let struggled = self.struggled_with.iter().map(|topic| CanonicalCategory {
            category: topic.category.clone(),
            kind: CategoryKind::Struggled,
        });

        understood.chain(struggled).collect()
    }
}

/// Everything kept about an analysed assignment so follow-up questions can
/// be answered without re-running the analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssignmentAnalysis {
    pub assignment_id: String,
    pub student_analyses: Vec<StudentAnalysis>,
    pub statistics: String,
    pub canonical_categories: Vec<CanonicalCategory>,
    pub exam_content: String,
}
