use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::{
    constants::prompts::{
        ANALYSIS_JSON_SHAPE, ANALYSIS_REQUIRED_MESSAGE, CANONICAL_DIAGNOSTICIAN_PROMPT,
        DATA_ANALYST_PROMPT, DIAGNOSTICIAN_PROMPT, OVERVIEW_ANALYST_PROMPT,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{AssignmentAnalysis, CanonicalCategory, StudentAnalysis},
        dto::response::AnalysisResponse,
    },
    repositories::{ChatHistoryRepository, PromptRepository},
    services::llm_client::{GenerationRequest, LanguageModel},
};

const QUERY_MAX_TOKENS: u32 = 2048;
const TOP_CATEGORY_LIMIT: usize = 5;

/// Analyses student chat histories to surface class-wide learning gaps.
pub struct DiagnosticsService {
    prompts: Arc<dyn PromptRepository>,
    histories: Arc<dyn ChatHistoryRepository>,
    llm: Arc<dyn LanguageModel>,
    analysis_cache: RwLock<HashMap<String, AssignmentAnalysis>>,
}

impl DiagnosticsService {
    pub fn new(
        prompts: Arc<dyn PromptRepository>,
        histories: Arc<dyn ChatHistoryRepository>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            prompts,
            histories,
            llm,
            analysis_cache: RwLock::new(HashMap::new()),
        }
    }

    /// The first student's analysis fixes the category labels; every later
    /// student is mapped onto them so the statistics can be aggregated.
    pub async fn analyze_assignment(&self, assignment_id: &str) -> AppResult<AnalysisResponse> {
        let histories = self.histories.find_by_assignment(assignment_id).await?;
        if histories.is_empty() {
            return Err(AppError::NotFound(format!(
                "No chat histories found for assignment: {}",
                assignment_id
            )));
        }

        let exam_content = self
            .prompts
            .find_by_assignment_id(assignment_id)
            .await?
            .map(|prompt| prompt.metadata.exam_content)
            .unwrap_or_default();

        log::info!(
            "Analysing {} chat histories for assignment '{}'",
            histories.len(),
            assignment_id
        );

        let mut student_analyses = Vec::with_capacity(histories.len());
        let mut canonical_categories = Vec::new();
        for (index, history) in histories.iter().enumerate() {
            let student_number = index + 1;
            let conversation = history.message_contents();
            let mut analysis = if index == 0 {
                self.analyze_first_student(&conversation, &exam_content).await?
            } else {
                self.analyze_student(&conversation, &exam_content, &canonical_categories, student_number)
                    .await?
            };

            if analysis.student_id.is_empty() {
                analysis.student_id = format!("student_{}", student_number);
            }
            if index == 0 {
                canonical_categories = analysis.canonical_categories();
            }
            student_analyses.push(analysis);
        }

        let statistics = class_statistics(&student_analyses);
        let overview = self.create_overview(&student_analyses, &statistics).await?;

        self.analysis_cache.write().await.insert(
            assignment_id.to_string(),
            AssignmentAnalysis {
                assignment_id: assignment_id.to_string(),
                student_analyses: student_analyses.clone(),
                statistics: statistics.clone(),
                canonical_categories,
                exam_content,
            },
        );

        Ok(AnalysisResponse {
            assignment_id: assignment_id.to_string(),
            total_students: histories.len(),
            overview,
            statistics,
            student_analyses,
        })
    }

    /// Answers a professor's question from the cached analysis.
    pub async fn query(&self, assignment_id: &str, question: &str) -> AppResult<String> {
        let analysis_data = match self.analysis_cache.read().await.get(assignment_id) {
            Some(analysis) => serde_json::to_string_pretty(analysis)?,
            None => return Ok(ANALYSIS_REQUIRED_MESSAGE.to_string()),
        };

        let prompt = format!(
            "Analysis Data:\n{}\n\nProfessor's Question: {}\n\nProvide a clear, data-driven answer to the professor's question.",
            analysis_data, question
        );

        self.llm
            .generate(
                GenerationRequest::new(prompt)
                    .with_system_prompt(DATA_ANALYST_PROMPT)
                    .with_max_tokens(QUERY_MAX_TOKENS),
            )
            .await
    }

    pub async fn cached_analysis(&self, assignment_id: &str) -> Option<AssignmentAnalysis> {
        self.analysis_cache.read().await.get(assignment_id).cloned()
    }

    async fn analyze_first_student(
        &self,
        conversation: &[String],
        exam_content: &str,
    ) -> AppResult<StudentAnalysis> {
        let prompt = format!(
            "Exam Content:\n{}\n\nStudent Conversation:\n{}\nAnalyze and output a JSON object:\n{}\n\nOutput ONLY valid JSON.",
            exam_content,
            format_conversation(conversation),
            ANALYSIS_JSON_SHAPE
        );

        let response = self
            .llm
            .generate(GenerationRequest::new(prompt).with_system_prompt(DIAGNOSTICIAN_PROMPT))
            .await?;
        parse_analysis(&response)
    }

    async fn analyze_student(
        &self,
        conversation: &[String],
        exam_content: &str,
        canonical_categories: &[CanonicalCategory],
        student_number: usize,
    ) -> AppResult<StudentAnalysis> {
        let category_names: Vec<&str> = canonical_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        let system_prompt = format!(
            "{}{}",
            CANONICAL_DIAGNOSTICIAN_PROMPT,
            serde_json::to_string_pretty(&category_names)?
        );

        let prompt = format!(
            "Exam Content:\n{}\n\nStudent Conversation:\n{}\nAnalyze and output a JSON object in this format for student_{}:\n{}\n\nUse canonical categories where applicable. Output ONLY valid JSON.",
            exam_content,
            format_conversation(conversation),
            student_number,
            ANALYSIS_JSON_SHAPE
        );

        let response = self
            .llm
            .generate(GenerationRequest::new(prompt).with_system_prompt(system_prompt))
            .await?;
        parse_analysis(&response)
    }

    async fn create_overview(
        &self,
        analyses: &[StudentAnalysis],
        statistics: &str,
    ) -> AppResult<String> {
        let prompt = format!(
            "Student Analyses:\n{}\n\nStatistics:\n{}\n\nCreate a brief overview report highlighting:\n1. Overall performance patterns\n2. Common struggles\n3. Well-understood concepts\n4. Recommendations for the professor\n\nKeep it concise and actionable.",
            serde_json::to_string_pretty(analyses)?,
            statistics
        );

        self.llm
            .generate(GenerationRequest::new(prompt).with_system_prompt(OVERVIEW_ANALYST_PROMPT))
            .await
    }
}

/// Labels alternate starting with the student.
pub fn format_conversation(messages: &[String]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            let role = if i % 2 == 0 { "Student" } else { "Assistant" };
            format!("{}: {}\n", role, message)
        })
        .collect()
}

/// Parses model JSON, tolerating a surrounding ```json fence.
pub fn parse_analysis(response: &str) -> AppResult<StudentAnalysis> {
    let cleaned = response.replace("```json", "").replace("```", "");
    serde_json::from_str(cleaned.trim()).map_err(|e| {
        log::error!("Model returned unparseable analysis: {}", e);
        AppError::UpstreamError(format!("Model returned invalid analysis JSON: {}", e))
    })
}

/// Counts per category, in first-seen order.
fn count_categories<'a>(categories: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for category in categories {
        match counts.iter_mut().find(|(name, _)| *name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category, 1)),
        }
    }
    counts
}

fn push_top_categories(
    lines: &mut Vec<String>,
    mut counts: Vec<(&str, usize)>,
    total_students: usize,
    placeholder: &str,
) {
    // Stable sort: ties keep first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_CATEGORY_LIMIT);

    if counts.is_empty() {
        lines.push(placeholder.to_string());
        return;
    }

    for (topic, count) in counts {
        let pct = count as f64 / total_students as f64 * 100.0;
        lines.push(format!("- **{}**: {} students ({:.1}%)", topic, count, pct));
    }
}

/// Class-wide statistics as markdown, ready for report-style formatting.
pub fn class_statistics(analyses: &[StudentAnalysis]) -> String {
    let total_students = analyses.len();
    if total_students == 0 {
        return "No student data available for statistics.".to_string();
    }

    let struggles = count_categories(
        analyses
            .iter()
            .flat_map(|a| a.struggled_with.iter().map(|t| t.category.as_str())),
    );
    let understood = count_categories(
        analyses
            .iter()
            .flat_map(|a| a.understood_well.iter().map(|t| t.category.as_str())),
    );

    let mut lines = vec![
        format!("### 📊 Class Statistics (N={})", total_students),
        String::new(),
        "#### ⚠️ Top Struggles".to_string(),
    ];
    push_top_categories(
        &mut lines,
        struggles,
        total_students,
        "_No significant struggles detected._",
    );

    lines.push(String::new());
    lines.push("#### ✅ Well Understood".to_string());
    push_top_categories(
        &mut lines,
        understood,
        total_students,
        "_No clear patterns of understanding detected._",
    );

    lines.join("\n")
}
