//! Clinical case grading
//!
//! Cases come from the content layer as camelCase JSON. A submission is graded
//! question by question against the answer key; submitting marks the case
//! complete and records the score under the case id.

use crate::interpretation::NormalBand;
use crate::progress::{ProgressBackend, ProgressStore};
use crate::progress::summary::percent;
use anyhow::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Mcq,
    ShortAnswer,
    Interpretation,
}

/// An option index or a free-text answer, used for both keys and responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Option(usize),
    Text(String),
}

impl Answer {
    /// Same option index, or same text ignoring case and surrounding space
    pub fn matches(&self, key: &Answer) -> bool {
        match (self, key) {
            (Answer::Option(a), Answer::Option(b)) => a == b,
            (Answer::Text(a), Answer::Text(b)) => a.trim().to_lowercase() == b.trim().to_lowercase(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabValue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value: Option<f64>,
    pub unit: String,
    pub reference_range: ReferenceRange,
}

impl LabValue {
    /// Outside the inclusive reference range; a missing value is never abnormal
    pub fn is_abnormal(&self) -> bool {
        let band = NormalBand::new(self.reference_range.min, self.reference_range.max);
        self.value.is_some_and(|v| !band.contains(v))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseQuestion {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: Answer,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalCase {
    pub id: String,
    pub module_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub presentation: String,
    pub lab_values: Vec<LabValue>,
    pub questions: Vec<CaseQuestion>,
    pub diagnosis: String,
    pub reasoning: String,
    pub learning_points: Vec<String>,
    #[serde(default)]
    pub must_not_miss: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub answered: bool,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseGrade {
    pub case_id: String,
    pub results: Vec<QuestionResult>,
    pub correct: usize,
    pub total: usize,
}

impl CaseGrade {
    pub fn percent(&self) -> u32 {
        percent(self.correct, self.total)
    }
}

pub fn find_case<'a>(cases: &'a [ClinicalCase], id: &str) -> Option<&'a ClinicalCase> {
    cases.iter().find(|c| c.id == id)
}

/// Grade responses keyed by question id; unanswered questions count as wrong
pub fn grade_case(case: &ClinicalCase, answers: &FxHashMap<String, Answer>) -> CaseGrade {
    let results: Vec<QuestionResult> = case
        .questions
        .iter()
        .map(|q| {
            let response = answers.get(&q.id);
            QuestionResult {
                question_id: q.id.clone(),
                answered: response.is_some(),
                correct: response.is_some_and(|a| a.matches(&q.correct_answer)),
            }
        })
        .collect();

    CaseGrade {
        case_id: case.id.clone(),
        correct: results.iter().filter(|r| r.correct).count(),
        total: results.len(),
        results,
    }
}

/// Grade a submission, mark the case complete and record its score
pub fn submit_case<B: ProgressBackend>(
    store: &mut ProgressStore<B>,
    case: &ClinicalCase,
    answers: &FxHashMap<String, Answer>,
) -> Result<CaseGrade> {
    let grade = grade_case(case, answers);
    store.complete_case(&case.id)?;
    store.record_assessment_score(&case.id, grade.correct as f64, grade.total as f64)?;
    info!(case = %case.id, correct = grade.correct, total = grade.total, "Submitted case");
    Ok(grade)
}
