//! Progress summary for the dashboard: completion percentages, average
//! assessment score, formatted learning time and per-module progress.

use super::types::{AssessmentScore, UserProgress};
use serde::{Deserialize, Serialize};

/// Percentage at or above which an assessment counts as passed
pub const PASSING_PERCENT: u32 = 70;

/// A curriculum module and the lesson ids it contains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutline {
    pub id: String,
    pub title: String,
    pub lessons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleProgress {
    pub module_id: String,
    pub title: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl ModuleProgress {
    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentSummary {
    pub assessment_id: String,
    pub percent: u32,
    pub attempts: u32,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub lessons_completed: usize,
    pub total_lessons: usize,
    pub lessons_percent: u32,
    pub cases_completed: usize,
    pub total_cases: usize,
    pub cases_percent: u32,
    pub assessment_count: usize,
    pub average_score_percent: u32,
    pub time_spent: String,
    pub modules: Vec<ModuleProgress>,
}

/// Rounded percentage; 0 when `total` is 0
pub fn percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// "{hours}h {minutes}m" from a total in minutes.
///
/// Hours are floored and the remainder rounded independently, so 119.6
/// minutes reads "1h 60m" as on the dashboard.
pub fn format_time_spent(total_minutes: f64) -> String {
    let hours = (total_minutes / 60.0).floor();
    let minutes = (total_minutes % 60.0).round();
    format!("{}h {}m", hours as u64, minutes as u64)
}

fn score_percent(score: &AssessmentScore) -> u32 {
    (score.ratio() * 100.0).round() as u32
}

/// Summarise `progress` against the curriculum outline and case count
pub fn summarize(progress: &UserProgress, modules: &[ModuleOutline], total_cases: usize) -> ProgressSummary {
    let total_lessons: usize = modules.iter().map(|m| m.lessons.len()).sum();
    let lessons_completed = progress.lessons_completed.len();
    let cases_completed = progress.cases_completed.len();

    let assessment_count = progress.assessment_scores.len();
    let average_score_percent = if assessment_count > 0 {
        let sum: f64 = progress
            .assessment_scores
            .values()
            .map(|s| s.ratio() * 100.0)
            .sum();
        (sum / assessment_count as f64).round() as u32
    } else {
        0
    };

    let modules = modules
        .iter()
        .map(|module| {
            let completed = module
                .lessons
                .iter()
                .filter(|lesson| progress.lessons_completed.contains(*lesson))
                .count();
            ModuleProgress {
                module_id: module.id.clone(),
                title: module.title.clone(),
                completed,
                total: module.lessons.len(),
                percent: percent(completed, module.lessons.len()),
            }
        })
        .collect();

    ProgressSummary {
        lessons_completed,
        total_lessons,
        lessons_percent: percent(lessons_completed, total_lessons),
        cases_completed,
        total_cases,
        cases_percent: percent(cases_completed, total_cases),
        assessment_count,
        average_score_percent,
        time_spent: format_time_spent(progress.total_time_spent),
        modules,
    }
}

/// Most recent assessments first, at most `limit`
pub fn recent_assessments(progress: &UserProgress, limit: usize) -> Vec<AssessmentSummary> {
    let mut scores: Vec<&AssessmentScore> = progress.assessment_scores.values().collect();
    scores.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    scores
        .into_iter()
        .take(limit)
        .map(|score| {
            let percent = score_percent(score);
            AssessmentSummary {
                assessment_id: score.assessment_id.clone(),
                percent,
                attempts: score.attempts,
                passed: percent >= PASSING_PERCENT,
            }
        })
        .collect()
}
