//! Progress and settings store
//!
//! Holds learner settings, progress and navigation state. Settings and
//! progress are written through the backend after every change; the current
//! module and lesson live only as long as the store does.

use super::backend::ProgressBackend;
use super::types::{
    AppSettings, AssessmentScore, PersistedEnvelope, PersistedState, SettingsUpdate, UserProgress,
};
use anyhow::{bail, Result};
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ProgressStore<B: ProgressBackend> {
    backend: B,
    state: PersistedState,
    current_module_id: Option<String>,
    current_lesson_id: Option<String>,
}

impl<B: ProgressBackend> ProgressStore<B> {
    /// Load the saved state from `backend`, or start from defaults
    pub fn open(backend: B) -> Result<Self> {
        let state = match backend.load()? {
            Some(envelope) => {
                info!(
                    lessons = envelope.state.progress.lessons_completed.len(),
                    assessments = envelope.state.progress.assessment_scores.len(),
                    "Restored saved progress"
                );
                envelope.state
            }
            None => {
                info!("No saved progress, starting fresh");
                PersistedState::default()
            }
        };

        Ok(Self {
            backend,
            state,
            current_module_id: None,
            current_lesson_id: None,
        })
    }

    pub fn settings(&self) -> &AppSettings {
        &self.state.settings
    }

    pub fn progress(&self) -> &UserProgress {
        &self.state.progress
    }

    pub fn current_module_id(&self) -> Option<&str> {
        self.current_module_id.as_deref()
    }

    pub fn current_lesson_id(&self) -> Option<&str> {
        self.current_lesson_id.as_deref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn update_settings(&mut self, update: &SettingsUpdate) -> Result<()> {
        update.apply(&mut self.state.settings);
        debug!(?update, "Updated settings");
        self.persist()
    }

    /// Returns false when the lesson was already recorded
    pub fn complete_lesson(&mut self, lesson_id: &str) -> Result<bool> {
        let added = push_unique(&mut self.state.progress.lessons_completed, lesson_id);
        self.record_completion("lesson", lesson_id, added)
    }

    pub fn complete_interactive(&mut self, interactive_id: &str) -> Result<bool> {
        let added = push_unique(
            &mut self.state.progress.interactives_completed,
            interactive_id,
        );
        self.record_completion("interactive", interactive_id, added)
    }

    pub fn complete_case(&mut self, case_id: &str) -> Result<bool> {
        let added = push_unique(&mut self.state.progress.cases_completed, case_id);
        self.record_completion("case", case_id, added)
    }

    /// Replace the stored result for `assessment_id`, counting the attempt.
    pub fn record_assessment_score(
        &mut self,
        assessment_id: &str,
        score: f64,
        total_points: f64,
    ) -> Result<&AssessmentScore> {
        ensure_finite("score", score)?;
        ensure_finite("total_points", total_points)?;

        let scores = &mut self.state.progress.assessment_scores;
        let attempts = scores.get(assessment_id).map_or(0, |s| s.attempts) + 1;

        scores.insert(
            assessment_id.to_string(),
            AssessmentScore {
                assessment_id: assessment_id.to_string(),
                score,
                total_points,
                completed_at: Utc::now(),
                attempts,
            },
        );
        debug!(assessment = assessment_id, score, total_points, attempts, "Recorded assessment");

        self.persist()?;
        // Inserted above
        Ok(&self.state.progress.assessment_scores[assessment_id])
    }

    /// Add minutes to the total learning time
    pub fn update_time_spent(&mut self, minutes: f64) -> Result<()> {
        ensure_finite("minutes", minutes)?;
        self.state.progress.total_time_spent += minutes;
        self.persist()
    }

    pub fn set_current_module(&mut self, module_id: Option<&str>) {
        self.current_module_id = module_id.map(str::to_string);
    }

    pub fn set_current_lesson(&mut self, lesson_id: Option<&str>) {
        self.current_lesson_id = lesson_id.map(str::to_string);
    }

    fn record_completion(&mut self, item: &'static str, id: &str, added: bool) -> Result<bool> {
        if added {
            debug!(item, id, "Marked complete");
            self.persist()?;
        }
        Ok(added)
    }

    fn persist(&mut self) -> Result<()> {
        self.state.progress.last_access_date = Utc::now();
        let envelope = PersistedEnvelope::new(self.state.clone());
        self.backend.save(&envelope)
    }
}

/// serde_json writes NaN and infinities as `null`, which cannot be read back as f64
fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        bail!("Rejected non-finite {field}: {value}");
    }
    Ok(())
}

fn push_unique(ids: &mut Vec<String>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}
