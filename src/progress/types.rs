//! Persisted learner state: settings, progress and the storage envelope.
//!
//! JSON field names are camelCase so a saved file reads the same as the
//! browser's local-storage entry.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Storage key; the file backend writes `{STORAGE_KEY}.json`
pub const STORAGE_KEY: &str = "labverse-storage";

/// Envelope version written with every save
pub const STORAGE_VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: Theme,
    pub font_size: FontSize,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    pub offline_mode: bool,
    pub notifications_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_size: FontSize::Medium,
            high_contrast: false,
            reduce_motion: false,
            offline_mode: false,
            notifications_enabled: true,
        }
    }
}

/// Partial settings change; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub font_size: Option<FontSize>,
    pub high_contrast: Option<bool>,
    pub reduce_motion: Option<bool>,
    pub offline_mode: Option<bool>,
    pub notifications_enabled: Option<bool>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, settings: &mut AppSettings) {
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(font_size) = self.font_size {
            settings.font_size = font_size;
        }
        if let Some(v) = self.high_contrast {
            settings.high_contrast = v;
        }
        if let Some(v) = self.reduce_motion {
            settings.reduce_motion = v;
        }
        if let Some(v) = self.offline_mode {
            settings.offline_mode = v;
        }
        if let Some(v) = self.notifications_enabled {
            settings.notifications_enabled = v;
        }
    }
}

/// Latest result of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScore {
    pub assessment_id: String,
    pub score: f64,
    pub total_points: f64,
    pub completed_at: DateTime<Utc>,
    pub attempts: u32,
}

impl AssessmentScore {
    /// Score as a fraction of total points (0 when the assessment has no points)
    pub fn ratio(&self) -> f64 {
        if self.total_points > 0.0 {
            self.score / self.total_points
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Utc>,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub lessons_completed: Vec<String>,
    pub interactives_completed: Vec<String>,
    pub cases_completed: Vec<String>,
    pub assessment_scores: FxHashMap<String, AssessmentScore>,
    /// Minutes
    pub total_time_spent: f64,
    /// Days
    pub current_streak: u32,
    pub last_access_date: DateTime<Utc>,
    pub achievements: Vec<Achievement>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            lessons_completed: Vec::new(),
            interactives_completed: Vec::new(),
            cases_completed: Vec::new(),
            assessment_scores: FxHashMap::default(),
            total_time_spent: 0.0,
            current_streak: 0,
            last_access_date: Utc::now(),
            achievements: Vec::new(),
        }
    }
}

/// The persisted slice of the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub settings: AppSettings,
    pub progress: UserProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedEnvelope {
    pub state: PersistedState,
    pub version: u32,
}

impl PersistedEnvelope {
    pub fn new(state: PersistedState) -> Self {
        Self {
            state,
            version: STORAGE_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(settings.notifications_enabled);
        assert!(!settings.high_contrast);
    }

    #[test]
    fn test_settings_update_is_partial() {
        let mut settings = AppSettings::default();
        let update = SettingsUpdate {
            theme: Some(Theme::Light),
            reduce_motion: Some(true),
            ..Default::default()
        };
        update.apply(&mut settings);

        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.reduce_motion);
        assert_eq!(settings.font_size, FontSize::Medium);
        assert!(settings.notifications_enabled);
        assert!(SettingsUpdate::default().is_empty());
    }

    #[test]
    fn test_camel_case_json() {
        let json = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["fontSize"], "medium");
        assert_eq!(json["notificationsEnabled"], true);

        let update: SettingsUpdate = serde_json::from_str(r#"{"highContrast": true}"#).unwrap();
        assert_eq!(update.high_contrast, Some(true));
        assert_eq!(update.theme, None);
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = PersistedEnvelope::new(PersistedState::default());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["version"], 0);
        assert!(json["state"]["settings"].is_object());
        assert!(json["state"]["progress"]["lessonsCompleted"].is_array());
        assert!(json["state"]["progress"]["assessmentScores"].is_object());
    }

    #[test]
    fn test_zero_point_assessment_ratio() {
        let score = AssessmentScore {
            assessment_id: "quiz".to_string(),
            score: 0.0,
            total_points: 0.0,
            completed_at: Utc::now(),
            attempts: 1,
        };
        assert_eq!(score.ratio(), 0.0);
    }
}
