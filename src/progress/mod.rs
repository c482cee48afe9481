//! Learner progress and settings
//!
//! `ProgressStore` owns the state and writes it through a `ProgressBackend`
//! after each change. `summary` derives the dashboard figures from it.

pub mod backend;
pub mod store;
pub mod summary;
pub mod types;

pub use backend::{JsonFileBackend, MemoryBackend, ProgressBackend};
pub use store::ProgressStore;
pub use summary::{
    format_time_spent, recent_assessments, summarize, AssessmentSummary, ModuleOutline,
    ModuleProgress, ProgressSummary,
};
pub use types::{
    Achievement, AppSettings, AssessmentScore, FontSize, PersistedEnvelope, PersistedState,
    SettingsUpdate, Theme, UserProgress, STORAGE_KEY,
};
