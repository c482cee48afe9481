//! Interpretation utilities shared by the simulators
//!
//! - `comparator.rs` - Normal band comparison (Normal/Abnormal badges)
//! - `classify.rs` - Ordered threshold ladders (pH status, CKD stage)

pub mod comparator;
pub mod classify;

// Re-export commonly used types
pub use comparator::{compare_to_band, status_label, BandComparison, BandFit, NormalBand};
pub use classify::{classify_ckd_stage, classify_ph_status, CkdStage, PhStatus};
