//! LabVerse Simulation Engine
//!
//! Interactive clinical laboratory simulators for teaching lab medicine.
//!
//! - `simulators/`: Electrolyte dynamics, acid-base and renal handling models
//!   (parameter tables, presets, formulas, classification rules)
//! - `interpretation/`: Normal-band comparison and threshold classifiers
//! - `session`: One simulator's live parameter set, recomputed on every change
//! - `catalog`: The interactives offered to learners
//! - `glossary`: Term lookup by name, abbreviation, definition or category
//! - `cases`: Clinical case grading fed into learner progress
//! - `progress/`: Learner settings and progress, persisted through a backend
//!
//! Every formula is total over its parameter ranges; sessions clamp inputs
//! before they reach a formula.

pub mod cases;
pub mod catalog;
pub mod error;
pub mod glossary;
pub mod interpretation;
pub mod parameters;
pub mod progress;
pub mod session;
pub mod simulators;
pub mod snapshot;

// Re-export commonly used types
pub use cases::{grade_case, submit_case, CaseGrade, ClinicalCase};
pub use catalog::{find_interactive, interactives, InteractiveEntry};
pub use error::{EngineError, Result};
pub use glossary::GlossaryTerm;
pub use interpretation::{BandFit, CkdStage, NormalBand, PhStatus};
pub use parameters::{ParameterReading, ParameterSet, ParameterSpec};
pub use progress::{JsonFileBackend, MemoryBackend, ProgressBackend, ProgressStore};
pub use session::SimulatorSession;
pub use simulators::{Preset, SimulatorKind};
pub use snapshot::{Classification, DerivedValue, Snapshot};
