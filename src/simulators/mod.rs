//! Simulator modules
//!
//! Each simulator is implemented in its own module: a parameter table, pure
//! calculation functions over a small input struct, and its preset scenarios.

pub mod electrolyte_dynamics;
pub mod acid_base;
pub mod renal_handling;

// Re-export calculation entry points
pub use electrolyte_dynamics::{calculate_electrolytes, ElectrolyteInputs, ElectrolyteResult};
pub use acid_base::{
    classify_acid_base, AcidBaseInputs, AcidBaseResult, Compensation, ExpectedCompensation,
    PrimaryDisorder,
};
pub use renal_handling::{calculate_renal, RenalInputs, RenalResult};

use crate::parameters::ParameterSpec;
use crate::snapshot::Evaluation;
use serde::Serialize;

/// A named, complete parameter assignment for one simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Values in the simulator's parameter-table order
    pub values: &'static [f64],
}

/// The three interactive simulators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SimulatorKind {
    #[serde(rename = "electrolyte-dynamics")]
    ElectrolyteDynamics,

    #[serde(rename = "acid-base-simulator")]
    AcidBase,

    #[serde(rename = "renal-handling")]
    RenalHandling,
}

impl SimulatorKind {
    /// Catalog id, also used for progress tracking
    pub fn id(&self) -> &'static str {
        match self {
            SimulatorKind::ElectrolyteDynamics => "electrolyte-dynamics",
            SimulatorKind::AcidBase => "acid-base-simulator",
            SimulatorKind::RenalHandling => "renal-handling",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn all() -> &'static [SimulatorKind] {
        &[
            SimulatorKind::ElectrolyteDynamics,
            SimulatorKind::AcidBase,
            SimulatorKind::RenalHandling,
        ]
    }

    pub fn parameters(&self) -> &'static [ParameterSpec] {
        match self {
            SimulatorKind::ElectrolyteDynamics => &electrolyte_dynamics::PARAMETERS,
            SimulatorKind::AcidBase => &acid_base::PARAMETERS,
            SimulatorKind::RenalHandling => &renal_handling::PARAMETERS,
        }
    }

    pub fn presets(&self) -> &'static [Preset] {
        match self {
            SimulatorKind::ElectrolyteDynamics => &electrolyte_dynamics::PRESETS,
            SimulatorKind::AcidBase => &acid_base::PRESETS,
            SimulatorKind::RenalHandling => &renal_handling::PRESETS,
        }
    }

    pub fn find_preset(&self, preset_id: &str) -> Option<&'static Preset> {
        self.presets().iter().find(|p| p.id == preset_id)
    }

    /// Evaluate every formula and rule for values in parameter-table order
    pub fn evaluate(&self, values: &[f64]) -> Evaluation {
        match self {
            SimulatorKind::ElectrolyteDynamics => {
                calculate_electrolytes(&ElectrolyteInputs::from_values(values)).evaluation()
            }
            SimulatorKind::AcidBase => {
                classify_acid_base(&AcidBaseInputs::from_values(values)).evaluation()
            }
            SimulatorKind::RenalHandling => {
                calculate_renal(&RenalInputs::from_values(values)).evaluation()
            }
        }
    }
}
