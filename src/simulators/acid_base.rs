//! ACID-BASE SIMULATOR
//!
//! Classifies an arterial blood gas into a primary disorder and checks whether
//! the secondary (respiratory or renal) response is in the expected range.
//!
//! Rule order, first match wins:
//!   1. pH < 7.35 acidemia, pH > 7.45 alkalemia, else normal pH
//!   2. Acidemia: PaCO₂ > 45 respiratory acidosis, else HCO₃⁻ < 22 metabolic acidosis
//!   3. Alkalemia: PaCO₂ < 35 respiratory alkalosis, else HCO₃⁻ > 26 metabolic alkalosis
//!   4. Otherwise "Normal" with compensation "N/A"
//!   5. Compensated = pH in [7.35, 7.45] and primary disorder is not Normal
//!
//! Rule 5 can only be true if a disorder is assigned while pH is normal, which
//! rules 2-3 never do. The flag is kept exactly as stated.

use super::Preset;
use crate::interpretation::classify::{PH_ACIDEMIA_THRESHOLD, PH_ALKALEMIA_THRESHOLD};
use crate::interpretation::{classify_ph_status, NormalBand, PhStatus};
use crate::parameters::ParameterSpec;
use crate::snapshot::{Classification, DerivedValue, Evaluation};
use serde::Serialize;

/// Allowed deviation (mmHg or mEq/L) from the expected compensation
pub const COMPENSATION_TOLERANCE: f64 = 2.0;

/// Reference PaCO₂ (mmHg) and HCO₃⁻ (mEq/L)
pub const REFERENCE_PACO2: f64 = 40.0;
pub const REFERENCE_HCO3: f64 = 24.0;

const RESPIRATORY_ACIDOSIS_PACO2: f64 = 45.0;
const RESPIRATORY_ALKALOSIS_PACO2: f64 = 35.0;
const METABOLIC_ACIDOSIS_HCO3: f64 = 22.0;
const METABOLIC_ALKALOSIS_HCO3: f64 = 26.0;

pub const MIXED_DISORDER_NOTE: &str = "Consider mixed disorder";

pub static PARAMETERS: [ParameterSpec; 3] = [
    ParameterSpec {
        id: "ph",
        label: "Arterial pH",
        unit: "",
        min: 6.80,
        max: 7.80,
        step: 0.01,
        normal: NormalBand::new(7.35, 7.45),
        default: 7.40,
        decimals: 2,
    },
    ParameterSpec {
        id: "paco2",
        label: "PaCO₂",
        unit: "mmHg",
        min: 15.0,
        max: 80.0,
        step: 1.0,
        normal: NormalBand::new(35.0, 45.0),
        default: 40.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "hco3",
        label: "HCO₃⁻",
        unit: "mEq/L",
        min: 5.0,
        max: 45.0,
        step: 1.0,
        normal: NormalBand::new(22.0, 28.0),
        default: 24.0,
        decimals: 0,
    },
];

pub static PRESETS: [Preset; 4] = [
    Preset {
        id: "acute-respiratory-acidosis",
        name: "Acute Resp. Acidosis",
        description: "Hypoventilation before the kidneys have had time to retain bicarbonate",
        values: &[7.28, 60.0, 27.0],
    },
    Preset {
        id: "chronic-respiratory-acidosis",
        name: "Chronic Resp. Acidosis",
        description: "Sustained hypercapnia with renal bicarbonate retention restoring pH",
        values: &[7.38, 60.0, 35.0],
    },
    Preset {
        id: "metabolic-acidosis",
        name: "Metabolic Acidosis",
        description: "Low bicarbonate with respiratory compensation checked by Winter's formula",
        values: &[7.22, 28.0, 11.0],
    },
    Preset {
        id: "metabolic-alkalosis",
        name: "Metabolic Alkalosis",
        description: "Bicarbonate excess with compensatory hypoventilation",
        values: &[7.52, 48.0, 38.0],
    },
];

/// Arterial blood gas inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcidBaseInputs {
    pub ph: f64,
    pub paco2: f64,
    pub hco3: f64,
}

impl Default for AcidBaseInputs {
    fn default() -> Self {
        Self::from_values(&PARAMETERS.map(|p| p.default))
    }
}

impl AcidBaseInputs {
    /// Build from values in `PARAMETERS` order
    pub fn from_values(values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), PARAMETERS.len());
        Self {
            ph: values[0],
            paco2: values[1],
            hco3: values[2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimaryDisorder {
    Normal,
    RespiratoryAcidosis,
    MetabolicAcidosis,
    RespiratoryAlkalosis,
    MetabolicAlkalosis,
}

impl PrimaryDisorder {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryDisorder::Normal => "Normal",
            PrimaryDisorder::RespiratoryAcidosis => "Respiratory Acidosis",
            PrimaryDisorder::MetabolicAcidosis => "Metabolic Acidosis",
            PrimaryDisorder::RespiratoryAlkalosis => "Respiratory Alkalosis",
            PrimaryDisorder::MetabolicAlkalosis => "Metabolic Alkalosis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compensation {
    NotApplicable,
    Appropriate,
    Inappropriate,
}

impl Compensation {
    pub fn label(&self) -> &'static str {
        match self {
            Compensation::NotApplicable => "N/A",
            Compensation::Appropriate => "Appropriate",
            Compensation::Inappropriate => "Inappropriate",
        }
    }

    fn from_check(appropriate: bool) -> Self {
        if appropriate {
            Compensation::Appropriate
        } else {
            Compensation::Inappropriate
        }
    }
}

/// Expected secondary response for the classified disorder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ExpectedCompensation {
    /// Respiratory disorders: expected HCO₃⁻ for acute and chronic courses
    Hco3 { acute: f64, chronic: f64 },

    /// Metabolic disorders: expected PaCO₂
    PaCo2(f64),
}

/// Acute and chronic expected HCO₃⁻ in respiratory acidosis
/// (+1 and +3.5 mEq/L per 10 mmHg rise in PaCO₂)
pub fn expected_hco3_respiratory_acidosis(paco2: f64) -> (f64, f64) {
    let delta = paco2 - REFERENCE_PACO2;
    (REFERENCE_HCO3 + 0.1 * delta, REFERENCE_HCO3 + 0.35 * delta)
}

/// Acute and chronic expected HCO₃⁻ in respiratory alkalosis
/// (−2 and −5 mEq/L per 10 mmHg fall in PaCO₂)
pub fn expected_hco3_respiratory_alkalosis(paco2: f64) -> (f64, f64) {
    let delta = REFERENCE_PACO2 - paco2;
    (REFERENCE_HCO3 - 0.2 * delta, REFERENCE_HCO3 - 0.5 * delta)
}

/// Winter's formula: expected PaCO₂ = 1.5 × HCO₃⁻ + 8
pub fn winters_expected_paco2(hco3: f64) -> f64 {
    1.5 * hco3 + 8.0
}

/// Expected PaCO₂ in metabolic alkalosis: +0.7 mmHg per mEq/L of HCO₃⁻ above 24
pub fn expected_paco2_metabolic_alkalosis(hco3: f64) -> f64 {
    REFERENCE_PACO2 + 0.7 * (hco3 - REFERENCE_HCO3)
}

/// Result of acid-base classification
#[derive(Debug, Clone, Serialize)]
pub struct AcidBaseResult {
    pub ph_status: PhStatus,
    pub primary_disorder: PrimaryDisorder,
    pub compensation: Compensation,
    pub expected: Option<ExpectedCompensation>,
    pub compensated: bool,
}

/// Classify an arterial blood gas
pub fn classify_acid_base(inputs: &AcidBaseInputs) -> AcidBaseResult {
    let AcidBaseInputs { ph, paco2, hco3 } = *inputs;
    let ph_status = classify_ph_status(ph);

    let (primary_disorder, compensation, expected) = match ph_status {
        PhStatus::Acidemia if paco2 > RESPIRATORY_ACIDOSIS_PACO2 => {
            let (acute, chronic) = expected_hco3_respiratory_acidosis(paco2);
            let appropriate = hco3 >= acute - COMPENSATION_TOLERANCE
                && hco3 <= chronic + COMPENSATION_TOLERANCE;
            (
                PrimaryDisorder::RespiratoryAcidosis,
                Compensation::from_check(appropriate),
                Some(ExpectedCompensation::Hco3 { acute, chronic }),
            )
        }
        PhStatus::Acidemia if hco3 < METABOLIC_ACIDOSIS_HCO3 => {
            let expected_paco2 = winters_expected_paco2(hco3);
            (
                PrimaryDisorder::MetabolicAcidosis,
                Compensation::from_check((paco2 - expected_paco2).abs() <= COMPENSATION_TOLERANCE),
                Some(ExpectedCompensation::PaCo2(expected_paco2)),
            )
        }
        PhStatus::Alkalemia if paco2 < RESPIRATORY_ALKALOSIS_PACO2 => {
            let (acute, chronic) = expected_hco3_respiratory_alkalosis(paco2);
            let appropriate = hco3 >= chronic - COMPENSATION_TOLERANCE
                && hco3 <= acute + COMPENSATION_TOLERANCE;
            (
                PrimaryDisorder::RespiratoryAlkalosis,
                Compensation::from_check(appropriate),
                Some(ExpectedCompensation::Hco3 { acute, chronic }),
            )
        }
        PhStatus::Alkalemia if hco3 > METABOLIC_ALKALOSIS_HCO3 => {
            let expected_paco2 = expected_paco2_metabolic_alkalosis(hco3);
            (
                PrimaryDisorder::MetabolicAlkalosis,
                Compensation::from_check((paco2 - expected_paco2).abs() <= COMPENSATION_TOLERANCE),
                Some(ExpectedCompensation::PaCo2(expected_paco2)),
            )
        }
        _ => (PrimaryDisorder::Normal, Compensation::NotApplicable, None),
    };

    let compensated = ph >= PH_ACIDEMIA_THRESHOLD
        && ph <= PH_ALKALEMIA_THRESHOLD
        && primary_disorder != PrimaryDisorder::Normal;

    AcidBaseResult {
        ph_status,
        primary_disorder,
        compensation,
        expected,
        compensated,
    }
}

impl AcidBaseResult {
    /// "Consider mixed disorder" applies when the response is off and pH is not normalized
    pub fn suggests_mixed_disorder(&self) -> bool {
        !self.compensated && self.compensation == Compensation::Inappropriate
    }

    pub fn evaluation(&self) -> Evaluation {
        let derived = match self.expected {
            Some(ExpectedCompensation::Hco3 { acute, chronic }) => vec![
                DerivedValue {
                    id: "expected_hco3_acute",
                    label: "Expected HCO₃⁻ (acute)",
                    unit: "mEq/L",
                    formula: match self.primary_disorder {
                        PrimaryDisorder::RespiratoryAlkalosis => "24 − 0.2 × (40 − PaCO₂)",
                        _ => "24 + 0.1 × (PaCO₂ − 40)",
                    },
                    normal: None,
                    value: acute,
                },
                DerivedValue {
                    id: "expected_hco3_chronic",
                    label: "Expected HCO₃⁻ (chronic)",
                    unit: "mEq/L",
                    formula: match self.primary_disorder {
                        PrimaryDisorder::RespiratoryAlkalosis => "24 − 0.5 × (40 − PaCO₂)",
                        _ => "24 + 0.35 × (PaCO₂ − 40)",
                    },
                    normal: None,
                    value: chronic,
                },
            ],
            Some(ExpectedCompensation::PaCo2(expected)) => vec![DerivedValue {
                id: "expected_paco2",
                label: "Expected PaCO₂",
                unit: "mmHg",
                formula: match self.primary_disorder {
                    PrimaryDisorder::MetabolicAlkalosis => "40 + 0.7 × (HCO₃⁻ − 24)",
                    _ => "1.5 × HCO₃⁻ + 8",
                },
                normal: None,
                value: expected,
            }],
            None => Vec::new(),
        };

        let mut notes = Vec::new();
        if self.suggests_mixed_disorder() {
            notes.push(MIXED_DISORDER_NOTE);
        }

        Evaluation {
            derived,
            classifications: vec![
                Classification {
                    id: "ph_status",
                    label: self.ph_status.label(),
                },
                Classification {
                    id: "primary_disorder",
                    label: self.primary_disorder.label(),
                },
                Classification {
                    id: "compensation",
                    label: self.compensation.label(),
                },
                Classification {
                    id: "compensated",
                    label: if self.compensated { "Compensated" } else { "Not compensated" },
                },
            ],
            notes,
        }
    }
}
