//! ELECTROLYTE DYNAMICS CALCULATOR
//!
//! Anion gap, albumin-corrected anion gap and calculated serum osmolarity
//! from a basic metabolic panel.
//!
//! **Formulas**:
//!   - AG = Na⁺ − (Cl⁻ + HCO₃⁻), normal 8-12 mEq/L
//!   - AG(corrected) = AG + 2.5 × (4.0 − albumin), display only
//!   - Osm = 2 × Na⁺ + glucose / 18 + BUN / 2.8, normal 275-295 mOsm/kg

use super::Preset;
use crate::interpretation::{compare_to_band, BandFit, NormalBand};
use crate::parameters::ParameterSpec;
use crate::snapshot::{Classification, DerivedValue, Evaluation};
use serde::Serialize;

pub const ANION_GAP_NORMAL: NormalBand = NormalBand::new(8.0, 12.0);
pub const OSMOLARITY_NORMAL: NormalBand = NormalBand::new(275.0, 295.0);

/// Albumin (g/dL) at which no anion gap correction applies
pub const REFERENCE_ALBUMIN: f64 = 4.0;

/// mEq/L of anion gap per g/dL of albumin below reference
pub const ALBUMIN_CORRECTION_FACTOR: f64 = 2.5;

/// Glucose mg/dL to mmol/L divisor
const GLUCOSE_DIVISOR: f64 = 18.0;

/// BUN mg/dL to mmol/L divisor
const BUN_DIVISOR: f64 = 2.8;

/// Parameter table (order defines `ElectrolyteInputs::from_values`)
pub static PARAMETERS: [ParameterSpec; 7] = [
    ParameterSpec {
        id: "sodium",
        label: "Sodium (Na⁺)",
        unit: "mEq/L",
        min: 110.0,
        max: 170.0,
        step: 1.0,
        normal: NormalBand::new(135.0, 145.0),
        default: 140.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "potassium",
        label: "Potassium (K⁺)",
        unit: "mEq/L",
        min: 2.0,
        max: 7.0,
        step: 0.1,
        normal: NormalBand::new(3.5, 5.0),
        default: 4.0,
        decimals: 1,
    },
    ParameterSpec {
        id: "chloride",
        label: "Chloride (Cl⁻)",
        unit: "mEq/L",
        min: 70.0,
        max: 130.0,
        step: 1.0,
        normal: NormalBand::new(96.0, 106.0),
        default: 102.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "bicarbonate",
        label: "Bicarbonate (HCO₃⁻)",
        unit: "mEq/L",
        min: 5.0,
        max: 40.0,
        step: 1.0,
        normal: NormalBand::new(22.0, 28.0),
        default: 24.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "glucose",
        label: "Glucose",
        unit: "mg/dL",
        min: 40.0,
        max: 600.0,
        step: 5.0,
        normal: NormalBand::new(70.0, 100.0),
        default: 90.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "bun",
        label: "BUN",
        unit: "mg/dL",
        min: 5.0,
        max: 100.0,
        step: 1.0,
        normal: NormalBand::new(7.0, 20.0),
        default: 14.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "albumin",
        label: "Albumin",
        unit: "g/dL",
        min: 1.5,
        max: 5.5,
        step: 0.1,
        normal: NormalBand::new(3.5, 5.0),
        default: 4.0,
        decimals: 1,
    },
];

pub static PRESETS: [Preset; 3] = [
    Preset {
        id: "diabetic-ketoacidosis",
        name: "Diabetic Ketoacidosis",
        description: "Ketoacids consume bicarbonate: high anion gap with marked hyperglycemia",
        values: &[132.0, 5.2, 98.0, 8.0, 520.0, 28.0, 4.0],
    },
    Preset {
        id: "siadh-hyponatremia",
        name: "Hyponatremia (SIADH)",
        description: "Water retention dilutes sodium and lowers measured osmolarity",
        values: &[118.0, 3.8, 85.0, 24.0, 90.0, 12.0, 4.0],
    },
    Preset {
        id: "normal-anion-gap-acidosis",
        name: "Normal AG Acidosis",
        description: "Bicarbonate loss replaced by chloride: hyperchloremic acidosis with a normal gap",
        values: &[138.0, 5.8, 110.0, 16.0, 95.0, 18.0, 4.0],
    },
];

/// Basic metabolic panel inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElectrolyteInputs {
    pub sodium: f64,
    pub potassium: f64,
    pub chloride: f64,
    pub bicarbonate: f64,
    pub glucose: f64,
    pub bun: f64,
    pub albumin: f64,
}

impl Default for ElectrolyteInputs {
    fn default() -> Self {
        Self::from_values(&PARAMETERS.map(|p| p.default))
    }
}

impl ElectrolyteInputs {
    /// Build from values in `PARAMETERS` order
    pub fn from_values(values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), PARAMETERS.len());
        Self {
            sodium: values[0],
            potassium: values[1],
            chloride: values[2],
            bicarbonate: values[3],
            glucose: values[4],
            bun: values[5],
            albumin: values[6],
        }
    }
}

/// Anion gap (mEq/L)
pub fn anion_gap(sodium: f64, chloride: f64, bicarbonate: f64) -> f64 {
    sodium - (chloride + bicarbonate)
}

/// Albumin-corrected anion gap (mEq/L); equals `anion_gap` at albumin 4.0
pub fn corrected_anion_gap(anion_gap: f64, albumin: f64) -> f64 {
    anion_gap + ALBUMIN_CORRECTION_FACTOR * (REFERENCE_ALBUMIN - albumin)
}

/// Calculated serum osmolarity (mOsm/kg)
pub fn serum_osmolarity(sodium: f64, glucose: f64, bun: f64) -> f64 {
    2.0 * sodium + glucose / GLUCOSE_DIVISOR + bun / BUN_DIVISOR
}

/// Result of the electrolyte calculation
#[derive(Debug, Clone, Serialize)]
pub struct ElectrolyteResult {
    pub anion_gap: f64,
    pub corrected_anion_gap: f64,
    pub osmolarity: f64,
    pub anion_gap_fit: BandFit,
    pub osmolarity_fit: BandFit,
}

/// Calculate all electrolyte outputs
pub fn calculate_electrolytes(inputs: &ElectrolyteInputs) -> ElectrolyteResult {
    let ag = anion_gap(inputs.sodium, inputs.chloride, inputs.bicarbonate);
    let osmolarity = serum_osmolarity(inputs.sodium, inputs.glucose, inputs.bun);

    ElectrolyteResult {
        anion_gap: ag,
        corrected_anion_gap: corrected_anion_gap(ag, inputs.albumin),
        osmolarity,
        anion_gap_fit: compare_to_band(ag, ANION_GAP_NORMAL).fit,
        osmolarity_fit: compare_to_band(osmolarity, OSMOLARITY_NORMAL).fit,
    }
}

impl ElectrolyteResult {
    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            derived: vec![
                DerivedValue {
                    id: "anion_gap",
                    label: "Anion Gap",
                    unit: "mEq/L",
                    formula: "Na⁺ − (Cl⁻ + HCO₃⁻)",
                    normal: Some(ANION_GAP_NORMAL),
                    value: self.anion_gap,
                },
                DerivedValue {
                    id: "corrected_anion_gap",
                    label: "Corrected Anion Gap",
                    unit: "mEq/L",
                    formula: "AG + 2.5 × (4.0 − albumin)",
                    normal: None,
                    value: self.corrected_anion_gap,
                },
                DerivedValue {
                    id: "serum_osmolarity",
                    label: "Serum Osmolarity",
                    unit: "mOsm/kg",
                    formula: "2 × Na⁺ + glucose / 18 + BUN / 2.8",
                    normal: Some(OSMOLARITY_NORMAL),
                    value: self.osmolarity,
                },
            ],
            classifications: vec![
                Classification {
                    id: "anion_gap_status",
                    label: self.anion_gap_fit.status_label(),
                },
                Classification {
                    id: "osmolarity_status",
                    label: self.osmolarity_fit.status_label(),
                },
            ],
            notes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn preset(id: &str) -> ElectrolyteInputs {
        let p = PRESETS.iter().find(|p| p.id == id).unwrap();
        ElectrolyteInputs::from_values(p.values)
    }

    #[test]
    fn test_baseline_is_normal() {
        let result = calculate_electrolytes(&ElectrolyteInputs::default());

        // 140 - (102 + 24) = 14
        assert_relative_eq!(result.anion_gap, 14.0, epsilon = 1e-9);
        assert_eq!(result.anion_gap_fit, BandFit::Above);

        // 280 + 5 + 5 = 290
        assert_relative_eq!(result.osmolarity, 290.0, epsilon = 1e-9);
        assert_eq!(result.osmolarity_fit, BandFit::Within);
    }

    #[test]
    fn test_corrected_anion_gap() {
        assert_relative_eq!(corrected_anion_gap(12.0, 4.0), 12.0, epsilon = 1e-9);
        // Hypoalbuminemia hides unmeasured anions: 12 + 2.5 × 2 = 17
        assert_relative_eq!(corrected_anion_gap(12.0, 2.0), 17.0, epsilon = 1e-9);
        assert_relative_eq!(corrected_anion_gap(12.0, 5.0), 9.5, epsilon = 1e-9);
    }

    #[test]
    fn test_dka_preset() {
        let result = calculate_electrolytes(&preset("diabetic-ketoacidosis"));

        // 132 - (98 + 8) = 26
        assert_relative_eq!(result.anion_gap, 26.0, epsilon = 1e-9);
        assert_eq!(result.anion_gap_fit.status_label(), "Abnormal");

        // 264 + 28.888... + 10 = 302.89
        assert_relative_eq!(result.osmolarity, 264.0 + 520.0 / 18.0 + 10.0, epsilon = 1e-9);
        assert!((result.osmolarity - 302.9).abs() < 0.05);
        assert_eq!(result.osmolarity_fit, BandFit::Above);
    }

    #[test]
    fn test_siadh_preset() {
        let result = calculate_electrolytes(&preset("siadh-hyponatremia"));
        // 118 - (85 + 24) = 9, gap preserved
        assert_relative_eq!(result.anion_gap, 9.0, epsilon = 1e-9);
        assert_eq!(result.anion_gap_fit, BandFit::Within);
        // 236 + 5 + 4.29 = 245.3
        assert_eq!(result.osmolarity_fit, BandFit::Below);
    }

    #[test]
    fn test_normal_gap_acidosis_preset() {
        let result = calculate_electrolytes(&preset("normal-anion-gap-acidosis"));
        // 138 - (110 + 16) = 12, still inside the band
        assert_relative_eq!(result.anion_gap, 12.0, epsilon = 1e-9);
        assert_eq!(result.anion_gap_fit, BandFit::Within);
    }

    #[test]
    fn test_evaluation_labels() {
        let eval = calculate_electrolytes(&preset("diabetic-ketoacidosis")).evaluation();
        assert_eq!(eval.derived.len(), 3);
        assert_eq!(eval.classifications[0].label, "Abnormal");
        assert_eq!(eval.classifications[1].label, "Abnormal");
        assert!(eval.notes.is_empty());
    }
}
