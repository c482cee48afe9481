//! RENAL HANDLING MODEL
//!
//! Filtration fraction, timed-urine creatinine clearance and KDIGO GFR
//! category.
//!
//! **Formulas**:
//!   - FF (%) = GFR / RPF × 100, normal 15-25%
//!   - CrCl (mL/min) = (UCr × UVol[L] × 1000) / (SCr × 1440)
//!
//! Serum creatinine (min 0.5) and RPF (min 200) never reach zero inside their
//! ranges, so both divisions are total.

use super::Preset;
use crate::interpretation::{classify_ckd_stage, compare_to_band, BandFit, CkdStage, NormalBand};
use crate::parameters::ParameterSpec;
use crate::snapshot::{Classification, DerivedValue, Evaluation};
use serde::Serialize;

pub const FILTRATION_FRACTION_NORMAL: NormalBand = NormalBand::new(15.0, 25.0);

const MINUTES_PER_DAY: f64 = 1440.0;
const ML_PER_LITRE: f64 = 1000.0;

pub static PARAMETERS: [ParameterSpec; 5] = [
    ParameterSpec {
        id: "gfr",
        label: "GFR",
        unit: "mL/min/1.73m²",
        min: 5.0,
        max: 150.0,
        step: 5.0,
        normal: NormalBand::new(90.0, 120.0),
        default: 100.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "rpf",
        label: "Renal Plasma Flow",
        unit: "mL/min",
        min: 200.0,
        max: 1000.0,
        step: 10.0,
        normal: NormalBand::new(550.0, 650.0),
        default: 600.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "serum_creatinine",
        label: "Serum Creatinine",
        unit: "mg/dL",
        min: 0.5,
        max: 10.0,
        step: 0.1,
        normal: NormalBand::new(0.7, 1.3),
        default: 1.0,
        decimals: 1,
    },
    ParameterSpec {
        id: "urine_creatinine",
        label: "Urine Creatinine",
        unit: "mg/dL",
        min: 10.0,
        max: 300.0,
        step: 10.0,
        normal: NormalBand::new(80.0, 200.0),
        default: 100.0,
        decimals: 0,
    },
    ParameterSpec {
        id: "urine_volume",
        label: "24h Urine Volume",
        unit: "L",
        min: 0.3,
        max: 4.0,
        step: 0.1,
        normal: NormalBand::new(1.0, 2.5),
        default: 1.5,
        decimals: 1,
    },
];

pub static PRESETS: [Preset; 3] = [
    Preset {
        id: "ckd-stage-3b",
        name: "CKD Stage 3b",
        description: "Moderately-severely reduced GFR with raised serum creatinine",
        values: &[45.0, 500.0, 2.2, 80.0, 1.2],
    },
    Preset {
        id: "ckd-stage-4",
        name: "CKD Stage 4",
        description: "Severely reduced GFR approaching the need for renal replacement planning",
        values: &[20.0, 400.0, 4.5, 50.0, 0.8],
    },
    Preset {
        id: "acute-kidney-injury",
        name: "Acute Kidney Injury",
        description: "Abrupt fall in filtration with oliguria and a rising creatinine",
        values: &[30.0, 300.0, 3.8, 40.0, 0.5],
    },
];

/// Renal function inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenalInputs {
    pub gfr: f64,
    pub rpf: f64,
    pub serum_creatinine: f64,
    pub urine_creatinine: f64,
    /// 24h urine volume in litres
    pub urine_volume: f64,
}

impl Default for RenalInputs {
    fn default() -> Self {
        Self::from_values(&PARAMETERS.map(|p| p.default))
    }
}

impl RenalInputs {
    /// Build from values in `PARAMETERS` order
    pub fn from_values(values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), PARAMETERS.len());
        Self {
            gfr: values[0],
            rpf: values[1],
            serum_creatinine: values[2],
            urine_creatinine: values[3],
            urine_volume: values[4],
        }
    }
}

/// Filtration fraction as a percentage
pub fn filtration_fraction(gfr: f64, rpf: f64) -> f64 {
    (gfr / rpf) * 100.0
}

/// Creatinine clearance (mL/min) from a 24h urine collection
pub fn creatinine_clearance(urine_creatinine: f64, urine_volume_l: f64, serum_creatinine: f64) -> f64 {
    (urine_creatinine * urine_volume_l * ML_PER_LITRE) / (serum_creatinine * MINUTES_PER_DAY)
}

/// Result of the renal calculation
#[derive(Debug, Clone, Serialize)]
pub struct RenalResult {
    pub filtration_fraction: f64,
    pub filtration_fraction_fit: BandFit,
    pub creatinine_clearance: f64,
    pub ckd_stage: CkdStage,
}

pub fn calculate_renal(inputs: &RenalInputs) -> RenalResult {
    let ff = filtration_fraction(inputs.gfr, inputs.rpf);

    RenalResult {
        filtration_fraction: ff,
        filtration_fraction_fit: compare_to_band(ff, FILTRATION_FRACTION_NORMAL).fit,
        creatinine_clearance: creatinine_clearance(
            inputs.urine_creatinine,
            inputs.urine_volume,
            inputs.serum_creatinine,
        ),
        ckd_stage: classify_ckd_stage(inputs.gfr),
    }
}

impl RenalResult {
    pub fn evaluation(&self) -> Evaluation {
        Evaluation {
            derived: vec![
                DerivedValue {
                    id: "filtration_fraction",
                    label: "Filtration Fraction",
                    unit: "%",
                    formula: "GFR / RPF × 100",
                    normal: Some(FILTRATION_FRACTION_NORMAL),
                    value: self.filtration_fraction,
                },
                DerivedValue {
                    id: "creatinine_clearance",
                    label: "Creatinine Clearance",
                    unit: "mL/min",
                    formula: "(UCr × UVol) / (SCr × 1440)",
                    normal: None,
                    value: self.creatinine_clearance,
                },
            ],
            classifications: vec![
                Classification {
                    id: "filtration_fraction_status",
                    label: self.filtration_fraction_fit.status_label(),
                },
                Classification {
                    id: "ckd_stage",
                    label: self.ckd_stage.label(),
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

    #[test]
    fn test_defaults() {
        let result = calculate_renal(&RenalInputs::default());

        assert_relative_eq!(result.filtration_fraction, 100.0 / 6.0, epsilon = 1e-9);
        assert_eq!(result.filtration_fraction_fit, BandFit::Within);

        // (100 × 1.5 × 1000) / (1.0 × 1440) = 104.17
        assert_relative_eq!(result.creatinine_clearance, 150_000.0 / 1440.0, epsilon = 1e-9);
        assert!((result.creatinine_clearance - 104.17).abs() < 0.005);

        assert_eq!(result.ckd_stage.label(), "G1 (Normal)");
    }

    #[test]
    fn test_ckd_presets() {
        let stage = |id: &str| {
            let preset = PRESETS.iter().find(|p| p.id == id).unwrap();
            calculate_renal(&RenalInputs::from_values(preset.values))
        };

        let g3b = stage("ckd-stage-3b");
        // GFR 45 is the inclusive floor of G3a
        assert_eq!(g3b.ckd_stage, CkdStage::G3a);
        assert_relative_eq!(g3b.filtration_fraction, 9.0, epsilon = 1e-9);
        assert_eq!(g3b.filtration_fraction_fit, BandFit::Below);

        let g4 = stage("ckd-stage-4");
        assert_eq!(g4.ckd_stage, CkdStage::G4);
        assert_relative_eq!(g4.filtration_fraction, 5.0, epsilon = 1e-9);

        let aki = stage("acute-kidney-injury");
        assert_eq!(aki.ckd_stage, CkdStage::G3b);
        // (40 × 0.5 × 1000) / (3.8 × 1440) = 3.65
        assert_relative_eq!(aki.creatinine_clearance, 20_000.0 / (3.8 * 1440.0), epsilon = 1e-9);
    }

    #[test]
    fn test_filtration_fraction_extremes() {
        // Largest reachable value: 150 / 200
        assert_relative_eq!(filtration_fraction(150.0, 200.0), 75.0, epsilon = 1e-9);
        assert_eq!(
            compare_to_band(filtration_fraction(150.0, 200.0), FILTRATION_FRACTION_NORMAL).fit,
            BandFit::Above
        );
    }
}
