//! Threshold classification ladders.
//!
//! Each ladder is evaluated top to bottom and the first matching rung wins.

use serde::Serialize;

// ============================================================================
// pH Status
// ============================================================================

/// Lower edge of normal arterial pH
pub const PH_ACIDEMIA_THRESHOLD: f64 = 7.35;

/// Upper edge of normal arterial pH
pub const PH_ALKALEMIA_THRESHOLD: f64 = 7.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhStatus {
    /// pH < 7.35
    Acidemia,
    /// pH > 7.45
    Alkalemia,
    Normal,
}

impl PhStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PhStatus::Acidemia => "Acidemia",
            PhStatus::Alkalemia => "Alkalemia",
            PhStatus::Normal => "Normal",
        }
    }
}

/// Classify arterial pH. Both thresholds are strict.
pub fn classify_ph_status(ph: f64) -> PhStatus {
    if ph < PH_ACIDEMIA_THRESHOLD {
        PhStatus::Acidemia
    } else if ph > PH_ALKALEMIA_THRESHOLD {
        PhStatus::Alkalemia
    } else {
        PhStatus::Normal
    }
}

// ============================================================================
// CKD Stage (KDIGO GFR categories)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CkdStage {
    /// GFR >= 90
    G1,
    /// 60 <= GFR < 90
    G2,
    /// 45 <= GFR < 60
    G3a,
    /// 30 <= GFR < 45
    G3b,
    /// 15 <= GFR < 30
    G4,
    /// GFR < 15
    G5,
}

impl CkdStage {
    /// Display label, e.g. "G3a (Mild-Moderate)"
    pub fn label(&self) -> &'static str {
        match self {
            CkdStage::G1 => "G1 (Normal)",
            CkdStage::G2 => "G2 (Mild)",
            CkdStage::G3a => "G3a (Mild-Moderate)",
            CkdStage::G3b => "G3b (Moderate-Severe)",
            CkdStage::G4 => "G4 (Severe)",
            CkdStage::G5 => "G5 (Kidney Failure)",
        }
    }

    /// Inclusive lower GFR bound of the stage
    pub fn gfr_lower_bound(&self) -> f64 {
        match self {
            CkdStage::G1 => 90.0,
            CkdStage::G2 => 60.0,
            CkdStage::G3a => 45.0,
            CkdStage::G3b => 30.0,
            CkdStage::G4 => 15.0,
            CkdStage::G5 => 0.0,
        }
    }

    /// All stages, best kidney function first
    pub fn all() -> &'static [CkdStage] {
        &[
            CkdStage::G1,
            CkdStage::G2,
            CkdStage::G3a,
            CkdStage::G3b,
            CkdStage::G4,
            CkdStage::G5,
        ]
    }
}

/// Stage chronic kidney disease from GFR (mL/min/1.73m²).
/// Every rung is `>=`, so GFR exactly 90 is G1 and 89.999 is G2.
pub fn classify_ckd_stage(gfr: f64) -> CkdStage {
    match gfr {
        g if g >= 90.0 => CkdStage::G1,
        g if g >= 60.0 => CkdStage::G2,
        g if g >= 45.0 => CkdStage::G3a,
        g if g >= 30.0 => CkdStage::G3b,
        g if g >= 15.0 => CkdStage::G4,
        _ => CkdStage::G5,
    }
}
