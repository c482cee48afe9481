//! Normal Band Comparator
//!
//! Core logic for comparing a lab value against its reference band. Bands are
//! inclusive on both ends: a value sitting exactly on `min` or `max` is normal.

use serde::Serialize;

/// Inclusive reference range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalBand {
    pub min: f64,
    pub max: f64,
}

impl NormalBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when this band lies entirely inside `outer`
    pub fn is_subset_of(&self, outer: &NormalBand) -> bool {
        self.min >= outer.min && self.max <= outer.max && self.min <= self.max
    }

    /// "8-12" style text used in reading captions
    pub fn display_text(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Where a value falls relative to its band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandFit {
    /// value < min
    Below,

    /// min <= value <= max
    Within,

    /// value > max
    Above,
}

impl BandFit {
    pub fn display_text(&self) -> &'static str {
        match self {
            BandFit::Below => "Below normal",
            BandFit::Within => "Within normal",
            BandFit::Above => "Above normal",
        }
    }

    /// Badge label: anything outside the band is "Abnormal"
    pub fn status_label(&self) -> &'static str {
        match self {
            BandFit::Within => "Normal",
            BandFit::Below | BandFit::Above => "Abnormal",
        }
    }

    pub fn is_normal(&self) -> bool {
        *self == BandFit::Within
    }
}

/// Result of a band comparison with additional context
#[derive(Debug, Clone, Serialize)]
pub struct BandComparison {
    pub fit: BandFit,

    pub value: f64,

    pub band: NormalBand,

    /// Distance from the nearest band edge (0 when within)
    pub distance_from_band: f64,
}

impl BandComparison {
    pub fn is_normal(&self) -> bool {
        self.fit.is_normal()
    }

    pub fn status_label(&self) -> &'static str {
        self.fit.status_label()
    }

    /// Format the comparison for display
    /// E.g., "Anion Gap: 26.0 mEq/L (normal: 8-12)"
    pub fn format_with_context(&self, label: &str, unit: &str, decimals: usize) -> String {
        let unit_sep = if unit.is_empty() { "" } else { " " };
        format!(
            "{}: {:.*}{}{} (normal: {})",
            label,
            decimals,
            self.value,
            unit_sep,
            unit,
            self.band.display_text()
        )
    }
}

/// Compare a value against a reference band
pub fn compare_to_band(value: f64, band: NormalBand) -> BandComparison {
    let (fit, distance) = if value < band.min {
        (BandFit::Below, band.min - value)
    } else if value > band.max {
        (BandFit::Above, value - band.max)
    } else {
        (BandFit::Within, 0.0)
    };

    BandComparison {
        fit,
        value,
        band,
        distance_from_band: distance,
    }
}

/// Shorthand for the Normal/Abnormal badge of a value
pub fn status_label(value: f64, band: NormalBand) -> &'static str {
    compare_to_band(value, band).status_label()
}
