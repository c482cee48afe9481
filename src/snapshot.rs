//! Read-only output of a simulator after each input change.

use crate::interpretation::{compare_to_band, BandFit, NormalBand};
use crate::parameters::{ParameterReading, ParameterSet};
use crate::simulators::SimulatorKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// A numeric output computed from the current parameters
#[derive(Debug, Clone, Serialize)]
pub struct DerivedValue {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    /// Formula as shown to the learner
    pub formula: &'static str,
    pub normal: Option<NormalBand>,
    pub value: f64,
}

impl DerivedValue {
    /// Band fit, or None for display-only values
    pub fn fit(&self) -> Option<BandFit> {
        self.normal.map(|band| compare_to_band(self.value, band).fit)
    }

    /// One decimal, e.g. "302.9 mOsm/kg"
    pub fn display(&self) -> String {
        match self.unit {
            "" => format!("{:.1}", self.value),
            "%" => format!("{:.1}%", self.value),
            unit => format!("{:.1} {}", self.value, unit),
        }
    }
}

/// One active categorical label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub id: &'static str,
    pub label: &'static str,
}

/// Derived values, classifications and notes for one parameter assignment
#[derive(Debug, Clone, Default, Serialize)]
pub struct Evaluation {
    pub derived: Vec<DerivedValue>,
    pub classifications: Vec<Classification>,
    pub notes: Vec<&'static str>,
}

/// Everything the presentation layer needs after an input change
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub simulator: SimulatorKind,
    pub inputs: Vec<ParameterReading>,
    pub derived: Vec<DerivedValue>,
    pub classifications: Vec<Classification>,
    pub notes: Vec<&'static str>,
}

impl Snapshot {
    /// Recompute every output from the current parameter values
    pub fn capture(simulator: SimulatorKind, parameters: &ParameterSet) -> Self {
        let Evaluation {
            derived,
            classifications,
            notes,
        } = simulator.evaluate(parameters.values());

        Self {
            simulator,
            inputs: parameters.readings(),
            derived,
            classifications,
            notes,
        }
    }

    pub fn input(&self, id: &str) -> Option<&ParameterReading> {
        self.inputs.iter().find(|r| r.id == id)
    }

    pub fn derived_value(&self, id: &str) -> Option<f64> {
        self.derived.iter().find(|d| d.id == id).map(|d| d.value)
    }

    pub fn classification(&self, id: &str) -> Option<&'static str> {
        self.classifications
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.label)
    }

    /// `{id -> number}` view of the derived values
    pub fn derived_values(&self) -> BTreeMap<&'static str, f64> {
        self.derived.iter().map(|d| (d.id, d.value)).collect()
    }

    /// `{id -> label}` view of the classifications
    pub fn classification_labels(&self) -> BTreeMap<&'static str, &'static str> {
        self.classifications
            .iter()
            .map(|c| (c.id, c.label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_display() {
        let ff = DerivedValue {
            id: "filtration_fraction",
            label: "Filtration Fraction",
            unit: "%",
            formula: "GFR / RPF × 100",
            normal: Some(NormalBand::new(15.0, 25.0)),
            value: 100.0 / 600.0 * 100.0,
        };
        assert_eq!(ff.display(), "16.7%");
        assert_eq!(ff.fit(), Some(BandFit::Within));

        let corrected = DerivedValue {
            id: "corrected_anion_gap",
            label: "Corrected Anion Gap",
            unit: "mEq/L",
            formula: "AG + 2.5 × (4.0 − albumin)",
            normal: None,
            value: 14.0,
        };
        assert_eq!(corrected.display(), "14.0 mEq/L");
        assert_eq!(corrected.fit(), None);
    }

    #[test]
    fn test_capture_maps() {
        let params = ParameterSet::new(SimulatorKind::RenalHandling.parameters());
        let snapshot = Snapshot::capture(SimulatorKind::RenalHandling, &params);

        let derived = snapshot.derived_values();
        assert!(derived.contains_key("filtration_fraction"));
        assert!(derived.contains_key("creatinine_clearance"));

        let labels = snapshot.classification_labels();
        assert_eq!(labels.get("ckd_stage"), Some(&"G1 (Normal)"));
        assert_eq!(snapshot.inputs.len(), 5);
    }
}
