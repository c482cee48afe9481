//! Interactive catalog
//!
//! The list of simulators offered to learners, with the route each one is
//! served under.

use crate::error::{EngineError, Result};
use crate::simulators::SimulatorKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractiveEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub path: &'static str,
    #[serde(skip)]
    pub kind: SimulatorKind,
}

static INTERACTIVES: [InteractiveEntry; 3] = [
    InteractiveEntry {
        id: "electrolyte-dynamics",
        title: "Electrolyte Dynamics Playground",
        description: "Adjust a basic metabolic panel and watch the anion gap and serum osmolarity respond",
        category: "Electrolytes",
        path: "/interactives/electrolyte-dynamics",
        kind: SimulatorKind::ElectrolyteDynamics,
    },
    InteractiveEntry {
        id: "acid-base-simulator",
        title: "Acid-Base Simulator",
        description: "Classify blood gases and compare measured compensation against the expected response",
        category: "Acid-Base",
        path: "/interactives/acid-base-simulator",
        kind: SimulatorKind::AcidBase,
    },
    InteractiveEntry {
        id: "renal-handling",
        title: "Renal Handling Model",
        description: "Explore filtration fraction, creatinine clearance and CKD staging",
        category: "Renal",
        path: "/interactives/renal-handling",
        kind: SimulatorKind::RenalHandling,
    },
];

/// All catalog entries in display order
pub fn interactives() -> &'static [InteractiveEntry] {
    &INTERACTIVES
}

pub fn find_interactive(id: &str) -> Result<&'static InteractiveEntry> {
    INTERACTIVES
        .iter()
        .find(|entry| entry.id == id)
        .ok_or_else(|| EngineError::UnknownSimulator(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_simulators() {
        assert_eq!(interactives().len(), SimulatorKind::all().len());
        for entry in interactives() {
            assert_eq!(entry.kind.id(), entry.id);
            assert!(entry.path.ends_with(entry.id));
        }
    }

    #[test]
    fn test_find_interactive() {
        let entry = find_interactive("renal-handling").unwrap();
        assert_eq!(entry.title, "Renal Handling Model");
        assert_eq!(entry.category, "Renal");

        assert_eq!(
            find_interactive("cardiac-output"),
            Err(EngineError::UnknownSimulator("cardiac-output".to_string()))
        );
    }
}
