//! Simulator Integration Tests
//!
//! Drives the three simulators through sessions the way the interactive pages
//! do: open from the catalog, move sliders, apply presets, reset.

use approx::assert_relative_eq;
use labverse_engine::simulators::electrolyte_dynamics::{anion_gap, corrected_anion_gap, serum_osmolarity};
use labverse_engine::{
    interactives, BandFit, EngineError, SimulatorKind, SimulatorSession,
};
use proptest::prelude::*;

fn session(id: &str) -> SimulatorSession {
    SimulatorSession::open(id).expect("catalog entry")
}

#[test]
fn test_every_catalog_entry_opens_at_defaults() {
    for entry in interactives() {
        let s = session(entry.id);
        for (spec, &value) in s.specs().iter().zip(s.parameters().values()) {
            assert_eq!(value, spec.default, "{} / {}", entry.id, spec.id);
        }
        assert!(!s.snapshot().derived.is_empty());
    }
}

#[test]
fn test_electrolyte_osmolarity_baseline() {
    assert_relative_eq!(serum_osmolarity(140.0, 90.0, 14.0), 290.0, epsilon = 1e-9);

    let snapshot = session("electrolyte-dynamics").snapshot();
    assert_eq!(snapshot.classification("osmolarity_status"), Some("Normal"));
}

#[test]
fn test_dka_preset() {
    let mut s = session("electrolyte-dynamics");
    let snapshot = s.apply_preset("diabetic-ketoacidosis").unwrap();

    assert_relative_eq!(snapshot.derived_value("anion_gap").unwrap(), 26.0, epsilon = 1e-9);
    assert_eq!(snapshot.classification("anion_gap_status"), Some("Abnormal"));

    let osm = snapshot.derived_value("serum_osmolarity").unwrap();
    assert_eq!(format!("{:.1}", osm), "302.9");
    assert_eq!(snapshot.classification("osmolarity_status"), Some("Abnormal"));

    let sodium = snapshot.input("sodium").unwrap();
    assert_eq!(sodium.fit, BandFit::Below);
    assert_eq!(sodium.display, "132 mEq/L");
}

#[test]
fn test_acid_base_defaults_and_metabolic_acidosis() {
    let mut s = session("acid-base-simulator");
    let baseline = s.snapshot();
    assert_eq!(baseline.classification("primary_disorder"), Some("Normal"));
    assert_eq!(baseline.classification("compensation"), Some("N/A"));
    assert_eq!(baseline.classification("ph_status"), Some("Normal"));

    s.set("ph", 7.22).unwrap();
    s.set("paco2", 28.0).unwrap();
    let snapshot = s.set("hco3", 11.0).unwrap();

    assert_eq!(snapshot.classification("primary_disorder"), Some("Metabolic Acidosis"));
    assert_relative_eq!(snapshot.derived_value("expected_paco2").unwrap(), 24.5, epsilon = 1e-9);
    assert_eq!(snapshot.classification("compensation"), Some("Inappropriate"));
    assert!(!snapshot.notes.is_empty());
}

#[test]
fn test_renal_defaults() {
    let snapshot = session("renal-handling").snapshot();

    let ff = snapshot.derived_value("filtration_fraction").unwrap();
    assert_relative_eq!(ff, 16.67, epsilon = 0.005);
    assert_eq!(snapshot.classification("filtration_fraction_status"), Some("Normal"));

    let crcl = snapshot.derived_value("creatinine_clearance").unwrap();
    assert_relative_eq!(crcl, 104.17, epsilon = 0.005);
    assert_eq!(snapshot.classification("ckd_stage"), Some("G1 (Normal)"));
}

#[test]
fn test_gfr_stage_boundary() {
    let mut s = session("renal-handling");
    assert_eq!(s.set("gfr", 90.0).unwrap().classification("ckd_stage"), Some("G1 (Normal)"));
    assert_eq!(
        s.set("gfr", 89.999).unwrap().classification("ckd_stage"),
        Some("G2 (Mild)")
    );
}

#[test]
fn test_reset_is_idempotent() {
    for kind in SimulatorKind::all() {
        let mut s = SimulatorSession::new(*kind);
        if let Some(preset) = kind.presets().first() {
            s.apply_preset(preset.id).unwrap();
        }
        let once = s.reset();
        let twice = s.reset();
        assert_eq!(once.derived_values(), twice.derived_values());
        assert_eq!(once.classification_labels(), twice.classification_labels());
    }
}

#[test]
fn test_unknown_preset_leaves_state_unchanged() {
    let mut s = session("renal-handling");
    s.set("gfr", 55.0).unwrap();
    let before = s.snapshot();

    let err = s.apply_preset("metabolic-acidosis").unwrap_err();
    assert!(matches!(err, EngineError::UnknownPreset { .. }));
    assert_eq!(s.snapshot().derived_values(), before.derived_values());
    assert_eq!(s.parameters().get("gfr"), Some(55.0));
}

#[test]
fn test_every_preset_applies_unclamped() {
    for kind in SimulatorKind::all() {
        let mut s = SimulatorSession::new(*kind);
        for preset in kind.presets() {
            s.apply_preset(preset.id).unwrap();
            assert_eq!(s.parameters().values(), preset.values, "{}", preset.id);
        }
    }
}

#[test]
fn test_snapshot_serializes() {
    let snapshot = session("acid-base-simulator").snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["simulator"], "acid-base-simulator");
    assert_eq!(json["inputs"].as_array().map(Vec::len), Some(3));
}

proptest! {
    #[test]
    fn prop_anion_gap_exact(
        na in 110.0f64..=170.0,
        cl in 70.0f64..=130.0,
        hco3 in 5.0f64..=40.0,
    ) {
        let ag = anion_gap(na, cl, hco3);
        prop_assert!((ag - (na - (cl + hco3))).abs() <= 1e-9);
        prop_assert!((corrected_anion_gap(ag, 4.0) - ag).abs() <= 1e-9);
    }

    #[test]
    fn prop_set_stays_in_range(value in -1.0e6f64..1.0e6) {
        let mut s = SimulatorSession::new(SimulatorKind::ElectrolyteDynamics);
        let snapshot = s.set("glucose", value).unwrap();
        let stored = snapshot.input("glucose").unwrap().value;
        prop_assert!((40.0..=600.0).contains(&stored));
    }
}
