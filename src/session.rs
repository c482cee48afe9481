//! Simulator sessions
//!
//! A `SimulatorSession` owns the parameter set of one simulator. Every
//! mutation clamps, recomputes and returns a fresh `Snapshot`; a rejected
//! mutation leaves the set untouched.

use crate::catalog::find_interactive;
use crate::error::{EngineError, Result};
use crate::parameters::{ParameterSet, ParameterSpec};
use crate::simulators::{Preset, SimulatorKind};
use crate::snapshot::Snapshot;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SimulatorSession {
    kind: SimulatorKind,
    params: ParameterSet,
}

impl SimulatorSession {
    /// New session at baseline defaults
    pub fn new(kind: SimulatorKind) -> Self {
        Self {
            kind,
            params: ParameterSet::new(kind.parameters()),
        }
    }

    /// Open the simulator behind a catalog entry
    pub fn open(interactive_id: &str) -> Result<Self> {
        let entry = find_interactive(interactive_id)?;
        debug!(interactive = entry.id, "Opening simulator session");
        Ok(Self::new(entry.kind))
    }

    pub fn kind(&self) -> SimulatorKind {
        self.kind
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn specs(&self) -> &'static [ParameterSpec] {
        self.params.specs()
    }

    pub fn presets(&self) -> &'static [Preset] {
        self.kind.presets()
    }

    /// Set one parameter; out-of-range values are clamped to the slider range.
    pub fn set(&mut self, parameter_id: &str, value: f64) -> Result<Snapshot> {
        if !value.is_finite() {
            return Err(EngineError::NonFiniteValue {
                parameter: parameter_id.to_string(),
                value,
            });
        }

        let stored = self
            .params
            .set(parameter_id, value)
            .ok_or_else(|| EngineError::UnknownParameter {
                simulator: self.kind.id().to_string(),
                parameter: parameter_id.to_string(),
            })?;

        if stored != value {
            debug!(
                simulator = self.kind.id(),
                parameter = parameter_id,
                requested = value,
                stored,
                "Clamped parameter to range"
            );
        }

        Ok(self.snapshot())
    }

    /// Restore every parameter to its default
    pub fn reset(&mut self) -> Snapshot {
        self.params.reset();
        self.snapshot()
    }

    /// Replace all values with a preset's; unknown ids change nothing.
    pub fn apply_preset(&mut self, preset_id: &str) -> Result<Snapshot> {
        let Some(preset) = self.kind.find_preset(preset_id) else {
            warn!(simulator = self.kind.id(), preset = preset_id, "Unknown preset");
            return Err(EngineError::UnknownPreset {
                simulator: self.kind.id().to_string(),
                preset: preset_id.to_string(),
            });
        };

        self.params.replace_all(preset.values);
        debug!(simulator = self.kind.id(), preset = preset.id, "Applied preset");
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.kind, &self.params)
    }
}
