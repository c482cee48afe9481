//! Simulator input parameters
//!
//! A `ParameterSpec` is the static description of one slider (range, step,
//! normal band, baseline). A `ParameterSet` holds the current values of one
//! simulator's parameters, in table order, and keeps every value clamped to
//! its allowed range.

use crate::interpretation::{compare_to_band, BandFit, NormalBand};
use serde::Serialize;
use smallvec::SmallVec;

/// Static description of one numeric clinical input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub normal: NormalBand,
    /// Physiologic baseline restored by reset
    pub default: f64,
    /// Decimals shown when formatting the value
    pub decimals: usize,
}

impl ParameterSpec {
    /// Clamp a value to `[min, max]`
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Allowed range as a band
    pub fn range(&self) -> NormalBand {
        NormalBand::new(self.min, self.max)
    }

    /// Check the table invariants: default inside the range, normal band
    /// inside the range, positive step
    pub fn is_well_formed(&self) -> bool {
        self.min <= self.default
            && self.default <= self.max
            && self.normal.is_subset_of(&self.range())
            && self.step > 0.0
    }

    /// E.g. "4.0 mEq/L", "7.40"
    pub fn format_value(&self, value: f64) -> String {
        if self.unit.is_empty() {
            format!("{:.*}", self.decimals, value)
        } else {
            format!("{:.*} {}", self.decimals, value, self.unit)
        }
    }
}

/// Current value of one parameter together with its normal-band fit
#[derive(Debug, Clone, Serialize)]
pub struct ParameterReading {
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub fit: BandFit,
    pub display: String,
}

impl ParameterReading {
    pub fn is_abnormal(&self) -> bool {
        !self.fit.is_normal()
    }
}

/// Current values for one simulator, aligned with its spec table
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    specs: &'static [ParameterSpec],
    values: SmallVec<[f64; 8]>,
}

impl ParameterSet {
    /// Create a set at baseline defaults
    pub fn new(specs: &'static [ParameterSpec]) -> Self {
        Self {
            specs,
            values: specs.iter().map(|s| s.default).collect(),
        }
    }

    pub fn specs(&self) -> &'static [ParameterSpec] {
        self.specs
    }

    /// Values in spec-table order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.specs.iter().position(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.index_of(id).map(|i| self.values[i])
    }

    /// Set one parameter by id, clamped to its range.
    /// Returns the stored value, or None for an unknown id.
    pub fn set(&mut self, id: &str, value: f64) -> Option<f64> {
        let index = self.index_of(id)?;
        let clamped = self.specs[index].clamp(value);
        self.values[index] = clamped;
        Some(clamped)
    }

    /// Replace every value at once (values given in spec-table order)
    pub fn replace_all(&mut self, values: &[f64]) {
        debug_assert_eq!(values.len(), self.specs.len());
        let replaced: SmallVec<[f64; 8]> = self
            .specs
            .iter()
            .zip(values)
            .map(|(spec, &v)| spec.clamp(v))
            .collect();
        self.values = replaced;
    }

    /// Restore every parameter to its default
    pub fn reset(&mut self) {
        for (value, spec) in self.values.iter_mut().zip(self.specs) {
            *value = spec.default;
        }
    }

    pub fn readings(&self) -> Vec<ParameterReading> {
        self.specs
            .iter()
            .zip(&self.values)
            .map(|(spec, &value)| ParameterReading {
                id: spec.id,
                label: spec.label,
                unit: spec.unit,
                value,
                fit: compare_to_band(value, spec.normal).fit,
                display: spec.format_value(value),
            })
            .collect()
    }
}
