use crate::utils::error::{Result, SizingError};
use crate::utils::validation::{
    validate_non_negative_real, validate_positive_real, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MAX_VOLTAGE_DROP_PERCENT: f64 = 5.0;
/// One-way length doubled: supply plus return conductor.
pub const DEFAULT_RUN_LENGTH_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Single Phase", alias = "single", alias = "single_phase", alias = "1")]
    SinglePhase,
    #[default]
    #[serde(rename = "Three Phase", alias = "three", alias = "three_phase", alias = "3")]
    ThreePhase,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::SinglePhase => "Single Phase",
            Phase::ThreePhase => "Three Phase",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "single" | "single phase" | "1" => Ok(Phase::SinglePhase),
            "three" | "three phase" | "3" => Ok(Phase::ThreePhase),
            _ => Err(SizingError::invalid_input(
                "phase",
                s,
                "Expected 'single' or 'three'",
            )),
        }
    }
}

/// One row of the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    #[serde(alias = "cross_section")]
    pub cross_section_mm2: f64,
    #[serde(alias = "resistance")]
    pub resistance_ohm_per_m: f64,
    #[serde(alias = "ampacity")]
    pub ampacity_amps: f64,
}

impl CableSpec {
    pub const fn new(cross_section_mm2: f64, resistance_ohm_per_m: f64, ampacity_amps: f64) -> Self {
        Self {
            cross_section_mm2,
            resistance_ohm_per_m,
            ampacity_amps,
        }
    }
}

impl Validate for CableSpec {
    fn validate(&self) -> Result<()> {
        let checks = [
            ("cross_section", self.cross_section_mm2),
            ("resistance", self.resistance_ohm_per_m),
            ("ampacity", self.ampacity_amps),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(SizingError::catalog(format!(
                    "{} mm^2: {} must be a positive number, got {}",
                    self.cross_section_mm2, field, value
                )));
            }
        }
        Ok(())
    }
}

/// The load to be supplied. `length_meters` is the one-way distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSpec {
    pub power_kva: f64,
    pub voltage_volts: f64,
    pub phase: Phase,
    pub length_meters: f64,
}

impl Default for LoadSpec {
    fn default() -> Self {
        Self {
            power_kva: 50.0,
            voltage_volts: 415.0,
            phase: Phase::ThreePhase,
            length_meters: 50.0,
        }
    }
}

impl Validate for LoadSpec {
    fn validate(&self) -> Result<()> {
        validate_positive_real("voltage", self.voltage_volts)?;
        validate_positive_real("power", self.power_kva)?;
        validate_non_negative_real("length", self.length_meters)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingLimits {
    pub max_voltage_drop_percent: f64,
    pub run_length_factor: f64,
}

impl Default for SizingLimits {
    fn default() -> Self {
        Self {
            max_voltage_drop_percent: DEFAULT_MAX_VOLTAGE_DROP_PERCENT,
            run_length_factor: DEFAULT_RUN_LENGTH_FACTOR,
        }
    }
}

impl Validate for SizingLimits {
    fn validate(&self) -> Result<()> {
        validate_range(
            "limits.max_voltage_drop_percent",
            self.max_voltage_drop_percent,
            0.0,
            100.0,
        )?;
        validate_positive_real("limits.run_length_factor", self.run_length_factor)?;
        Ok(())
    }
}

/// A catalog entry that satisfies both the ampacity and the voltage-drop limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub spec: CableSpec,
    pub current_amps: f64,
    pub voltage_drop_volts: f64,
    pub voltage_drop_percent: f64,
}

/// Outcome of one sizing run. An empty `candidates` list is a valid answer
/// meaning no catalog size can carry the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub load: LoadSpec,
    pub limits: SizingLimits,
    pub current_amps: f64,
    pub candidates: Vec<SizingResult>,
}

impl SizingReport {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Smallest acceptable size.
    pub fn recommended(&self) -> Option<&SizingResult> {
        self.candidates.first()
    }
}
