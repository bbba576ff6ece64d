//! Load current, voltage drop, and the catalog filter built on them.

use crate::core::catalog::CableCatalog;
use crate::domain::model::{LoadSpec, Phase, SizingLimits, SizingResult, DEFAULT_RUN_LENGTH_FACTOR};
use crate::utils::error::{Result, SizingError};
use crate::utils::validation::Validate;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Line current drawn by a load of `power_kva` at `voltage_volts`.
///
/// Fails with [`SizingError::InvalidInput`] when the voltage is not a positive
/// number. Power is not checked here.
pub fn compute_current(power_kva: f64, voltage_volts: f64, phase: Phase) -> Result<f64> {
    if !voltage_volts.is_finite() || voltage_volts <= 0.0 {
        return Err(SizingError::invalid_input(
            "voltage",
            voltage_volts,
            "Voltage must be greater than zero",
        ));
    }

    let power_va = power_kva * 1000.0;
    let current = match phase {
        Phase::ThreePhase => power_va / (SQRT_3 * voltage_volts),
        Phase::SinglePhase => power_va / voltage_volts,
    };
    Ok(current)
}

/// Voltage lost over a run of `length_meters` (one-way), counting supply and return.
pub fn compute_voltage_drop(
    current_amps: f64,
    resistance_ohm_per_m: f64,
    length_meters: f64,
    phase: Phase,
) -> f64 {
    compute_voltage_drop_with_factor(
        current_amps,
        resistance_ohm_per_m,
        length_meters,
        phase,
        DEFAULT_RUN_LENGTH_FACTOR,
    )
}

/// Same as [`compute_voltage_drop`] with the one-way length multiplied by `run_length_factor`.
pub fn compute_voltage_drop_with_factor(
    current_amps: f64,
    resistance_ohm_per_m: f64,
    length_meters: f64,
    phase: Phase,
    run_length_factor: f64,
) -> f64 {
    let total_length = length_meters * run_length_factor;
    match phase {
        Phase::ThreePhase => SQRT_3 * current_amps * resistance_ohm_per_m * total_length,
        Phase::SinglePhase => current_amps * resistance_ohm_per_m * total_length,
    }
}

/// Every catalog size that carries the load within 5% voltage drop, smallest first.
///
/// An empty vector means no size is suitable; that is not an error.
pub fn select_suitable_cables(load: &LoadSpec, catalog: &CableCatalog) -> Result<Vec<SizingResult>> {
    select_suitable_cables_with_limits(load, catalog, &SizingLimits::default())
}

/// Same as [`select_suitable_cables`] with a caller-chosen drop ceiling and run-length factor.
pub fn select_suitable_cables_with_limits(
    load: &LoadSpec,
    catalog: &CableCatalog,
    limits: &SizingLimits,
) -> Result<Vec<SizingResult>> {
    load.validate()?;
    limits.validate()?;

    let current_amps = compute_current(load.power_kva, load.voltage_volts, load.phase)?;
    Ok(filter_catalog(load, catalog, limits, current_amps))
}

/// Applies the ampacity and voltage-drop filters for an already computed load current.
/// Inputs must have been validated.
pub(crate) fn filter_catalog(
    load: &LoadSpec,
    catalog: &CableCatalog,
    limits: &SizingLimits,
    current_amps: f64,
) -> Vec<SizingResult> {
    catalog
        .iter()
        .filter_map(|spec| {
            let voltage_drop_volts = compute_voltage_drop_with_factor(
                current_amps,
                spec.resistance_ohm_per_m,
                load.length_meters,
                load.phase,
                limits.run_length_factor,
            );
            let voltage_drop_percent = (voltage_drop_volts / load.voltage_volts) * 100.0;

            let carries_load = current_amps <= spec.ampacity_amps;
            let within_drop = voltage_drop_percent <= limits.max_voltage_drop_percent;
            tracing::debug!(
                "{} mm^2: {:.2} V ({:.2}%), ampacity {} A, accepted={}",
                spec.cross_section_mm2,
                voltage_drop_volts,
                voltage_drop_percent,
                spec.ampacity_amps,
                carries_load && within_drop
            );

            (carries_load && within_drop).then_some(SizingResult {
                spec: *spec,
                current_amps,
                voltage_drop_volts,
                voltage_drop_percent,
            })
        })
        .collect()
}
