use crate::core::catalog::CableCatalog;
use crate::core::sizing::{compute_current, filter_catalog};
use crate::domain::model::{LoadSpec, SizingLimits, SizingReport};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::borrow::Cow;

/// Runs sizing requests against one catalog with one set of limits.
#[derive(Debug, Clone)]
pub struct SizingEngine<'a> {
    catalog: Cow<'a, CableCatalog>,
    limits: SizingLimits,
}

impl SizingEngine<'static> {
    pub fn copper() -> Self {
        Self::new(CableCatalog::copper())
    }

    pub fn with_owned_catalog(catalog: CableCatalog) -> Self {
        Self {
            catalog: Cow::Owned(catalog),
            limits: SizingLimits::default(),
        }
    }

    /// Engine for the catalog and limits a configuration asks for.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let limits = config.limits();
        limits.validate()?;

        let engine = match config.custom_cables() {
            Some(cables) => {
                let catalog = CableCatalog::from_specs(cables.to_vec())?;
                tracing::info!("Using custom catalog with {} cables", catalog.len());
                Self::with_owned_catalog(catalog)
            }
            None => Self::copper(),
        };
        Ok(engine.with_limits(limits))
    }
}

impl<'a> SizingEngine<'a> {
    pub fn new(catalog: &'a CableCatalog) -> Self {
        Self {
            catalog: Cow::Borrowed(catalog),
            limits: SizingLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SizingLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn catalog(&self) -> &CableCatalog {
        &self.catalog
    }

    pub fn limits(&self) -> &SizingLimits {
        &self.limits
    }

    pub fn size(&self, load: &LoadSpec) -> Result<SizingReport> {
        load.validate()?;
        self.limits.validate()?;
        tracing::info!(
            "Sizing {} kVA at {} V ({}) over {} m",
            load.power_kva,
            load.voltage_volts,
            load.phase,
            load.length_meters
        );

        let current_amps = compute_current(load.power_kva, load.voltage_volts, load.phase)?;
        tracing::debug!("Load current: {:.2} A", current_amps);

        let candidates = filter_catalog(load, &self.catalog, &self.limits, current_amps);

        match candidates.first() {
            Some(smallest) => tracing::info!(
                "{} of {} sizes suitable, smallest {} mm^2",
                candidates.len(),
                self.catalog.len(),
                smallest.spec.cross_section_mm2
            ),
            None => tracing::warn!(
                "No suitable cable: {:.2} A, largest size {} mm^2",
                current_amps,
                self.catalog
                    .largest()
                    .map(|c| c.cross_section_mm2)
                    .unwrap_or_default()
            ),
        }

        Ok(SizingReport {
            load: *load,
            limits: self.limits,
            current_amps,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlConfig;
    use crate::domain::model::{CableSpec, Phase};

    #[test]
    fn test_engine_default_report() {
        let report = SizingEngine::copper().size(&LoadSpec::default()).unwrap();
        assert!(!report.is_empty());
        assert_eq!(report.recommended().unwrap().spec.cross_section_mm2, 25.0);
        assert!((report.current_amps - 69.56).abs() < 0.01);
        assert_eq!(report.limits, SizingLimits::default());
    }

    #[test]
    fn test_engine_empty_report_is_ok() {
        let load = LoadSpec {
            power_kva: 5000.0,
            voltage_volts: 415.0,
            phase: Phase::ThreePhase,
            length_meters: 500.0,
        };
        let report = SizingEngine::copper().size(&load).unwrap();
        assert!(report.is_empty());
        assert!(report.current_amps > 6950.0);
    }

    #[test]
    fn test_engine_with_owned_catalog() {
        let catalog = CableCatalog::from_specs(vec![CableSpec::new(400.0, 0.0000470, 500.0)]).unwrap();
        let engine = SizingEngine::with_owned_catalog(catalog);
        let report = engine.size(&LoadSpec::default()).unwrap();
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(engine.catalog().len(), 1);
    }

    #[test]
    fn test_engine_from_config() {
        let config = TomlConfig::from_toml_str(
            "[limits]\nmax_voltage_drop_percent = 1.0\n\n[[catalog]]\ncross_section = 70.0\nresistance = 0.000268\nampacity = 165.0\n",
        )
        .unwrap();
        let engine = SizingEngine::from_config(&config).unwrap();
        assert_eq!(engine.catalog().len(), 1);
        assert_eq!(engine.limits().max_voltage_drop_percent, 1.0);
        let report = engine.size(&config.load_spec()).unwrap();
        assert_eq!(report.recommended().unwrap().spec.cross_section_mm2, 70.0);
    }

    #[test]
    fn test_engine_from_config_rejects_bad_limits() {
        let config = TomlConfig::from_toml_str("[limits]\nrun_length_factor = 0.0\n").unwrap();
        assert!(SizingEngine::from_config(&config).is_err());
    }

    #[test]
    fn test_engine_matches_free_function() {
        let load = LoadSpec {
            power_kva: 120.0,
            voltage_volts: 400.0,
            phase: Phase::ThreePhase,
            length_meters: 90.0,
        };
        let report = SizingEngine::copper().size(&load).unwrap();
        let selected = crate::core::sizing::select_suitable_cables(&load, CableCatalog::copper()).unwrap();
        assert_eq!(report.candidates, selected);
        assert!(report.candidates.iter().all(|r| r.current_amps == report.current_amps));
    }

    #[test]
    fn test_engine_rejects_invalid_limits() {
        let limits = SizingLimits {
            max_voltage_drop_percent: -1.0,
            ..SizingLimits::default()
        };
        let engine = SizingEngine::copper().with_limits(limits);
        assert!(engine.size(&LoadSpec::default()).is_err());
    }

    #[test]
    fn test_engine_rejects_zero_voltage() {
        let load = LoadSpec {
            voltage_volts: 0.0,
            ..LoadSpec::default()
        };
        assert!(SizingEngine::copper().size(&load).is_err());
    }
}
