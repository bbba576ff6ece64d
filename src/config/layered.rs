use crate::app::report::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::model::{CableSpec, LoadSpec, Phase, SizingLimits};

/// Explicit values (usually command-line flags) layered over an optional
/// TOML file, which is itself layered over the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    pub overrides: Overrides,
    pub file: Option<TomlConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub voltage: Option<f64>,
    pub phase: Option<Phase>,
    pub length: Option<f64>,
    pub power: Option<f64>,
    pub max_voltage_drop_percent: Option<f64>,
    pub run_length_factor: Option<f64>,
    pub format: Option<OutputFormat>,
}

impl LayeredConfig {
    pub fn new(overrides: Overrides, file: Option<TomlConfig>) -> Self {
        Self { overrides, file }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.overrides
            .format
            .or_else(|| self.file.as_ref().and_then(TomlConfig::output_format))
            .unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
impl From<&crate::config::CliConfig> for Overrides {
    fn from(cli: &crate::config::CliConfig) -> Self {
        Self {
            voltage: cli.voltage,
            phase: cli.phase,
            length: cli.length,
            power: cli.power,
            max_voltage_drop_percent: cli.max_drop,
            run_length_factor: cli.run_factor,
            format: cli.format,
        }
    }
}

impl ConfigProvider for LayeredConfig {
    fn load_spec(&self) -> LoadSpec {
        let base = self
            .file
            .as_ref()
            .map(ConfigProvider::load_spec)
            .unwrap_or_default();
        LoadSpec {
            power_kva: self.overrides.power.unwrap_or(base.power_kva),
            voltage_volts: self.overrides.voltage.unwrap_or(base.voltage_volts),
            phase: self.overrides.phase.unwrap_or(base.phase),
            length_meters: self.overrides.length.unwrap_or(base.length_meters),
        }
    }

    fn limits(&self) -> SizingLimits {
        let base = self
            .file
            .as_ref()
            .map(ConfigProvider::limits)
            .unwrap_or_default();
        SizingLimits {
            max_voltage_drop_percent: self
                .overrides
                .max_voltage_drop_percent
                .unwrap_or(base.max_voltage_drop_percent),
            run_length_factor: self
                .overrides
                .run_length_factor
                .unwrap_or(base.run_length_factor),
        }
    }

    fn custom_cables(&self) -> Option<&[CableSpec]> {
        self.file.as_ref().and_then(|f| f.custom_cables())
    }
}
