use crate::app::report::OutputFormat;
use crate::core::catalog::CableCatalog;
use crate::core::ConfigProvider;
use crate::domain::model::{CableSpec, LoadSpec, Phase, SizingLimits};
use crate::utils::error::{Result, SizingError};
use crate::utils::validation::{
    validate_non_negative_real, validate_positive_real, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub load: LoadSection,
    #[serde(default)]
    pub limits: LimitsSection,
    #[serde(default)]
    pub output: OutputSection,
    /// Replaces the built-in copper table when present.
    pub catalog: Option<Vec<CableSpec>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadSection {
    pub voltage: Option<f64>,
    pub phase: Option<Phase>,
    pub length: Option<f64>,
    pub power: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsSection {
    pub max_voltage_drop_percent: Option<f64>,
    pub run_length_factor: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
}

fn env_var_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = PATTERN.get() {
        return Ok(re);
    }
    let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SizingError::ConfigValidationError {
        field: "env_substitution".to_string(),
        message: e.to_string(),
    })?;
    Ok(PATTERN.get_or_init(|| re))
}

impl TomlConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SizingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text after substituting `${VAR}` placeholders.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SizingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Unset variables are left as written so the parse error points at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = env_var_pattern()?;
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(voltage) = self.load.voltage {
            validate_positive_real("load.voltage", voltage)?;
        }
        if let Some(power) = self.load.power {
            validate_positive_real("load.power", power)?;
        }
        if let Some(length) = self.load.length {
            validate_non_negative_real("load.length", length)?;
        }
        if let Some(max_drop) = self.limits.max_voltage_drop_percent {
            validate_range("limits.max_voltage_drop_percent", max_drop, 0.0, 100.0)?;
        }
        if let Some(factor) = self.limits.run_length_factor {
            validate_positive_real("limits.run_length_factor", factor)?;
        }
        if let Some(cables) = &self.catalog {
            CableCatalog::from_specs(cables.clone())?;
        }
        Ok(())
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.format
    }
}

impl ConfigProvider for TomlConfig {
    fn load_spec(&self) -> LoadSpec {
        let defaults = LoadSpec::default();
        LoadSpec {
            power_kva: self.load.power.unwrap_or(defaults.power_kva),
            voltage_volts: self.load.voltage.unwrap_or(defaults.voltage_volts),
            phase: self.load.phase.unwrap_or(defaults.phase),
            length_meters: self.load.length.unwrap_or(defaults.length_meters),
        }
    }

    fn limits(&self) -> SizingLimits {
        let defaults = SizingLimits::default();
        SizingLimits {
            max_voltage_drop_percent: self
                .limits
                .max_voltage_drop_percent
                .unwrap_or(defaults.max_voltage_drop_percent),
            run_length_factor: self
                .limits
                .run_length_factor
                .unwrap_or(defaults.run_length_factor),
        }
    }

    fn custom_cables(&self) -> Option<&[CableSpec]> {
        self.catalog.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[load]
voltage = 230.0
phase = "single"
length = 20.0
power = 5.0

[limits]
max_voltage_drop_percent = 3.0
run_length_factor = 2.0

[output]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let load = config.load_spec();

        assert_eq!(load.voltage_volts, 230.0);
        assert_eq!(load.phase, Phase::SinglePhase);
        assert_eq!(load.length_meters, 20.0);
        assert_eq!(load.power_kva, 5.0);
        assert_eq!(config.limits().max_voltage_drop_percent, 3.0);
        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert!(config.custom_cables().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.load_spec(), LoadSpec::default());
        assert_eq!(config.limits(), SizingLimits::default());
        assert!(config.output_format().is_none());
    }

    #[test]
    fn test_phase_accepts_display_names() {
        let config = TomlConfig::from_toml_str("[load]\nphase = \"Three Phase\"\n").unwrap();
        assert_eq!(config.load_spec().phase, Phase::ThreePhase);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CABLE_SIZER_TEST_VOLTAGE", "400.0");

        let toml_content = r#"
[load]
voltage = ${CABLE_SIZER_TEST_VOLTAGE}
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.load_spec().voltage_volts, 400.0);

        std::env::remove_var("CABLE_SIZER_TEST_VOLTAGE");
    }

    #[test]
    fn test_unset_env_var_fails_to_parse() {
        let result = TomlConfig::from_toml_str("[load]\nvoltage = ${CABLE_SIZER_UNSET_VAR}\n");
        assert!(matches!(
            result,
            Err(SizingError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[load]\nvoltage = 0.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[limits]\nmax_voltage_drop_percent = 150.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[load]\nlength = 0.0\n").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_catalog() {
        let toml_content = r#"
[[catalog]]
cross_section = 4.0
resistance = 0.00461
ampacity = 26.0

[[catalog]]
cross_section = 2.5
resistance = 0.00741
ampacity = 20.0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.custom_cables().unwrap().len(), 2);
        assert!(config.validate().is_ok());

        let duplicated = r#"
[[catalog]]
cross_section = 4.0
resistance = 0.00461
ampacity = 26.0

[[catalog]]
cross_section = 4.0
resistance = 0.0045
ampacity = 27.0
"#;
        let config = TomlConfig::from_toml_str(duplicated).unwrap();
        assert!(matches!(config.validate(), Err(SizingError::CatalogError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[load]\npower = 75.0\nphase = \"three\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.load_spec().power_kva, 75.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/nonexistent/cable-sizer.toml");
        assert!(matches!(result, Err(SizingError::IoError(_))));
    }
}
