use cable_sizer::app::report::{self, OutputFormat};
use cable_sizer::config::layered::Overrides;
use cable_sizer::core::ConfigProvider;
use cable_sizer::utils::validation::Validate;
use cable_sizer::{LayeredConfig, Phase, SizingEngine, TomlConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file
}

#[test]
fn test_end_to_end_from_config_file() {
    let temp_file = write_config(
        r#"
[load]
voltage = 400.0
phase = "Three Phase"
length = 80.0
power = 100.0

[output]
format = "csv"
"#,
    );

    let file = TomlConfig::from_file(temp_file.path()).unwrap();
    file.validate().unwrap();
    let config = LayeredConfig::new(Overrides::default(), Some(file));

    let engine = SizingEngine::from_config(&config).unwrap();
    let sizing = engine.size(&config.load_spec()).unwrap();
    assert!(!sizing.is_empty());
    assert_eq!(sizing.load.phase, Phase::ThreePhase);

    let output = report::render(&sizing, config.output_format()).unwrap();
    assert!(output.starts_with("cross_section_mm2,"));
    assert_eq!(output.lines().count(), 1 + sizing.candidates.len());
}

#[test]
fn test_overrides_replace_file_values() {
    let temp_file = write_config(
        r#"
[load]
voltage = 230.0
phase = "single"
power = 3.0
"#,
    );
    let file = TomlConfig::from_file(temp_file.path()).unwrap();
    let overrides = Overrides {
        power: Some(9.0),
        length: Some(30.0),
        ..Overrides::default()
    };
    let config = LayeredConfig::new(overrides, Some(file));
    let load = config.load_spec();

    assert_eq!(load.voltage_volts, 230.0);
    assert_eq!(load.phase, Phase::SinglePhase);
    assert_eq!(load.power_kva, 9.0);
    assert_eq!(load.length_meters, 30.0);
    assert_eq!(config.output_format(), OutputFormat::Text);
}

#[test]
fn test_custom_catalog_from_file() {
    let temp_file = write_config(
        r#"
[load]
power = 5000.0
length = 10.0

[[catalog]]
cross_section = 630.0
resistance = 0.0000283
ampacity = 7500.0

[[catalog]]
cross_section = 300.0
resistance = 0.0000601
ampacity = 410.0
"#,
    );
    let file = TomlConfig::from_file(temp_file.path()).unwrap();
    let config = LayeredConfig::new(Overrides::default(), Some(file));

    let engine = SizingEngine::from_config(&config).unwrap();
    assert_eq!(engine.catalog().len(), 2);

    let sizing = engine.size(&config.load_spec()).unwrap();
    assert_eq!(sizing.candidates.len(), 1);
    assert_eq!(sizing.recommended().unwrap().spec.cross_section_mm2, 630.0);
}

#[test]
fn test_invalid_catalog_in_file_is_rejected() {
    let temp_file = write_config(
        r#"
[[catalog]]
cross_section = 16.0
resistance = -0.00115
ampacity = 61.0
"#,
    );
    let file = TomlConfig::from_file(temp_file.path()).unwrap();
    assert!(file.validate().is_err());

    let config = LayeredConfig::new(Overrides::default(), Some(file));
    assert!(SizingEngine::from_config(&config).is_err());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let temp_file = write_config("[load\nvoltage = 415\n");
    let err = TomlConfig::from_file(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TOML parsing error"));
}
