use crate::core::catalog::CableCatalog;
use crate::domain::model::SizingReport;
use crate::utils::error::{Result, SizingError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

pub const NO_SUITABLE_CABLE: &str = "No suitable cable size found. Try reducing length or power.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(SizingError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: text, json, csv".to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct CandidateRow {
    cross_section_mm2: f64,
    ampacity_amps: f64,
    resistance_ohm_per_m: f64,
    current_amps: f64,
    voltage_drop_volts: f64,
    voltage_drop_percent: f64,
}

pub fn render(report: &SizingReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
        OutputFormat::Csv => render_csv(report),
    }
}

pub fn render_text(report: &SizingReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Calculated Current: {:.2} A", report.current_amps);

    if report.is_empty() {
        let _ = writeln!(out, "{}", NO_SUITABLE_CABLE);
        return out;
    }

    let _ = writeln!(out, "Suitable Cable Sizes:");
    for result in &report.candidates {
        let _ = writeln!(
            out,
            "{} mm^2 - Rated {} A - Voltage Drop: {:.2} V ({:.2}%)",
            result.spec.cross_section_mm2,
            result.spec.ampacity_amps,
            result.voltage_drop_volts,
            result.voltage_drop_percent
        );
    }
    out
}

pub fn render_json(report: &SizingReport) -> Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

/// One row per suitable size. An empty report yields only the header.
pub fn render_csv(report: &SizingReport) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record([
        "cross_section_mm2",
        "ampacity_amps",
        "resistance_ohm_per_m",
        "current_amps",
        "voltage_drop_volts",
        "voltage_drop_percent",
    ])?;

    for result in &report.candidates {
        writer.serialize(CandidateRow {
            cross_section_mm2: result.spec.cross_section_mm2,
            ampacity_amps: result.spec.ampacity_amps,
            resistance_ohm_per_m: result.spec.resistance_ohm_per_m,
            current_amps: result.current_amps,
            voltage_drop_volts: result.voltage_drop_volts,
            voltage_drop_percent: result.voltage_drop_percent,
        })?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| SizingError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| {
        SizingError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub fn render_catalog(catalog: &CableCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>8}  {:>12}  {:>6}", "mm^2", "ohm/m", "A");
    for cable in catalog {
        let _ = writeln!(
            out,
            "{:>8}  {:>12}  {:>6}",
            cable.cross_section_mm2, cable.resistance_ohm_per_m, cable.ampacity_amps
        );
    }
    out
}
