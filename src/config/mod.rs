pub mod layered;
pub mod toml_config;

pub use layered::LayeredConfig;
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::app::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{LoadSpec, Phase, SizingLimits};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cable-sizer")]
#[command(about = "Pick copper cable sizes by ampacity and voltage drop")]
pub struct CliConfig {
    /// Supply voltage in volts [default: 415]
    #[arg(long, allow_negative_numbers = true)]
    pub voltage: Option<f64>,

    /// Supply phase: single or three [default: three]
    #[arg(long)]
    pub phase: Option<Phase>,

    /// One-way cable length in metres [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    pub length: Option<f64>,

    /// Load power in kVA [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    pub power: Option<f64>,

    /// Maximum voltage drop in percent of supply voltage [default: 5]
    #[arg(long, allow_negative_numbers = true)]
    pub max_drop: Option<f64>,

    /// Multiplier applied to the one-way length to get the conductor run [default: 2]
    #[arg(long, allow_negative_numbers = true)]
    pub run_factor: Option<f64>,

    /// TOML configuration file; command-line values take precedence
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report format: text, json or csv [default: text]
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Print the cable catalog in use and exit
    #[arg(long)]
    pub list_cables: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn load_spec(&self) -> LoadSpec {
        let defaults = LoadSpec::default();
        LoadSpec {
            power_kva: self.power.unwrap_or(defaults.power_kva),
            voltage_volts: self.voltage.unwrap_or(defaults.voltage_volts),
            phase: self.phase.unwrap_or(defaults.phase),
            length_meters: self.length.unwrap_or(defaults.length_meters),
        }
    }

    fn limits(&self) -> SizingLimits {
        let defaults = SizingLimits::default();
        SizingLimits {
            max_voltage_drop_percent: self
                .max_drop
                .unwrap_or(defaults.max_voltage_drop_percent),
            run_length_factor: self.run_factor.unwrap_or(defaults.run_length_factor),
        }
    }
}
