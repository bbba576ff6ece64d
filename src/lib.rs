pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{LayeredConfig, TomlConfig};

pub use crate::app::report::OutputFormat;
pub use crate::core::catalog::CableCatalog;
pub use crate::core::engine::SizingEngine;
pub use crate::core::sizing::{
    compute_current, compute_voltage_drop, compute_voltage_drop_with_factor,
    select_suitable_cables, select_suitable_cables_with_limits,
};
pub use crate::domain::model::{CableSpec, LoadSpec, Phase, SizingLimits, SizingReport, SizingResult};
pub use crate::utils::error::{Result, SizingError};
