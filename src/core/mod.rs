pub mod catalog;
pub mod engine;
pub mod sizing;

pub use crate::domain::model::{CableSpec, LoadSpec, Phase, SizingLimits, SizingReport, SizingResult};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
