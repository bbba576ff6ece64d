use crate::domain::model::{CableSpec, LoadSpec, SizingLimits};

/// Source of the inputs for a sizing run (CLI flags, a TOML file, or both layered).
pub trait ConfigProvider: Send + Sync {
    fn load_spec(&self) -> LoadSpec;
    fn limits(&self) -> SizingLimits;

    /// Replacement catalog rows; `None` means the built-in copper table.
    fn custom_cables(&self) -> Option<&[CableSpec]> {
        None
    }
}
