//! Reference table of copper cable sizes.
//!
//! Resistance and ampacity are kept as two ordered maps keyed by
//! cross-section and joined into a single ascending list of [`CableSpec`].
//! A cross-section present in only one of the maps is rejected.

use crate::domain::model::CableSpec;
use crate::utils::error::{Result, SizingError};
use crate::utils::validation::Validate;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub type SizeTable = BTreeMap<OrderedFloat<f64>, f64>;

/// Copper resistance in ohm per metre, by cross-section in mm².
pub const COPPER_RESISTANCE: [(f64, f64); 15] = [
    (1.5, 0.0121),
    (2.5, 0.00741),
    (4.0, 0.00461),
    (6.0, 0.00308),
    (10.0, 0.00183),
    (16.0, 0.00115),
    (25.0, 0.000727),
    (35.0, 0.000524),
    (50.0, 0.000387),
    (70.0, 0.000268),
    (95.0, 0.000193),
    (120.0, 0.000153),
    (150.0, 0.000124),
    (185.0, 0.0000991),
    (240.0, 0.0000754),
];

/// Conservative current-carrying capacity in amperes, by cross-section in mm².
pub const COPPER_AMPACITY: [(f64, f64); 15] = [
    (1.5, 14.0),
    (2.5, 20.0),
    (4.0, 26.0),
    (6.0, 34.0),
    (10.0, 46.0),
    (16.0, 61.0),
    (25.0, 83.0),
    (35.0, 105.0),
    (50.0, 130.0),
    (70.0, 165.0),
    (95.0, 200.0),
    (120.0, 230.0),
    (150.0, 265.0),
    (185.0, 300.0),
    (240.0, 360.0),
];

// Both copper tables list the same sizes in the same ascending order, with positive values.
const _: () = {
    let mut i = 0;
    while i < COPPER_RESISTANCE.len() {
        assert!(COPPER_RESISTANCE[i].0 == COPPER_AMPACITY[i].0);
        assert!(COPPER_RESISTANCE[i].1 > 0.0 && COPPER_AMPACITY[i].1 > 0.0);
        if i > 0 {
            assert!(COPPER_RESISTANCE[i - 1].0 < COPPER_RESISTANCE[i].0);
        }
        i += 1;
    }
};

static COPPER: OnceLock<CableCatalog> = OnceLock::new();

#[derive(Debug, Clone, PartialEq)]
pub struct CableCatalog {
    cables: Vec<CableSpec>,
}

impl CableCatalog {
    /// Built-in copper catalog, built on first use and shared for the life of the process.
    pub fn copper() -> &'static CableCatalog {
        COPPER.get_or_init(|| Self {
            cables: COPPER_RESISTANCE
                .iter()
                .zip(COPPER_AMPACITY.iter())
                .map(|(&(size, ohms), &(_, amps))| CableSpec::new(size, ohms, amps))
                .collect(),
        })
    }

    /// Joins a resistance table and an ampacity table on cross-section.
    pub fn from_tables(resistance: &SizeTable, ampacity: &SizeTable) -> Result<Self> {
        if let Some(orphan) = resistance.keys().find(|k| !ampacity.contains_key(*k)) {
            return Err(SizingError::catalog(format!(
                "{} mm^2 has a resistance but no ampacity",
                orphan
            )));
        }
        if let Some(orphan) = ampacity.keys().find(|k| !resistance.contains_key(*k)) {
            return Err(SizingError::catalog(format!(
                "{} mm^2 has an ampacity but no resistance",
                orphan
            )));
        }

        let cables = resistance
            .iter()
            .map(|(size, ohms)| CableSpec::new(size.into_inner(), *ohms, ampacity[size]))
            .collect();
        Self::checked(cables)
    }

    /// Builds a catalog from rows in any order. Duplicated cross-sections are rejected.
    pub fn from_specs(mut cables: Vec<CableSpec>) -> Result<Self> {
        cables.sort_by_key(|c| OrderedFloat(c.cross_section_mm2));
        if let Some(pair) = cables
            .windows(2)
            .find(|w| w[0].cross_section_mm2 == w[1].cross_section_mm2)
        {
            return Err(SizingError::catalog(format!(
                "{} mm^2 appears more than once",
                pair[0].cross_section_mm2
            )));
        }
        Self::checked(cables)
    }

    fn checked(cables: Vec<CableSpec>) -> Result<Self> {
        if cables.is_empty() {
            return Err(SizingError::catalog("catalog has no cables"));
        }
        for cable in &cables {
            cable.validate()?;
        }
        Ok(Self { cables })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CableSpec> {
        self.cables.iter()
    }

    pub fn as_slice(&self) -> &[CableSpec] {
        &self.cables
    }

    pub fn len(&self) -> usize {
        self.cables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
    }

    pub fn find(&self, cross_section_mm2: f64) -> Option<&CableSpec> {
        self.cables
            .iter()
            .find(|c| c.cross_section_mm2 == cross_section_mm2)
    }

    pub fn largest(&self) -> Option<&CableSpec> {
        self.cables.last()
    }
}

impl<'a> IntoIterator for &'a CableCatalog {
    type Item = &'a CableSpec;
    type IntoIter = std::slice::Iter<'a, CableSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.cables.iter()
    }
}

pub fn table_from_pairs(pairs: &[(f64, f64)]) -> SizeTable {
    pairs.iter().map(|&(k, v)| (OrderedFloat(k), v)).collect()
}
