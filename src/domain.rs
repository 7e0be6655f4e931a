use serde::Serialize;

use crate::constants;

/// One parsed row of the income table, at country, municipality or
/// neighborhood granularity. The `code` is unique within its level for a
/// single run.
#[derive(Debug, Clone, Serialize)]
pub struct StatRecord {
    pub code: String,
    pub name: String,
    pub average_income: f64,
    pub pct_low_income: f64,
    pub pct_high_income: f64,
    /// Average cars per household; only present when the car-ownership table
    /// has a parseable row for this code.
    pub car_ownership: Option<f64>,
}

/// Geography levels that get their own geometry document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionLevel {
    Municipality,
    Neighborhood,
}

impl RegionLevel {
    /// Feature property carrying the administrative code at this level.
    pub fn code_property(self) -> &'static str {
        match self {
            RegionLevel::Municipality => constants::MUNICIPALITY_CODE_PROPERTY,
            RegionLevel::Neighborhood => constants::NEIGHBORHOOD_CODE_PROPERTY,
        }
    }

    /// Dutch label used in diagnostics and the run summary.
    pub fn label(self) -> &'static str {
        match self {
            RegionLevel::Municipality => "gemeenten",
            RegionLevel::Neighborhood => "wijken",
        }
    }
}
