/// Property and marker constants to ensure consistency across the codebase.
/// The Dutch names are fixed by the CBS exports and the wijk- en buurtkaart
/// GeoJSON conversion; they are the external contract of this tool.
// Geometry property keys (wijk- en buurtkaart export)
pub const MUNICIPALITY_CODE_PROPERTY: &str = "gemeentecode";
pub const NEIGHBORHOOD_CODE_PROPERTY: &str = "wijkcode";
pub const WATER_PROPERTY: &str = "water";
pub const WATER_FLAG: &str = "JA";

// Enriched property keys; the income figures are 2020 vintage attached to
// 2023 vintage geometry
pub const AVERAGE_INCOME_PROPERTY: &str = "gemiddeld_inkomen_2020";
pub const LOW_INCOME_PROPERTY: &str = "percentage_laaginkomen_2020";
pub const HIGH_INCOME_PROPERTY: &str = "percentage_hooginkomen_2020";
pub const CAR_OWNERSHIP_PROPERTY: &str = "autobezit_huishouden";

// Header markers of the statistical exports
pub const COUNTRY_MARKER: &str = "Nederland";
pub const MUNICIPALITY_CAR_MARKER: &str = "Gemeentenaam";
pub const NEIGHBORHOOD_CAR_MARKER: &str = "Wijknaam";

// Output file suffixes per pipeline variant
pub const INCOME_SUFFIX: &str = "_inkomen";
pub const EXTRA_SUFFIX: &str = "_extra";
