use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::constants::{EXTRA_SUFFIX, INCOME_SUFFIX};
use crate::domain::RegionLevel;
use crate::enrich;
use crate::error::Result;
use crate::geo;
use crate::tables::car_ownership::{
    attach_car_ownership, MUNICIPALITY_CAR_LAYOUT, NEIGHBORHOOD_CAR_LAYOUT,
};
use crate::tables::income::parse_income_table;
use crate::tables::read_lines;

/// Which statistical tables a run ingests and which output suffix it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Income table only.
    Income,
    /// Income plus the two car-ownership tables.
    Extra,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Income => "inkomen",
            Variant::Extra => "extra",
        }
    }

    pub fn output_suffix(self) -> &'static str {
        match self {
            Variant::Income => INCOME_SUFFIX,
            Variant::Extra => EXTRA_SUFFIX,
        }
    }
}

/// Runs the whole pipeline for one variant: parse and validate the tables,
/// then join and merge per geography level, writing each enriched document
/// only when it does not exist yet. Returns the labels of the levels that
/// were processed; an empty list means every level was already up to date.
#[instrument(skip(config))]
pub fn run(config: &Config, variant: Variant) -> Result<Vec<&'static str>> {
    let income_file = config.tables.income.display().to_string();
    let income_lines = read_lines(&config.tables.income)?;
    info!("{}: {} lines", income_file, income_lines.len());
    let mut table = parse_income_table(&income_file, &income_lines)?;

    if variant == Variant::Extra {
        let file = config.tables.car_ownership_municipalities.display().to_string();
        let lines = read_lines(&config.tables.car_ownership_municipalities)?;
        info!("{}: {} lines", file, lines.len());
        attach_car_ownership(
            &MUNICIPALITY_CAR_LAYOUT,
            &file,
            &lines,
            table.records_mut(RegionLevel::Municipality),
        )?;

        let file = config.tables.car_ownership_neighborhoods.display().to_string();
        let lines = read_lines(&config.tables.car_ownership_neighborhoods)?;
        info!("{}: {} lines", file, lines.len());
        attach_car_ownership(
            &NEIGHBORHOOD_CAR_LAYOUT,
            &file,
            &lines,
            table.records_mut(RegionLevel::Neighborhood),
        )?;
    }

    let mut processed = Vec::new();
    for level in [RegionLevel::Municipality, RegionLevel::Neighborhood] {
        let input = config.geometry.path(level);
        let output = geo::enriched_path(input, variant.output_suffix());
        if output.exists() {
            debug!("{} already exists, skipping {}", output.display(), level.label());
            continue;
        }
        if !input.exists() {
            debug!("{} does not exist, skipping {}", input.display(), level.label());
            continue;
        }

        let mut collection = geo::load_feature_collection(input)?;
        enrich::enrich_features(&mut collection, table.records(level), level)?;
        geo::write_feature_collection(&output, collection)?;
        info!("wrote {}", output.display());
        processed.push(level.label());
    }

    Ok(processed)
}
