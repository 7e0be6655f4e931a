use geojson::{Feature, FeatureCollection};
use tracing::info;

use crate::constants::{
    AVERAGE_INCOME_PROPERTY, CAR_OWNERSHIP_PROPERTY, HIGH_INCOME_PROPERTY, LOW_INCOME_PROPERTY,
};
use crate::domain::{RegionLevel, StatRecord};
use crate::error::{EnrichError, Result};
use crate::geo;

/// Joins every statistical record onto the features carrying its code and
/// merges the statistical properties onto all of them. A record that matches
/// no non-water feature is a data-integrity violation: every statistical
/// entity must map to at least one polygon. Returns the number of features
/// touched.
pub fn enrich_features(
    collection: &mut FeatureCollection,
    records: &[StatRecord],
    level: RegionLevel,
) -> Result<usize> {
    let code_property = level.code_property();
    let mut enriched = 0usize;

    for record in records {
        let mut matched = false;
        for feature in collection.features.iter_mut() {
            if geo::is_water(feature) {
                continue;
            }
            if geo::property_str(feature, code_property) != Some(record.code.as_str()) {
                continue;
            }
            assign_properties(feature, record);
            matched = true;
            enriched += 1;
        }
        if !matched {
            return Err(EnrichError::FeatureNotFound {
                level: level.label(),
                name: record.name.clone(),
                code: record.code.clone(),
            });
        }
    }

    info!(
        "enriched {} {} features from {} records",
        enriched,
        level.label(),
        records.len()
    );
    Ok(enriched)
}

/// Writes the statistical properties onto one feature. Car ownership is
/// omitted entirely when the record has none.
fn assign_properties(feature: &mut Feature, record: &StatRecord) {
    feature.set_property(AVERAGE_INCOME_PROPERTY, record.average_income);
    feature.set_property(LOW_INCOME_PROPERTY, record.pct_low_income);
    feature.set_property(HIGH_INCOME_PROPERTY, record.pct_high_income);
    if let Some(value) = record.car_ownership {
        feature.set_property(CAR_OWNERSHIP_PROPERTY, value);
    }
}
