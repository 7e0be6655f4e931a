use std::fs;
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, GeoJson};
use tracing::info;

use crate::constants::{WATER_FLAG, WATER_PROPERTY};
use crate::error::{EnrichError, Result};

/// Loads a whole feature collection into memory. The documents are a few
/// hundred megabytes at most, so no streaming.
pub fn load_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let raw = fs::read_to_string(path).map_err(|source| EnrichError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = raw
        .parse::<FeatureCollection>()
        .map_err(|source| EnrichError::GeoJson {
            path: path.to_path_buf(),
            source,
        })?;
    info!("{}: {} features", path.display(), collection.features.len());
    Ok(collection)
}

/// Serializes the whole document in one write.
pub fn write_feature_collection(path: &Path, collection: FeatureCollection) -> Result<()> {
    let document = GeoJson::from(collection).to_string();
    fs::write(path, document).map_err(|source| EnrichError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// String-typed property access; non-string values count as absent.
pub fn property_str<'a>(feature: &'a Feature, key: &str) -> Option<&'a str> {
    feature.property(key).and_then(|value| value.as_str())
}

/// Water-only features carry no socioeconomic meaning and are excluded from
/// matching.
pub fn is_water(feature: &Feature) -> bool {
    property_str(feature, WATER_PROPERTY) == Some(WATER_FLAG)
}

/// Derives the enriched output path next to the input: `x.geo.json` becomes
/// `x<suffix>.geo.json`.
pub fn enriched_path(input: &Path, suffix: &str) -> PathBuf {
    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let enriched = match name.strip_suffix(".geo.json") {
        Some(stem) => format!("{stem}{suffix}.geo.json"),
        None => match name.rsplit_once('.') {
            Some((stem, extension)) => format!("{stem}{suffix}.{extension}"),
            None => format!("{name}{suffix}"),
        },
    };
    input.with_file_name(enriched)
}
