use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::RegionLevel;
use crate::error::{EnrichError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub tables: TablesConfig,
    pub geometry: GeometryConfig,
}

/// Statistical-table input paths. The layouts themselves are fixed properties
/// of the CBS exports and are not configurable.
#[derive(Debug, Deserialize)]
pub struct TablesConfig {
    pub income: PathBuf,
    pub car_ownership_municipalities: PathBuf,
    pub car_ownership_neighborhoods: PathBuf,
}

/// Plain (pre-enrichment) geometry documents per geography level. Enriched
/// output lands next to these with the variant suffix.
#[derive(Debug, Deserialize)]
pub struct GeometryConfig {
    pub municipalities: PathBuf,
    pub neighborhoods: PathBuf,
}

impl GeometryConfig {
    pub fn path(&self, level: RegionLevel) -> &Path {
        match level {
            RegionLevel::Municipality => &self.municipalities,
            RegionLevel::Neighborhood => &self.neighborhoods,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EnrichError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[tables]
income = "data/kvk2020-wb2023.csv"
car_ownership_municipalities = "data/gem-autobezit-huishouden_2023_gem.csv"
car_ownership_neighborhoods = "data/gem-autobezit-huishouden_2023_wijk.csv"

[geometry]
municipalities = "intermediate/gemeenten_2023.geo.json"
neighborhoods = "intermediate/cbs_wijken_2023.geo.json"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.tables.income, PathBuf::from("data/kvk2020-wb2023.csv"));
        assert_eq!(
            config.geometry.path(RegionLevel::Neighborhood),
            Path::new("intermediate/cbs_wijken_2023.geo.json")
        );
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err = Config::load(Path::new("does-not-exist.toml")).unwrap_err();
        assert!(matches!(err, EnrichError::Config(_)));
    }
}
