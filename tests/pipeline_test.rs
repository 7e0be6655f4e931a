use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use geojson::FeatureCollection;
use serde_json::json;
use tempfile::TempDir;

use cbs_enricher::config::Config;
use cbs_enricher::error::EnrichError;
use cbs_enricher::pipeline::{self, Variant};

struct Workspace {
    dir: TempDir,
    config: Config,
}

impl Workspace {
    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Builds a miniature version of the real inputs: the three CBS exports and
/// the two boundary documents.
fn setup() -> Result<Workspace> {
    let dir = TempDir::new()?;

    let mut income = vec!["Inkomen per gemeente en wijk, 2020".to_string()];
    income.extend((1..13).map(|_| String::new()));
    income.extend(
        [
            "Nederland;;Nederland;29,8;38,5;21,3",
            "GM0034;;Almere;32,1;41,2;15,9",
            ";WK003400;Almere Stad;31,9;42,0;14,8",
            "GM0035;;Lelystad;30,6;44,3;12,7",
            ";WK003500;Lelystad Centrum;28,1;47,9;9,4",
            ";;;;;",
        ]
        .map(String::from),
    );
    fs::write(dir.path().join("inkomen.csv"), income.join("\r\n"))?;

    fs::write(
        dir.path().join("autobezit_gem.csv"),
        [
            "Autobezit per huishouden, 1 januari 2023",
            "",
            "Gemeentenaam;Gemeentecode;Gemiddeld autobezit",
            "Almere;GM0034;1,0",
            "Lelystad;GM0035;.",
            ";;",
        ]
        .join("\r\n"),
    )?;

    fs::write(
        dir.path().join("autobezit_wijk.csv"),
        [
            "Autobezit per huishouden, 1 januari 2023",
            "",
            " Wijknaam ;Wijkcode;Gemeentenaam;Gemeentecode;Gemiddeld autobezit;",
            "Almere Stad ; WK003400 ;Almere;GM0034;1,2;",
            ";;;;;",
        ]
        .join("\r\n"),
    )?;

    let gemeenten = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Polygon", "coordinates": [[[5.1, 52.3], [5.3, 52.3], [5.3, 52.4], [5.1, 52.3]]]},
                "properties": {"gemeentecode": "GM0034", "gemeentenaam": "Almere"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"gemeentecode": "GM0034", "water": "JA"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"gemeentecode": "GM0034", "gemeentenaam": "Almere"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"gemeentecode": "GM0035", "gemeentenaam": "Lelystad"}
            }
        ]
    });
    fs::write(
        dir.path().join("gemeenten_2023.geo.json"),
        serde_json::to_string(&gemeenten)?,
    )?;

    let wijken = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"wijkcode": "WK003400", "wijknaam": "Almere Stad"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"wijkcode": "WK003500", "wijknaam": "Lelystad Centrum"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"wijkcode": "WK003500", "water": "JA"}
            }
        ]
    });
    fs::write(
        dir.path().join("cbs_wijken_2023.geo.json"),
        serde_json::to_string(&wijken)?,
    )?;

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[tables]
income = "{base}/inkomen.csv"
car_ownership_municipalities = "{base}/autobezit_gem.csv"
car_ownership_neighborhoods = "{base}/autobezit_wijk.csv"

[geometry]
municipalities = "{base}/gemeenten_2023.geo.json"
neighborhoods = "{base}/cbs_wijken_2023.geo.json"
"#,
            base = dir.path().display()
        ),
    )?;

    let config = Config::load(&config_path)?;
    Ok(Workspace { dir, config })
}

fn load(path: &PathBuf) -> Result<FeatureCollection> {
    Ok(fs::read_to_string(path)?.parse::<FeatureCollection>()?)
}

fn features_by<'a>(
    collection: &'a FeatureCollection,
    key: &str,
    code: &str,
) -> Vec<&'a geojson::Feature> {
    collection
        .features
        .iter()
        .filter(|f| f.property(key).and_then(|v| v.as_str()) == Some(code))
        .collect()
}

#[test]
fn test_extra_variant_enriches_both_levels() -> Result<()> {
    let ws = setup()?;

    let processed = pipeline::run(&ws.config, Variant::Extra)?;
    assert_eq!(processed, vec!["gemeenten", "wijken"]);

    let gemeenten = load(&ws.path("gemeenten_2023_extra.geo.json"))?;

    // both land polygons of the split municipality are enriched identically
    let almere = features_by(&gemeenten, "gemeentecode", "GM0034");
    assert_eq!(almere.len(), 3);
    for feature in almere
        .iter()
        .filter(|f| f.property("water").is_none())
    {
        assert_eq!(
            feature.property("gemiddeld_inkomen_2020"),
            Some(&json!(32.1))
        );
        assert_eq!(
            feature.property("percentage_laaginkomen_2020"),
            Some(&json!(41.2))
        );
        assert_eq!(
            feature.property("percentage_hooginkomen_2020"),
            Some(&json!(15.9))
        );
        assert_eq!(feature.property("autobezit_huishouden"), Some(&json!(1.0)));
    }

    // the water polygon is untouched
    let water = almere
        .iter()
        .find(|f| f.property("water").is_some())
        .unwrap();
    assert!(water.property("gemiddeld_inkomen_2020").is_none());

    // the `.` placeholder in the car-ownership table means the property is
    // omitted, not written as null or zero
    let lelystad = features_by(&gemeenten, "gemeentecode", "GM0035");
    assert_eq!(
        lelystad[0].property("gemiddeld_inkomen_2020"),
        Some(&json!(30.6))
    );
    assert!(lelystad[0].property("autobezit_huishouden").is_none());

    let wijken = load(&ws.path("cbs_wijken_2023_extra.geo.json"))?;
    let almere_stad = features_by(&wijken, "wijkcode", "WK003400");
    assert_eq!(
        almere_stad[0].property("gemiddeld_inkomen_2020"),
        Some(&json!(31.9))
    );
    assert_eq!(
        almere_stad[0].property("autobezit_huishouden"),
        Some(&json!(1.2))
    );

    // no car-ownership row at all for this wijk
    let centrum = features_by(&wijken, "wijkcode", "WK003500");
    let land = centrum
        .iter()
        .find(|f| f.property("water").is_none())
        .unwrap();
    assert_eq!(land.property("gemiddeld_inkomen_2020"), Some(&json!(28.1)));
    assert!(land.property("autobezit_huishouden").is_none());

    Ok(())
}

#[test]
fn test_income_variant_never_adds_car_ownership() -> Result<()> {
    let ws = setup()?;

    let processed = pipeline::run(&ws.config, Variant::Income)?;
    assert_eq!(processed, vec!["gemeenten", "wijken"]);

    let gemeenten = load(&ws.path("gemeenten_2023_inkomen.geo.json"))?;
    for feature in &gemeenten.features {
        assert!(feature.property("autobezit_huishouden").is_none());
    }
    let almere = features_by(&gemeenten, "gemeentecode", "GM0034");
    let land = almere
        .iter()
        .find(|f| f.property("water").is_none())
        .unwrap();
    assert_eq!(land.property("gemiddeld_inkomen_2020"), Some(&json!(32.1)));

    Ok(())
}

#[test]
fn test_second_run_is_a_no_op() -> Result<()> {
    let ws = setup()?;

    let processed = pipeline::run(&ws.config, Variant::Extra)?;
    assert_eq!(processed.len(), 2);
    let first = fs::read_to_string(ws.path("gemeenten_2023_extra.geo.json"))?;

    let processed = pipeline::run(&ws.config, Variant::Extra)?;
    assert!(processed.is_empty());
    let second = fs::read_to_string(ws.path("gemeenten_2023_extra.geo.json"))?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_levels_without_input_geometry_are_skipped() -> Result<()> {
    let ws = setup()?;
    fs::remove_file(ws.path("cbs_wijken_2023.geo.json"))?;

    let processed = pipeline::run(&ws.config, Variant::Extra)?;
    assert_eq!(processed, vec!["gemeenten"]);
    assert!(!ws.path("cbs_wijken_2023_extra.geo.json").exists());

    Ok(())
}

#[test]
fn test_record_with_only_water_features_aborts() -> Result<()> {
    let ws = setup()?;

    // strip the land polygon of WK003500, leaving only its water feature
    let wijken = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"wijkcode": "WK003400", "wijknaam": "Almere Stad"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"wijkcode": "WK003500", "water": "JA"}
            }
        ]
    });
    fs::write(
        ws.path("cbs_wijken_2023.geo.json"),
        serde_json::to_string(&wijken)?,
    )?;

    let err = pipeline::run(&ws.config, Variant::Extra).unwrap_err();
    match err {
        EnrichError::FeatureNotFound { level, name, code } => {
            assert_eq!(level, "wijken");
            assert_eq!(name, "Lelystad Centrum");
            assert_eq!(code, "WK003500");
        }
        other => panic!("unexpected error: {other}"),
    }

    // no output was written for the failed level
    assert!(!ws.path("cbs_wijken_2023_extra.geo.json").exists());

    Ok(())
}
