use std::{fs::read_to_string, path::Path};

use anyhow::{bail, Context, Result};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{GeoJson, Value};
use tracing::{debug, warn};

use super::Region;

/// Reads labelled boundaries from a GeoJSON FeatureCollection file.
pub fn load(path: &Path, label_property: &str) -> Result<Vec<Region>> {
    let text = read_to_string(path)
        .with_context(|| format!("failed to read boundaries from {}", path.display()))?;
    parse(&text, label_property)
        .with_context(|| format!("invalid boundaries in {}", path.display()))
}

pub fn parse(text: &str, label_property: &str) -> Result<Vec<Region>> {
    let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>()? else {
        bail!("expected a FeatureCollection");
    };

    let mut regions = Vec::new();
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(label) = feature
            .property(label_property)
            .and_then(|x| x.as_str())
            .map(str::to_string)
        else {
            warn!(index, label_property, "feature has no label, skipping");
            continue;
        };

        let shape = match feature.geometry.map(|x| x.value) {
            Some(Value::Polygon(rings)) => MultiPolygon::new(vec![polygon(&rings)?]),
            Some(Value::MultiPolygon(polygons)) => MultiPolygon::new(
                polygons
                    .iter()
                    .map(|x| polygon(x))
                    .collect::<Result<_>>()
                    .with_context(|| format!("bad geometry for {label}"))?,
            ),
            _ => {
                warn!(index, %label, "feature is not a polygon, skipping");
                continue;
            }
        };

        debug!(%label, parts = shape.0.len(), "loaded region");
        regions.push(Region::new(label, shape));
    }

    Ok(regions)
}

fn polygon(rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|x| ring(x));
    let exterior = rings.next().context("polygon has no rings")??;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

// positions are [longitude, latitude, ...]
fn ring(positions: &[Vec<f64>]) -> Result<LineString<f64>> {
    let mut coords = Vec::with_capacity(positions.len());
    for position in positions {
        match position.as_slice() {
            [x, y, ..] => coords.push(Coord { x: *x, y: *y }),
            _ => bail!("position needs at least two values"),
        }
    }
    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "adm_nm": "서울특별시 노원구 월계1동" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[127.0, 37.6], [127.1, 37.6], [127.1, 37.7], [127.0, 37.7], [127.0, 37.6]],
                        [[127.04, 37.64], [127.06, 37.64], [127.06, 37.66], [127.04, 37.66], [127.04, 37.64]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "adm_nm": "서울특별시 강서구 공항동" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[126.7, 37.5], [126.8, 37.5], [126.8, 37.6], [126.7, 37.5]]],
                        [[[126.9, 37.5], [127.0, 37.5], [127.0, 37.6], [126.9, 37.5]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "adm_nm": "서울특별시 중구 명동" },
                "geometry": { "type": "Point", "coordinates": [126.98, 37.56] }
            },
            {
                "type": "Feature",
                "properties": { "name": "unlabelled" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            }
        ]
    }"#;

    #[test]
    fn parse_feature_collection() {
        let regions = parse(COLLECTION, "adm_nm").unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].label(), "서울특별시 노원구 월계1동");
        assert_eq!(regions[1].neighborhood(), "공항동");
    }

    #[test]
    fn interiors_are_kept() {
        let regions = parse(COLLECTION, "adm_nm").unwrap();
        assert!(regions[0].contains(&Point::new(127.01, 37.61)));
        assert!(!regions[0].contains(&Point::new(127.05, 37.65)));
    }

    #[test]
    fn other_label_property() {
        let regions = parse(COLLECTION, "name").unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].label(), "unlabelled");
    }

    #[test]
    fn rejects_non_collection() {
        assert!(parse(r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#, "adm_nm").is_err());
        assert!(parse("not json", "adm_nm").is_err());
    }
}
