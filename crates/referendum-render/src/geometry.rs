//! Region geometries read from a GeoJSON feature collection.

use std::path::Path;

use polars::prelude::{DataFrame, NamedFrom, PolarsResult, Series};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use referendum_model::GEOMETRY_NAME;

use crate::error::{RenderError, Result};

/// Column holding a shape's position in [`RegionGeometries::shapes`].
pub const FEATURE_INDEX: &str = "feature";

/// Closed ring of `(longitude, latitude)` positions.
pub type Ring = Vec<(f64, f64)>;

/// One polygon: an exterior ring followed by its holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub rings: Vec<Ring>,
}

/// The drawable outline of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    /// Region name, from the `nom` property.
    pub name: String,
    pub polygons: Vec<Polygon>,
}

/// Axis-aligned extent of a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn include(&mut self, (x, y): (f64, f64)) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

/// Region shapes in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionGeometries {
    pub shapes: Vec<RegionShape>,
}

impl RegionGeometries {
    /// Frame of `{nom, feature}` with one row per shape, used as the
    /// authoritative side of the results join.
    pub fn names_frame(&self) -> PolarsResult<DataFrame> {
        let names: Vec<&str> = self.shapes.iter().map(|shape| shape.name.as_str()).collect();
        let indices: Vec<u32> = (0..self.shapes.len() as u32).collect();
        DataFrame::new(vec![
            Series::new(GEOMETRY_NAME.into(), names).into(),
            Series::new(FEATURE_INDEX.into(), indices).into(),
        ])
    }

    /// Extent of every position of every shape; `None` when there are none.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self
            .shapes
            .iter()
            .flat_map(|shape| &shape.polygons)
            .flat_map(|polygon| &polygon.rings)
            .flatten()
            .copied();
        let (x, y) = points.next()?;
        let mut bounds = Bounds {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        };
        for point in points {
            bounds.include(point);
        }
        Some(bounds)
    }
}

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

fn to_ring(feature: usize, positions: Vec<Vec<f64>>) -> Result<Ring> {
    positions
        .into_iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok((*x, *y)),
            _ => Err(RenderError::InvalidGeometry {
                feature,
                reason: format!("position with {} coordinates", position.len()),
            }),
        })
        .collect()
}

fn to_polygon(feature: usize, rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon> {
    let rings = rings
        .into_iter()
        .map(|ring| to_ring(feature, ring))
        .collect::<Result<Vec<_>>>()?;
    Ok(Polygon { rings })
}

/// Parses a GeoJSON feature collection.
///
/// Every feature must carry a string `nom` property. Polygon and
/// MultiPolygon geometries are kept; features with other or missing
/// geometry keep their name with no polygons, so they still take part in the
/// results join.
pub fn parse_geometries(json: &str, path: &Path) -> Result<RegionGeometries> {
    let collection: RawCollection =
        serde_json::from_str(json).map_err(|source| RenderError::GeoJson {
            path: path.to_path_buf(),
            source,
        })?;

    let mut shapes = Vec::with_capacity(collection.features.len());
    for (feature, raw) in collection.features.into_iter().enumerate() {
        let name = raw
            .properties
            .as_ref()
            .and_then(|props| props.get(GEOMETRY_NAME))
            .and_then(Value::as_str)
            .ok_or(RenderError::MissingProperty {
                feature,
                property: GEOMETRY_NAME,
            })?
            .to_string();

        let polygons = match raw.geometry {
            Some(RawGeometry::Polygon { coordinates }) => vec![to_polygon(feature, coordinates)?],
            Some(RawGeometry::MultiPolygon { coordinates }) => coordinates
                .into_iter()
                .map(|rings| to_polygon(feature, rings))
                .collect::<Result<Vec<_>>>()?,
            Some(RawGeometry::Unsupported) | None => {
                warn!(feature, region = %name, "feature has no drawable geometry");
                Vec::new()
            }
        };
        shapes.push(RegionShape { name, polygons });
    }

    debug!(path = %path.display(), shapes = shapes.len(), "geometries parsed");
    Ok(RegionGeometries { shapes })
}

/// Reads region geometries from a GeoJSON file.
pub fn load_geometries(path: &Path) -> Result<RegionGeometries> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RenderError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RenderError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_geometries(&json, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"code": "84", "nom": "Auvergne-Rhône-Alpes"},
                "geometry": {"type": "Polygon", "coordinates": [[[2.0, 45.0], [6.0, 45.0], [6.0, 46.5], [2.0, 45.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"code": "94", "nom": "Corse"},
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[8.5, 41.4], [9.5, 41.4], [9.4, 43.0], [8.5, 41.4]]],
                    [[[9.0, 42.0], [9.1, 42.0], [9.1, 42.1], [9.0, 42.0]]]
                ]}
            },
            {
                "type": "Feature",
                "properties": {"nom": "Point Region"},
                "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
            }
        ]
    }"#;

    #[test]
    fn test_parse_polygon_and_multipolygon() {
        let geometries = parse_geometries(SAMPLE, Path::new("sample.geojson")).unwrap();

        assert_eq!(geometries.shapes.len(), 3);
        assert_eq!(geometries.shapes[0].name, "Auvergne-Rhône-Alpes");
        assert_eq!(geometries.shapes[0].polygons.len(), 1);
        assert_eq!(geometries.shapes[1].polygons.len(), 2);
        assert!(geometries.shapes[2].polygons.is_empty());
    }

    #[test]
    fn test_bounds() {
        let geometries = parse_geometries(SAMPLE, Path::new("sample.geojson")).unwrap();
        let bounds = geometries.bounds().unwrap();

        assert_eq!(bounds.min_x, 2.0);
        assert_eq!(bounds.max_x, 9.5);
        assert_eq!(bounds.min_y, 41.4);
        assert_eq!(bounds.max_y, 46.5);
        assert!(RegionGeometries::default().bounds().is_none());
    }

    #[test]
    fn test_missing_name_property() {
        let json = r#"{"features": [{"properties": {"code": "84"}, "geometry": null}]}"#;
        let err = parse_geometries(json, Path::new("x.geojson")).unwrap_err();

        assert!(matches!(err, RenderError::MissingProperty { feature: 0, property: "nom" }));
    }

    #[test]
    fn test_short_position_rejected() {
        let json = r#"{"features": [{"properties": {"nom": "A"},
            "geometry": {"type": "Polygon", "coordinates": [[[1.0]]]}}]}"#;
        let err = parse_geometries(json, Path::new("x.geojson")).unwrap_err();

        assert!(matches!(err, RenderError::InvalidGeometry { feature: 0, .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_geometries("not json", Path::new("x.geojson")).unwrap_err();
        assert!(matches!(err, RenderError::GeoJson { .. }));
    }

    #[test]
    fn test_names_frame() {
        let geometries = parse_geometries(SAMPLE, Path::new("sample.geojson")).unwrap();
        let frame = geometries.names_frame().unwrap();

        assert_eq!(frame.height(), 3);
        assert!(frame.column("nom").is_ok());
        assert!(frame.column("feature").is_ok());
    }
}
