//! Integration tests for the map stage.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use polars::prelude::{DataFrame, df};
use tempfile::TempDir;

use referendum_render::{
    ChoroplethRenderer, RegionGeometries, RenderError, SvgRenderer, feature_ratios,
    plot_referendum_map,
};

const REGIONS_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"nom": "Bretagne"},
         "geometry": {"type": "Polygon", "coordinates": [[[-4.8, 47.3], [-1.0, 47.3], [-1.0, 48.9], [-4.8, 47.3]]]}},
        {"type": "Feature", "properties": {"nom": "Normandie"},
         "geometry": {"type": "Polygon", "coordinates": [[[-1.9, 48.2], [1.8, 48.2], [1.8, 50.0], [-1.9, 48.2]]]}}
    ]
}"#;

fn results() -> DataFrame {
    df!(
        "name_reg" => ["Bretagne"],
        "Registered" => [1000i64],
        "Abstentions" => [100i64],
        "Null" => [20i64],
        "Choice A" => [588i64],
        "Choice B" => [292i64],
    )
    .unwrap()
}

fn write_geometries(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("regions.geojson");
    fs::write(&path, REGIONS_GEOJSON).unwrap();
    path
}

#[derive(Default)]
struct Recording {
    ratios: RefCell<Vec<Option<f64>>>,
}

impl ChoroplethRenderer for Recording {
    fn render(
        &self,
        geometries: &RegionGeometries,
        map: &DataFrame,
    ) -> referendum_render::Result<()> {
        *self.ratios.borrow_mut() = feature_ratios(map, geometries.shapes.len())?;
        Ok(())
    }
}

#[test]
fn renderer_receives_ratio_per_geometry() {
    let dir = TempDir::new().unwrap();
    let path = write_geometries(&dir);
    let renderer = Recording::default();

    let map = plot_referendum_map(&path, &results(), &renderer).unwrap();

    assert_eq!(map.height(), 2);
    let ratios = renderer.ratios.borrow();
    assert!((ratios[0].unwrap() - 588.0 / 880.0).abs() < 1e-12);
    assert_eq!(ratios[1], None);
}

#[test]
fn svg_file_written() {
    let dir = TempDir::new().unwrap();
    let path = write_geometries(&dir);
    let output = dir.path().join("map.svg");

    plot_referendum_map(&path, &results(), &SvgRenderer::new(&output)).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("data-region=\"Bretagne\""));
    assert!(svg.contains("Normandie: no data"));
}

#[test]
fn missing_geometry_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.geojson");

    let err = plot_referendum_map(&missing, &results(), &Recording::default()).unwrap_err();

    assert!(matches!(err, RenderError::FileNotFound { ref path } if path == Path::new(&missing)));
}

#[test]
fn unwritable_output_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_geometries(&dir);
    let output = dir.path().join("no-such-dir").join("map.svg");

    let err = plot_referendum_map(&path, &results(), &SvgRenderer::new(output)).unwrap_err();

    assert!(matches!(err, RenderError::Write { .. }));
}
