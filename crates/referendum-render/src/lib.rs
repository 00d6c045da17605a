//! Choropleth map of referendum results per region.
//!
//! Region outlines come from a GeoJSON feature collection whose features
//! carry the region name in a `nom` property. Aggregated results are
//! left-joined onto the outlines by name, a `ratio` column
//! (`Choice A / (Choice A + Choice B)`) is derived, and a
//! [`ChoroplethRenderer`] draws the result. [`SvgRenderer`] writes a
//! standalone SVG document.

mod attach;
mod error;
mod geometry;
mod plot;
mod scale;
mod svg;

pub use attach::{attach_results, feature_ratios};
pub use error::{RenderError, Result};
pub use geometry::{
    Bounds, FEATURE_INDEX, Polygon, RegionGeometries, RegionShape, Ring, load_geometries,
    parse_geometries,
};
pub use plot::plot_referendum_map;
pub use scale::{ColorScale, Rgb};
pub use svg::{ChoroplethRenderer, SvgRenderer};
