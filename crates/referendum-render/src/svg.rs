//! SVG choropleth output.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use referendum_common::format_numeric;

use crate::attach::feature_ratios;
use crate::error::{RenderError, Result};
use crate::geometry::{Bounds, RegionGeometries, RegionShape};
use crate::scale::ColorScale;

const GRADIENT_ID: &str = "ratio-gradient";

/// A facility that draws region shapes coloured by ratio.
pub trait ChoroplethRenderer {
    /// Draws `geometries`, colouring each shape from the `ratio` column of
    /// `map` (as produced by [`crate::attach_results`]).
    fn render(&self, geometries: &RegionGeometries, map: &DataFrame) -> Result<()>;
}

/// Writes the choropleth as a standalone SVG file.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub output: PathBuf,
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub scale: ColorScale,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            width: 800.0,
            height: 640.0,
            title: Some("Choice A share of expressed votes".to_string()),
            scale: ColorScale::default(),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Renders the SVG document to a string.
    pub fn render_document(&self, geometries: &RegionGeometries, ratios: &[Option<f64>]) -> Result<String> {
        let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_document(&mut xml, geometries, ratios)
            .and_then(|()| Ok(String::from_utf8(xml.into_inner())?))
            .map_err(|e| RenderError::Write {
                path: self.output.clone(),
                message: format!("{e:#}"),
            })
    }

    fn write_document(
        &self,
        xml: &mut Writer<Vec<u8>>,
        geometries: &RegionGeometries,
        ratios: &[Option<f64>],
    ) -> anyhow::Result<()> {
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let width = format_numeric(self.width);
        let height = format_numeric(self.height);
        let view_box = format!("0 0 {width} {height}");
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        root.push_attribute(("width", width.as_str()));
        root.push_attribute(("height", height.as_str()));
        root.push_attribute(("viewBox", view_box.as_str()));
        xml.write_event(Event::Start(root))?;

        self.write_gradient(xml)?;

        if let Some(title) = &self.title {
            xml.write_event(Event::Start(BytesStart::new("title")))?;
            xml.write_event(Event::Text(BytesText::new(title)))?;
            xml.write_event(Event::End(BytesEnd::new("title")))?;
        }

        let projection = geometries
            .bounds()
            .map(|bounds| Projection::fit(bounds, self.map_area()));

        let mut regions = BytesStart::new("g");
        regions.push_attribute(("id", "regions"));
        regions.push_attribute(("stroke", "#ffffff"));
        regions.push_attribute(("stroke-width", "0.5"));
        xml.write_event(Event::Start(regions))?;
        if let Some(projection) = projection {
            for (idx, shape) in geometries.shapes.iter().enumerate() {
                let ratio = ratios.get(idx).copied().flatten();
                self.write_shape(xml, shape, ratio, &projection)?;
            }
        }
        xml.write_event(Event::End(BytesEnd::new("g")))?;

        self.write_legend(xml)?;

        xml.write_event(Event::End(BytesEnd::new("svg")))?;
        Ok(())
    }

    /// Drawing area left of the legend: `(x, y, width, height)`.
    fn map_area(&self) -> (f64, f64, f64, f64) {
        let margin = 20.0;
        let legend = 120.0;
        (
            margin,
            margin,
            (self.width - legend - 2.0 * margin).max(1.0),
            (self.height - 2.0 * margin).max(1.0),
        )
    }

    fn write_gradient(&self, xml: &mut Writer<Vec<u8>>) -> anyhow::Result<()> {
        xml.write_event(Event::Start(BytesStart::new("defs")))?;
        let mut gradient = BytesStart::new("linearGradient");
        gradient.push_attribute(("id", GRADIENT_ID));
        // bottom (0) to top (1)
        gradient.push_attribute(("x1", "0"));
        gradient.push_attribute(("y1", "1"));
        gradient.push_attribute(("x2", "0"));
        gradient.push_attribute(("y2", "0"));
        xml.write_event(Event::Start(gradient))?;
        for (position, color) in self.scale.stops() {
            let offset = format_numeric(*position);
            let color = color.hex();
            let mut stop = BytesStart::new("stop");
            stop.push_attribute(("offset", offset.as_str()));
            stop.push_attribute(("stop-color", color.as_str()));
            xml.write_event(Event::Empty(stop))?;
        }
        xml.write_event(Event::End(BytesEnd::new("linearGradient")))?;
        xml.write_event(Event::End(BytesEnd::new("defs")))?;
        Ok(())
    }

    fn write_shape(
        &self,
        xml: &mut Writer<Vec<u8>>,
        shape: &RegionShape,
        ratio: Option<f64>,
        projection: &Projection,
    ) -> anyhow::Result<()> {
        let d = path_data(shape, projection);
        if d.is_empty() {
            return Ok(());
        }

        let fill = self.scale.fill(ratio).hex();
        let mut path = BytesStart::new("path");
        path.push_attribute(("d", d.as_str()));
        path.push_attribute(("fill", fill.as_str()));
        path.push_attribute(("fill-rule", "evenodd"));
        path.push_attribute(("data-region", shape.name.as_str()));
        xml.write_event(Event::Start(path))?;

        let label = match ratio {
            Some(value) if value.is_finite() => format!("{}: {:.1}%", shape.name, value * 100.0),
            _ => format!("{}: no data", shape.name),
        };
        xml.write_event(Event::Start(BytesStart::new("title")))?;
        xml.write_event(Event::Text(BytesText::new(&label)))?;
        xml.write_event(Event::End(BytesEnd::new("title")))?;
        xml.write_event(Event::End(BytesEnd::new("path")))?;
        Ok(())
    }

    fn write_legend(&self, xml: &mut Writer<Vec<u8>>) -> anyhow::Result<()> {
        let bar_x = self.width - 90.0;
        let bar_y = 40.0;
        let bar_height = (self.height - 140.0).max(40.0);

        let mut legend = BytesStart::new("g");
        legend.push_attribute(("id", "legend"));
        legend.push_attribute(("font-family", "sans-serif"));
        legend.push_attribute(("font-size", "11"));
        xml.write_event(Event::Start(legend))?;

        write_text(xml, bar_x, bar_y - 12.0, "ratio")?;

        let x = format_numeric(bar_x);
        let y = format_numeric(bar_y);
        let h = format_numeric(bar_height);
        let fill = format!("url(#{GRADIENT_ID})");
        let mut bar = BytesStart::new("rect");
        bar.push_attribute(("x", x.as_str()));
        bar.push_attribute(("y", y.as_str()));
        bar.push_attribute(("width", "16"));
        bar.push_attribute(("height", h.as_str()));
        bar.push_attribute(("fill", fill.as_str()));
        bar.push_attribute(("stroke", "#333333"));
        xml.write_event(Event::Empty(bar))?;

        for tick in [0.0, 0.5, 1.0] {
            let tick_y = bar_y + bar_height * (1.0 - tick) + 4.0;
            write_text(xml, bar_x + 22.0, tick_y, &format_numeric(tick))?;
        }

        let swatch_y = bar_y + bar_height + 20.0;
        let sy = format_numeric(swatch_y);
        let missing = self.scale.missing().hex();
        let mut swatch = BytesStart::new("rect");
        swatch.push_attribute(("x", x.as_str()));
        swatch.push_attribute(("y", sy.as_str()));
        swatch.push_attribute(("width", "16"));
        swatch.push_attribute(("height", "12"));
        swatch.push_attribute(("fill", missing.as_str()));
        xml.write_event(Event::Empty(swatch))?;
        write_text(xml, bar_x + 22.0, swatch_y + 10.0, "no data")?;

        xml.write_event(Event::End(BytesEnd::new("g")))?;
        Ok(())
    }
}

/// SVG path data for every ring of `shape`: `M x,y L x,y ... Z` per ring.
fn path_data(shape: &RegionShape, projection: &Projection) -> String {
    shape
        .polygons
        .iter()
        .flat_map(|polygon| &polygon.rings)
        .filter(|ring| !ring.is_empty())
        .map(|ring| {
            let segments: Vec<String> = ring
                .iter()
                .enumerate()
                .map(|(idx, &point)| {
                    let (x, y) = projection.apply(point);
                    let command = if idx == 0 { 'M' } else { 'L' };
                    format!("{command}{x:.1},{y:.1}")
                })
                .collect();
            format!("{}Z", segments.join(""))
        })
        .collect()
}

fn write_text(xml: &mut Writer<Vec<u8>>, x: f64, y: f64, content: &str) -> anyhow::Result<()> {
    let x = format_numeric(x);
    let y = format_numeric(y);
    let mut text = BytesStart::new("text");
    text.push_attribute(("x", x.as_str()));
    text.push_attribute(("y", y.as_str()));
    xml.write_event(Event::Start(text))?;
    xml.write_event(Event::Text(BytesText::new(content)))?;
    xml.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

impl ChoroplethRenderer for SvgRenderer {
    fn render(&self, geometries: &RegionGeometries, map: &DataFrame) -> Result<()> {
        let ratios = feature_ratios(map, geometries.shapes.len())?;
        let document = self.render_document(geometries, &ratios)?;
        write_file(&self.output, &document)?;
        info!(path = %self.output.display(), shapes = geometries.shapes.len(), "map written");
        Ok(())
    }
}

fn write_file(path: &Path, document: &str) -> Result<()> {
    std::fs::write(path, document).map_err(|e| RenderError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Equirectangular projection of lon/lat onto a drawing area, y pointing down.
#[derive(Debug, Clone, Copy)]
struct Projection {
    bounds: Bounds,
    x_scale: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(bounds: Bounds, (x, y, width, height): (f64, f64, f64, f64)) -> Self {
        let mid_lat = ((bounds.min_y + bounds.max_y) / 2.0).to_radians();
        let x_scale = mid_lat.cos().abs().max(0.1);
        let span_x = ((bounds.max_x - bounds.min_x) * x_scale).max(f64::EPSILON);
        let span_y = (bounds.max_y - bounds.min_y).max(f64::EPSILON);
        let scale = (width / span_x).min(height / span_y);
        Self {
            bounds,
            x_scale,
            scale,
            offset_x: x + (width - span_x * scale) / 2.0,
            offset_y: y + (height - span_y * scale) / 2.0,
        }
    }

    fn apply(&self, (lon, lat): (f64, f64)) -> (f64, f64) {
        let x = self.offset_x + (lon - self.bounds.min_x) * self.x_scale * self.scale;
        let y = self.offset_y + (self.bounds.max_y - lat) * self.scale;
        (x, y)
    }
}
