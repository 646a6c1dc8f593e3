//! Static choropleth output: one SVG per region.

use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result, bail};
use geo::{BoundingRect, Coord, CoordsIter, LineString, MultiPolygon, Rect};

use crate::plot::PlotTable;
use crate::render::style::{RenderConfig, Style};
use crate::types::GeoType;

/// Lon/lat (or projected meters) -> SVG viewport coords.
type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

const MARGIN: f64 = 10.0;

/// Renders a region's plot table to an SVG file: county fills keyed by the
/// visited flag, state outlines drawn on top.
pub fn render_svg(table: &PlotTable, config: &RenderConfig, path: &Path) -> Result<()> {
    let Some(bounds) = combined_bounds(&table.county.geoms, &table.state.geoms) else {
        bail!("[render] region {:?} has no geometry to draw", table.label);
    };

    let dims = config.dimensions_for(&table.label);
    let scale = ((dims.width - 2.0 * MARGIN) / bounds.width())
        .min((dims.height - 2.0 * MARGIN) / bounds.height());

    // Flip y: SVG grows downward.
    let project = move |coord: &Coord<f64>| {
        let x = (coord.x - bounds.min().x) * scale + MARGIN;
        let y = (bounds.max().y - coord.y) * scale + MARGIN;
        (x, y)
    };

    let file = File::create(path)
        .with_context(|| format!("[render] Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(
        writer,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"##,
        width = dims.width,
        height = dims.height,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;

    for (entity, geom) in table.county.rows() {
        let style = config.style_for(GeoType::County, entity.visited);
        write_shape(&mut writer, geom, style, &project)?;
    }
    for (entity, geom) in table.state.rows() {
        let style = config.style_for(GeoType::State, entity.visited);
        write_shape(&mut writer, geom, style, &project)?;
    }

    writeln!(writer, "</svg>")?;
    writer.flush()?;
    Ok(())
}

fn write_shape(
    writer: &mut impl Write,
    geom: &MultiPolygon<f64>,
    style: &Style,
    project: &Projection,
) -> Result<()> {
    let d = multipolygon_to_path(geom, project);
    if d.is_empty() {
        return Ok(());
    }
    writeln!(
        writer,
        r#"<path d="{d}" fill="{fill}" stroke="{stroke}" stroke-width="{width}" opacity="{opacity}"/>"#,
        fill = style.fill,
        stroke = style.stroke,
        width = style.stroke_width,
        opacity = style.opacity,
    )?;
    Ok(())
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        ring_to_path(polygon.exterior(), project, &mut out);
        for interior in polygon.interiors() {
            ring_to_path(interior, project, &mut out);
        }
    }

    out
}

/// Append a ring as an SVG subpath: "M x,y L x,y ... Z"
fn ring_to_path(ring: &LineString<f64>, project: &Projection, out: &mut String) {
    let mut coords = ring.coords_iter().map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }
}

fn combined_bounds(
    counties: &[MultiPolygon<f64>],
    states: &[MultiPolygon<f64>],
) -> Option<Rect<f64>> {
    counties.iter().chain(states.iter())
        .filter_map(|geom| geom.bounding_rect())
        .reduce(|a, b| {
            Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}
