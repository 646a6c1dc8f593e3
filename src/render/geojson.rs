//! Styled GeoJSON export for the interactive web map.
//!
//! Each feature carries its visit status, a ready-made style object keyed by
//! the visited flag, and (for counties) a tooltip, so the map page can render
//! without re-deriving any of the join logic.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use geo::MultiPolygon;
use serde_json::{Value, json};

use crate::layer::{Entity, Layer};
use crate::render::style::RenderConfig;
use crate::types::GeoType;

/// Writes county and state layers as a single styled FeatureCollection.
pub fn write_geojson(
    county: &Layer,
    state: &Layer,
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    let mut features = Vec::with_capacity(state.len() + county.len());
    // States first so county features sit on top when drawn in order.
    features.extend(layer_features(state, config)?);
    features.extend(layer_features(county, config)?);

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    let file = File::create(path)
        .with_context(|| format!("[render] Failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), &collection)
        .with_context(|| format!("[render] Failed to write GeoJSON to {}", path.display()))
}

fn layer_features(layer: &Layer, config: &RenderConfig) -> Result<Vec<Value>> {
    layer.rows()
        .map(|(entity, geom)| {
            let style = config.style_for(layer.ty, entity.visited);

            let mut properties = json!({
                "geoid": entity.geo_id.id(),
                "name": &*entity.name,
                "state_name": &*entity.state_name,
                "level": layer.ty.to_str(),
                "visited": entity.visited,
                "date": entity.date.format("%Y-%m-%d").to_string(),
                "style": serde_json::to_value(style)?,
            });
            if layer.ty == GeoType::County {
                properties["tooltip"] = Value::String(tooltip(entity));
            }

            Ok(json!({
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": multipolygon_coords(geom),
                },
                "properties": properties,
            }))
        })
        .collect()
}

/// Tooltip shown on county hover: "State / County / FIPS / Date Visited",
/// with the date blank when the county has not been visited.
fn tooltip(entity: &Entity) -> String {
    let date = if entity.visited {
        entity.date.format("%B %d, %Y").to_string()
    } else {
        String::new()
    };

    format!(
        "State: {}<br>County: {}<br>FIPS: {}<br>Date Visited: {}",
        entity.state_name, entity.name, entity.geo_id, date,
    )
}

fn multipolygon_coords(mp: &MultiPolygon<f64>) -> Value {
    let polygons: Vec<Value> = mp.0.iter()
        .map(|polygon| {
            let mut rings: Vec<Vec<Vec<f64>>> = Vec::with_capacity(1 + polygon.interiors().len());
            rings.push(polygon.exterior().coords().map(|c| vec![c.x, c.y]).collect());
            for interior in polygon.interiors() {
                rings.push(interior.coords().map(|c| vec![c.x, c.y]).collect());
            }
            json!(rings)
        })
        .collect();

    json!(polygons)
}
