//! Census cartographic-boundary shapefile loading.

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result, anyhow, bail, ensure};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile::{Reader, Shape, dbase::{FieldValue, Record}};

use crate::layer::{Entity, Layer};
use crate::types::{GeoId, GeoType};

/// Reads a state or county boundary shapefile into a layer.
///
/// Attribute names are matched case-insensitively (cb_* files ship upper-case
/// column names). Visit fields start at their defaults; the join fills them.
pub fn read_boundaries(path: &Path, ty: GeoType) -> Result<Layer> {
    let mut reader = Reader::from_path(path)
        .with_context(|| format!("[io::shp] Failed to open shapefile: {}", path.display()))?;

    let mut entities = Vec::with_capacity(reader.shape_count()?);
    let mut geoms = Vec::with_capacity(entities.capacity());

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result.context("[io::shp] Error reading shape+record")?;

        let geo_id = GeoId::new(ty, &character_field(&record, "geoid")?);
        ensure!(
            geo_id.id().len() == ty.id_width(),
            "[io::shp] {} GEOID {:?} is not {} characters",
            ty.to_str(),
            geo_id.id(),
            ty.id_width(),
        );

        let mut entity = Entity::new(geo_id, Arc::from(character_field(&record, "name")?));
        if ty == GeoType::County {
            entity.statefp = GeoId::state(&character_field(&record, "statefp")?)?;
        }

        entities.push(entity);
        geoms.push(shape_to_multipolygon(shape)?);
    }

    Layer::new(ty, entities, geoms)
}

/// Case-insensitive character-field lookup on a dbase record.
fn character_field(record: &Record, name: &str) -> Result<String> {
    record.clone().into_iter()
        .find(|(field, _)| field.eq_ignore_ascii_case(name))
        .and_then(|(_, value)| match value {
            FieldValue::Character(Some(s)) => Some(s.trim().to_string()),
            _ => None,
        })
        .ok_or_else(|| anyhow!("[io::shp] missing or invalid character field: {name}"))
}

fn shape_to_multipolygon(shape: Shape) -> Result<MultiPolygon<f64>> {
    match shape {
        Shape::Polygon(p) => Ok(polygon_to_geo(&p)),
        Shape::NullShape => Ok(MultiPolygon(vec![])),
        other => bail!("[io::shp] unsupported shape type: {}", other.shapetype()),
    }
}

/// Convert a shapefile polygon to geo::MultiPolygon. Shapefiles store each
/// outer ring followed by its holes.
fn polygon_to_geo(p: &shapefile::Polygon) -> MultiPolygon<f64> {
    fn ring_coords(points: &[shapefile::Point]) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = points.iter()
            .map(|pt| Coord { x: pt.x, y: pt.y })
            .collect();
        // geo rings must be closed
        if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
            if first != last {
                coords.push(first);
            }
        }
        LineString(coords)
    }

    let mut polys: Vec<Polygon<f64>> = Vec::new();
    for ring in p.rings() {
        match ring {
            shapefile::PolygonRing::Outer(points) => {
                polys.push(Polygon::new(ring_coords(points), vec![]));
            }
            shapefile::PolygonRing::Inner(points) => {
                if let Some(poly) = polys.last_mut() {
                    poly.interiors_push(ring_coords(points));
                }
            }
        }
    }

    MultiPolygon(polys)
}
