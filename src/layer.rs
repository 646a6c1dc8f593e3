//! Geometry layers for one administrative level (state or county), plus the
//! visit join that enriches them.

use std::sync::Arc;

use anyhow::{Result, ensure};
use chrono::NaiveDate;
use geo::MultiPolygon;

use crate::types::{GeoId, GeoType};
use crate::visit::{StateVisitSummary, VisitLog, placeholder_date};

/// A single state or county row: identity plus visit status.
/// Geometry lives in the parallel `Layer::geoms` store.
#[derive(Debug, Clone)]
pub struct Entity {
    pub geo_id: GeoId,
    pub name: Arc<str>,             // Common name, e.g. "Alameda County"
    pub state_name: Arc<str>,       // Filled by the visit join (county level)
    pub statefp: GeoId,             // Containing state
    pub visited: bool,
    pub date: NaiveDate,
}

impl Entity {
    pub fn new(geo_id: GeoId, name: Arc<str>) -> Self {
        let statefp = geo_id.to_state();
        Self {
            geo_id,
            name,
            state_name: Arc::from(""),
            statefp,
            visited: false,
            date: placeholder_date(),
        }
    }
}

/// What to do with visit records whose GEOID matches no geometry row.
/// The join drops them either way; `WarnUnmatched` surfaces them first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    #[default]
    DropUnmatched,
    WarnUnmatched,
}

/// Outcome of a visit join.
#[derive(Debug, Clone, Default)]
pub struct JoinReport {
    pub matched: usize,
    pub unmatched: Vec<GeoId>, // Visit records with no geometry row
}

/// One planar layer of the map: entities with a parallel geometry store,
/// indexed identically. Geometries are immutable value objects; every
/// transformation produces a new layer.
#[derive(Debug, Clone)]
pub struct Layer {
    pub ty: GeoType,
    pub entities: Vec<Entity>,
    pub geoms: Vec<MultiPolygon<f64>>,
}

impl Layer {
    pub fn new(ty: GeoType, entities: Vec<Entity>, geoms: Vec<MultiPolygon<f64>>) -> Result<Self> {
        ensure!(
            entities.len() == geoms.len(),
            "layer {}: {} entities but {} geometries",
            ty.to_str(),
            entities.len(),
            geoms.len(),
        );
        Ok(Self { ty, entities, geoms })
    }

    #[inline] pub fn len(&self) -> usize { self.entities.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entities.is_empty() }

    pub fn rows(&self) -> impl Iterator<Item = (&Entity, &MultiPolygon<f64>)> {
        self.entities.iter().zip(self.geoms.iter())
    }

    /// Non-destructive row subset preserving order.
    pub fn filter(&self, mut predicate: impl FnMut(&Entity) -> bool) -> Layer {
        let (entities, geoms) = self.rows()
            .filter(|(entity, _)| predicate(entity))
            .map(|(entity, geom)| (entity.clone(), geom.clone()))
            .unzip();

        Layer { ty: self.ty, entities, geoms }
    }

    /// Same entities over replacement geometries (CRS change, re-centering).
    pub fn with_geoms(&self, geoms: Vec<MultiPolygon<f64>>) -> Result<Layer> {
        Self::new(self.ty, self.entities.clone(), geoms)
    }

    /// Left-joins county visit status onto this layer by GEOID.
    ///
    /// Explicit two-step join: matched rows take the record's visited/date,
    /// then every unmatched geometry row is filled with visited=false and the
    /// placeholder date. Visit records with no geometry row are dropped, per
    /// `policy` with or without a warning; they are always listed in the
    /// returned report.
    pub fn join_visits(&self, log: &VisitLog, policy: JoinPolicy) -> Result<(Layer, JoinReport)> {
        ensure!(
            self.ty == GeoType::County,
            "visit log joins at county level, not {}",
            self.ty.to_str(),
        );

        let mut index = log.by_geoid()?;
        let mut joined = self.clone();
        let mut report = JoinReport::default();

        for entity in &mut joined.entities {
            match index.remove(&entity.geo_id) {
                Some(record) => {
                    entity.visited = record.visited;
                    entity.date = record.date;
                    entity.state_name = record.state_name.clone();
                    report.matched += 1;
                }
                None => {
                    // Fill step: absent from the log means not visited.
                    entity.visited = false;
                    entity.date = placeholder_date();
                }
            }
        }

        report.unmatched = index.into_keys().collect();
        report.unmatched.sort_by(|a, b| a.id.cmp(&b.id));

        if policy == JoinPolicy::WarnUnmatched {
            for geo_id in &report.unmatched {
                log::warn!("visit record {geo_id} has no matching {} geometry", self.ty.to_str());
            }
        }

        Ok((joined, report))
    }

    /// Left-joins state-level summaries onto this layer by state GEOID.
    pub fn join_state_summaries(&self, summaries: &[StateVisitSummary]) -> Result<Layer> {
        ensure!(
            self.ty == GeoType::State,
            "state summaries join at state level, not {}",
            self.ty.to_str(),
        );

        let index: std::collections::HashMap<&GeoId, &StateVisitSummary> =
            summaries.iter().map(|s| (&s.geo_id, s)).collect();

        let mut joined = self.clone();
        for entity in &mut joined.entities {
            match index.get(&entity.geo_id) {
                Some(summary) => {
                    entity.visited = summary.visited;
                    entity.date = summary.date;
                    entity.state_name = summary.state_name.clone();
                }
                None => {
                    entity.visited = false;
                    entity.date = placeholder_date();
                }
            }
        }

        Ok(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::{VisitRecord, is_visited, parse_visit_date};

    fn square(x0: f64, y0: f64) -> MultiPolygon<f64> {
        use geo::{Coord, LineString, Polygon};
        let ring = LineString(vec![
            Coord { x: x0, y: y0 },
            Coord { x: x0 + 1.0, y: y0 },
            Coord { x: x0 + 1.0, y: y0 + 1.0 },
            Coord { x: x0, y: y0 + 1.0 },
            Coord { x: x0, y: y0 },
        ]);
        MultiPolygon(vec![Polygon::new(ring, vec![])])
    }

    fn county_layer(ids: &[&str]) -> Layer {
        let entities = ids.iter()
            .map(|id| Entity::new(GeoId::new(GeoType::County, id), Arc::from("County")))
            .collect::<Vec<_>>();
        let geoms = ids.iter().enumerate().map(|(i, _)| square(i as f64, 0.0)).collect();
        Layer::new(GeoType::County, entities, geoms).unwrap()
    }

    fn visit(geoid: &str, date: &str) -> VisitRecord {
        let date = parse_visit_date(if date.is_empty() { None } else { Some(date) }).unwrap();
        VisitRecord {
            geo_id: GeoId::new(GeoType::County, geoid),
            state_name: Arc::from("California"),
            county_name: Arc::from("Alameda County"),
            visited: is_visited(date),
            date,
        }
    }

    #[test]
    fn join_fills_unmatched_geometry_rows_with_defaults() {
        let layer = county_layer(&["06001", "06003"]);
        let log = VisitLog { records: vec![visit("06001", "01/15/23")] };

        let (joined, report) = layer.join_visits(&log, JoinPolicy::DropUnmatched).unwrap();

        assert!(joined.entities[0].visited);
        assert!(!joined.entities[1].visited);
        assert_eq!(joined.entities[1].date, placeholder_date());
        assert_eq!(report.matched, 1);
        assert!(report.unmatched.is_empty());
    }

    #[test]
    fn join_reports_visit_records_without_geometry() {
        let layer = county_layer(&["06001"]);
        let log = VisitLog {
            records: vec![visit("06001", "01/15/23"), visit("99999", "02/01/23")],
        };

        let (_, report) = layer.join_visits(&log, JoinPolicy::WarnUnmatched).unwrap();
        assert_eq!(report.matched, 1);
        assert_eq!(report.unmatched.len(), 1);
        assert_eq!(report.unmatched[0].id(), "99999");
    }

    #[test]
    fn join_does_not_touch_geometry() {
        let layer = county_layer(&["06001"]);
        let log = VisitLog { records: vec![visit("06001", "01/15/23")] };

        let (joined, _) = layer.join_visits(&log, JoinPolicy::DropUnmatched).unwrap();
        assert_eq!(joined.geoms, layer.geoms);
    }

    #[test]
    fn filter_preserves_order_and_pairing() {
        let layer = county_layer(&["06001", "37183", "06003"]);
        let filtered = layer.filter(|e| e.statefp.id() == "06");

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.entities[0].geo_id.id(), "06001");
        assert_eq!(filtered.entities[1].geo_id.id(), "06003");
        assert_eq!(filtered.geoms[0], layer.geoms[0]);
        assert_eq!(filtered.geoms[1], layer.geoms[2]);
    }
}
