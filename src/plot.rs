//! Regional plot tables: named subsets of the joined layers, each with its own
//! display adjustment (reprojection or antimeridian fold).

use anyhow::Result;

use crate::geom::{recenter, reproject};
use crate::layer::{Entity, Layer};

/// State FIPS codes outside the contiguous US (AK, HI and the territories).
pub const NON_CONTIGUOUS_CODES: &[&str] = &["02", "15", "60", "66", "69", "72", "78"];

/// Display projection for the contiguous-US panel.
pub const CONTIGUOUS_EPSG: u32 = 3082;

/// Fold meridian that renders the Aleutian chain contiguously. Empirically
/// chosen, so callers may override it per render.
pub const DEFAULT_ALASKA_MERIDIAN: f64 = 90.0;

const ALASKA: &str = "02";
const HAWAII: &str = "15";
const NORTH_CAROLINA: &str = "37";
const SOUTHEAST: &[&str] = &["13", "37", "45", "47", "51"];

/// Row filter for a region, applied to the containing-state code
/// (`statefp` for counties, the GEOID itself for states).
#[derive(Debug, Clone)]
pub enum Selector {
    ExcludeStates(Vec<String>),
    States(Vec<String>),
}

impl Selector {
    fn matches(&self, entity: &Entity) -> bool {
        let code = entity.statefp.id();
        match self {
            Selector::ExcludeStates(codes) => !codes.iter().any(|c| c == code),
            Selector::States(codes) => codes.iter().any(|c| c == code),
        }
    }
}

/// Geometric adjustment applied to a region after selection.
#[derive(Debug, Clone, Copy)]
pub enum Adjust {
    None,
    Epsg(u32),
    Meridian(f64),
}

#[derive(Debug, Clone)]
pub struct RegionSpec {
    pub label: String,
    pub selector: Selector,
    pub adjust: Adjust,
}

impl RegionSpec {
    pub fn new(label: &str, selector: Selector, adjust: Adjust) -> Self {
        Self { label: label.to_string(), selector, adjust }
    }
}

/// One region's render-ready pair of layers.
#[derive(Debug, Clone)]
pub struct PlotTable {
    pub label: String,
    pub county: Layer,
    pub state: Layer,
}

/// The region set the tracker plots: contiguous US (reprojected), Alaska
/// (meridian fold), Hawaii, North Carolina and the Southeast (default
/// projection as-is).
pub fn default_regions(
    non_contiguous: &[&str],
    epsg: u32,
    alaska_meridian: f64,
) -> Vec<RegionSpec> {
    let owned = |codes: &[&str]| codes.iter().map(|c| c.to_string()).collect::<Vec<_>>();

    vec![
        RegionSpec::new(
            "contiguous",
            Selector::ExcludeStates(owned(non_contiguous)),
            Adjust::Epsg(epsg),
        ),
        RegionSpec::new(
            "alaska",
            Selector::States(vec![ALASKA.to_string()]),
            Adjust::Meridian(alaska_meridian),
        ),
        RegionSpec::new("hawaii", Selector::States(vec![HAWAII.to_string()]), Adjust::None),
        RegionSpec::new(
            "north_carolina",
            Selector::States(vec![NORTH_CAROLINA.to_string()]),
            Adjust::None,
        ),
        RegionSpec::new("southeast", Selector::States(owned(SOUTHEAST)), Adjust::None),
    ]
}

/// Builds every region's plot table from the joined county/state layers.
/// Selections are read-only filters; each region is computed independently.
pub fn build_plot_tables(
    county: &Layer,
    state: &Layer,
    regions: &[RegionSpec],
) -> Result<Vec<PlotTable>> {
    regions.iter().map(|region| build_plot_table(county, state, region)).collect()
}

fn build_plot_table(county: &Layer, state: &Layer, region: &RegionSpec) -> Result<PlotTable> {
    let county = county.filter(|e| region.selector.matches(e));
    let state = state.filter(|e| region.selector.matches(e));

    let (county, state) = match region.adjust {
        Adjust::None => (county, state),
        Adjust::Epsg(epsg) => {
            let county_geoms = reproject(&county.geoms, epsg)?;
            let state_geoms = reproject(&state.geoms, epsg)?;
            (county.with_geoms(county_geoms)?, state.with_geoms(state_geoms)?)
        }
        Adjust::Meridian(meridian) => {
            let county_geoms = recenter(&county.geoms, meridian);
            let state_geoms = recenter(&state.geoms, meridian);
            (county.with_geoms(county_geoms)?, state.with_geoms(state_geoms)?)
        }
    };

    log::debug!(
        "region {}: {} counties, {} states",
        region.label,
        county.len(),
        state.len(),
    );

    Ok(PlotTable { label: region.label.clone(), county, state })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use geo::{Coord, LineString, MultiPolygon, Polygon};

    use super::*;
    use crate::types::{GeoId, GeoType};

    fn square(x0: f64, y0: f64) -> MultiPolygon<f64> {
        let ring = LineString(vec![
            Coord { x: x0, y: y0 },
            Coord { x: x0 + 1.0, y: y0 },
            Coord { x: x0 + 1.0, y: y0 + 1.0 },
            Coord { x: x0, y: y0 + 1.0 },
            Coord { x: x0, y: y0 },
        ]);
        MultiPolygon(vec![Polygon::new(ring, vec![])])
    }

    fn layer(ty: GeoType, ids: &[&str], lon0: f64) -> Layer {
        let entities = ids.iter()
            .map(|id| Entity::new(GeoId::new(ty, id), Arc::from("Entity")))
            .collect::<Vec<_>>();
        let geoms = ids.iter().enumerate()
            .map(|(i, _)| square(lon0 + 2.0 * i as f64, 30.0))
            .collect();
        Layer::new(ty, entities, geoms).unwrap()
    }

    fn sample_layers() -> (Layer, Layer) {
        // One county per state across CA, AK, HI, NC, GA.
        let county = layer(
            GeoType::County,
            &["06001", "02013", "15001", "37183", "13121"],
            -120.0,
        );
        let state = layer(GeoType::State, &["06", "02", "15", "37", "13"], -120.0);
        (county, state)
    }

    #[test]
    fn regions_partition_rows_as_configured() {
        let (county, state) = sample_layers();
        let regions = default_regions(NON_CONTIGUOUS_CODES, CONTIGUOUS_EPSG, 90.0);
        let tables = build_plot_tables(&county, &state, &regions).unwrap();

        let get = |label: &str| tables.iter().find(|t| t.label == label).unwrap();

        // CA, NC, GA in the contiguous panel; AK and HI excluded.
        assert_eq!(get("contiguous").county.len(), 3);
        assert_eq!(get("alaska").county.len(), 1);
        assert_eq!(get("alaska").county.entities[0].geo_id.id(), "02013");
        assert_eq!(get("hawaii").county.len(), 1);
        assert_eq!(get("north_carolina").state.len(), 1);
        // Southeast includes NC and GA from this sample.
        assert_eq!(get("southeast").county.len(), 2);
    }

    #[test]
    fn contiguous_and_single_state_regions_are_disjoint() {
        let (county, state) = sample_layers();
        let regions = default_regions(NON_CONTIGUOUS_CODES, CONTIGUOUS_EPSG, 90.0);
        let tables = build_plot_tables(&county, &state, &regions).unwrap();

        let contiguous = &tables[0];
        let alaska = &tables[1];
        let hawaii = &tables[2];

        for entity in &contiguous.county.entities {
            assert!(!alaska.county.entities.iter().any(|e| e.geo_id == entity.geo_id));
            assert!(!hawaii.county.entities.iter().any(|e| e.geo_id == entity.geo_id));
        }
    }

    #[test]
    fn selection_does_not_disturb_source_layers() {
        let (county, state) = sample_layers();
        let before = county.len();
        let regions = default_regions(NON_CONTIGUOUS_CODES, CONTIGUOUS_EPSG, 90.0);
        build_plot_tables(&county, &state, &regions).unwrap();
        assert_eq!(county.len(), before);
    }

    #[test]
    fn unadjusted_regions_keep_original_coordinates() {
        let (county, state) = sample_layers();
        let regions = default_regions(NON_CONTIGUOUS_CODES, CONTIGUOUS_EPSG, 90.0);
        let tables = build_plot_tables(&county, &state, &regions).unwrap();

        let hawaii = tables.iter().find(|t| t.label == "hawaii").unwrap();
        assert_eq!(hawaii.county.geoms[0], county.geoms[2]);
    }
}
