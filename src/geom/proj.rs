//! CRS adjustment for display projections.

use anyhow::{Context, Result, anyhow, bail};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

/// Census cartographic boundary files ship in NAD83 lon/lat.
const SOURCE_GEOG_PROJ4: &str = "+proj=longlat +datum=NAD83 +no_defs +type=crs";

/// PROJ.4 string for a supported target EPSG code.
///
/// Only the projections this tracker actually plots with are wired up;
/// anything else is an error rather than a guess.
fn target_proj4(epsg: u32) -> Result<&'static str> {
    match epsg {
        // NAD83 / Texas Centric Lambert Conformal (contiguous-US display)
        3082 => Ok("+proj=lcc +lat_1=27.5 +lat_2=35 +lat_0=18 +lon_0=-100 +x_0=1500000 +y_0=5000000 +datum=NAD83 +units=m +no_defs +type=crs"),
        // NAD83 / Conus Albers
        5070 => Ok("+proj=aea +lat_1=29.5 +lat_2=45.5 +lat_0=23 +lon_0=-96 +x_0=0 +y_0=0 +datum=NAD83 +units=m +no_defs +type=crs"),
        _ => bail!("unsupported display EPSG code: {epsg}"),
    }
}

/// Reprojects shapes from NAD83 lon/lat to the display CRS named by `epsg`.
/// Returns new geometries; the input is never mutated.
pub fn reproject(geoms: &[MultiPolygon<f64>], epsg: u32) -> Result<Vec<MultiPolygon<f64>>> {
    let from = Proj4::from_proj_string(SOURCE_GEOG_PROJ4)
        .with_context(|| anyhow!("failed to build source PROJ.4: {SOURCE_GEOG_PROJ4}"))?;

    let to = {
        let proj_string = target_proj4(epsg)?;
        Proj4::from_proj_string(proj_string)
            .with_context(|| anyhow!("failed to build target PROJ.4: {proj_string}"))?
    };

    // Map coords → radians in, meters out.
    let projected = geoms.iter()
        .map(|shape| shape.map_coords(|coord: Coord<f64>| {
            let mut point = (coord.x.to_radians(), coord.y.to_radians(), 0.0);
            transform(&from, &to, &mut point)
                .expect("CRS transform failed");
            Coord { x: point.0, y: point.1 }
        }))
        .collect();

    Ok(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, Polygon};

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

    #[test]
    fn unknown_epsg_is_an_error() {
        assert!(reproject(&[square(-100.0, 35.0)], 99999).is_err());
    }

    #[test]
    fn reprojection_moves_coords_into_meters() {
        let projected = reproject(&[square(-100.0, 35.0)], 3082).unwrap();
        assert_eq!(projected.len(), 1);

        // Projected coords are planar meters, far outside degree range.
        let coord = projected[0].0[0].exterior().0[0];
        assert!(coord.x.abs() > 1_000.0);
        assert!(coord.y.abs() > 1_000.0);
    }
}
