//! Antimeridian re-centering.
//!
//! Geometries near longitude ±180° (the Aleutian chain) render as visually
//! split on a default projection. This routine folds the collection around a
//! caller-chosen meridian: each geometry is split along the meridian, the two
//! sides are translated onto the same side of the antimeridian, and the pieces
//! are re-unioned. The two translation offsets differ by exactly 360°, so on
//! the sphere this is a pure rotation of longitude with the wrap point moved
//! to the chosen meridian.

use geo::{BooleanOps, BoundingRect, Coord, LineString, MultiPolygon, Polygon, Translate};

/// Re-centers every geometry in the collection around `meridian` (degrees
/// longitude). Output has the same length and order as the input. Geometries
/// lying entirely on one side of the meridian come back as a single
/// untranslated-shape piece; a degenerate split (no area on either side)
/// yields an empty `MultiPolygon` rather than a panic.
pub fn recenter(geoms: &[MultiPolygon<f64>], meridian: f64) -> Vec<MultiPolygon<f64>> {
    // Half-planes on either side of the splitting meridian, generous enough
    // to cover any lon/lat input.
    let west = clip_rect(meridian - 360.0, meridian);
    let east = clip_rect(meridian, meridian + 360.0);

    geoms.iter()
        .map(|geom| recenter_one(geom, meridian, &west, &east))
        .collect()
}

fn recenter_one(
    geom: &MultiPolygon<f64>,
    meridian: f64,
    west: &MultiPolygon<f64>,
    east: &MultiPolygon<f64>,
) -> MultiPolygon<f64> {
    let mut pieces: Vec<MultiPolygon<f64>> = Vec::new();

    for clip in [west, east] {
        let piece = geom.intersection(clip);
        if piece.0.is_empty() {
            continue;
        }

        // bounding_rect is Some for any non-empty multipolygon
        let min_x = piece.bounding_rect().map(|r| r.min().x).unwrap_or(meridian);
        let dir = if min_x >= meridian { -1.0 } else { 1.0 };
        let x_off = 180.0 * dir - meridian;

        pieces.push(piece.translate(x_off, 0.0));
    }

    pieces.into_iter()
        .reduce(|a, b| a.union(&b))
        .unwrap_or_else(|| MultiPolygon(vec![]))
}

fn clip_rect(x0: f64, x1: f64) -> MultiPolygon<f64> {
    let ring = LineString(vec![
        Coord { x: x0, y: -90.0 },
        Coord { x: x1, y: -90.0 },
        Coord { x: x1, y: 90.0 },
        Coord { x: x0, y: 90.0 },
        Coord { x: x0, y: -90.0 },
    ]);
    MultiPolygon(vec![Polygon::new(ring, vec![])])
}
