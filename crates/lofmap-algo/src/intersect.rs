use crate::structs::{PlacedTrack, SectionPoints};
use itertools::Itertools;
use nalgebra::{Point2, Point3};

/// Crossing of segment `a -> b` with the plane `Y = plane`, projected to `(x, z)`.
///
/// Touching endpoints count. Segments lying in a plane of constant Y never
/// produce a point, even when that plane is the cut plane.
pub fn intersect_edge(a: &Point3<f64>, b: &Point3<f64>, plane: f64) -> Option<Point2<f64>> {
    if (a.y - plane) * (b.y - plane) > 0.0 {
        return None;
    }
    if a.y == b.y {
        return None;
    }
    let t = (plane - a.y) / (b.y - a.y);
    Some(Point2::new(a.x + t * (b.x - a.x), a.z + t * (b.z - a.z)))
}

/// All crossings of a track with the cut plane.
///
/// Order: front face edges, back face edges, then the side walls `front[k] -> back[k]`.
pub fn intersect_track(track: &PlacedTrack, plane: f64) -> SectionPoints {
    let front = track
        .front
        .iter()
        .tuple_windows()
        .filter_map(|(a, b)| intersect_edge(a, b, plane));
    let back = track
        .back
        .iter()
        .tuple_windows()
        .filter_map(|(a, b)| intersect_edge(a, b, plane));
    let walls = track
        .front
        .iter()
        .zip(&track.back)
        .filter_map(|(a, b)| intersect_edge(a, b, plane));

    front.chain(back).chain(walls).collect()
}
