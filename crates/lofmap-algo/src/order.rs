use lofmap_core::geom::Vec2;

/// Fewer points than this cannot enclose an area.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Sort `points` counter-clockwise by their angle around the centroid.
///
/// Points at the same angle keep their input order. Returns `None` for fewer
/// than three points.
pub fn order_polygon(mut points: Vec<Vec2>) -> Option<Vec<Vec2>> {
    if points.len() < MIN_POLYGON_POINTS {
        return None;
    }
    let c = Vec2::centroid(&points)?;
    points.sort_by(|a, b| {
        let ta = (a.y - c.y).atan2(a.x - c.x);
        let tb = (b.y - c.y).atan2(b.x - c.x);
        ta.total_cmp(&tb)
    });
    Some(points)
}
