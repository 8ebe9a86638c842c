use lofmap_core::model::TrackId;
use nalgebra::{Point2, Point3};

/// Closed outline of one weld track in its own frame, `(x, z)` pairs.
///
/// The first half is the half-ellipse arc from `(w/2, 0)` through `(0, -depth)`
/// to `(-w/2, ~0)`; the second half walks back along the flat top.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackProfile {
    pub points: Vec<Point2<f64>>,
}

impl TrackProfile {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A profile placed on the build plate and swept along its layer's print direction.
///
/// `front[k]` and `back[k]` are the same profile sample at both ends of the sweep.
#[derive(Debug, Clone)]
pub struct PlacedTrack {
    pub id: TrackId,
    pub front: Vec<Point3<f64>>,
    pub back: Vec<Point3<f64>>,
}

/// Unordered `(x, z)` crossings of one track with the cut plane.
pub type SectionPoints = Vec<Point2<f64>>;
