use crate::geom::{BBox2, Vec2};
use crate::params::{BuildConfig, ParameterRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId {
    pub layer: usize,
    pub path: usize,
}

/// One filled region of the section: a track's cut, ordered around its centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPolygon {
    pub track: TrackId,
    /// `(x, z)` in µm.
    pub points: Vec<Vec2>,
}

impl SectionPolygon {
    pub fn bbox(&self) -> BBox2 {
        BBox2::from_points(&self.points)
    }

    pub fn centroid(&self) -> Option<Vec2> {
        Vec2::centroid(&self.points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub params: ParameterRecord,
    pub config: BuildConfig,
    pub polygons: Vec<SectionPolygon>,
    pub tracks_total: usize,
    /// Tracks whose cut produced fewer than three points.
    pub skipped_tracks: usize,
}

impl CrossSection {
    pub fn extents(&self) -> Option<BBox2> {
        let mut bbox = BBox2::empty();
        let mut any = false;
        for p in &self.polygons {
            bbox = bbox.union(&p.bbox());
            any = true;
        }
        if any { Some(bbox) } else { None }
    }
}
