use crate::structs::{PlacedTrack, TrackProfile};
use lofmap_core::model::TrackId;
use lofmap_core::params::{BuildConfig, ParameterRecord};
use nalgebra::{Point2, Point3, Rotation2, Vector2};
use std::f64::consts::PI;

/// Half-ellipse arc closed by a flat top.
///
/// The top sits at the arc's last sampled z rather than a literal zero.
pub fn track_profile(width: f64, depth: f64, samples: usize) -> TrackProfile {
    let half_width = width / 2.0;
    let arc: Vec<Point2<f64>> = (0..samples)
        .map(|k| {
            let theta = if samples > 1 {
                PI * k as f64 / (samples - 1) as f64
            } else {
                0.0
            };
            Point2::new(half_width * theta.cos(), -depth * theta.sin())
        })
        .collect();

    let top_z = arc.last().map(|p| p.y).unwrap_or(0.0);
    let mut points = Vec::with_capacity(arc.len() * 2);
    points.extend(arc.iter().copied());
    points.extend(arc.iter().rev().map(|p| Point2::new(p.x, top_z)));

    TrackProfile { points }
}

/// Cumulative rotation of layer `layer`: `layer * rotation_angle_deg`.
pub fn layer_rotation(params: &ParameterRecord, layer: usize) -> Rotation2<f64> {
    Rotation2::new((layer as f64 * params.rotation_angle_deg).to_radians())
}

/// Unit print direction of a layer: the rotated `(0, 1)`.
pub fn extrude_direction(rotation: &Rotation2<f64>) -> Vector2<f64> {
    rotation * Vector2::<f64>::y()
}

/// Rotate `p` about `center`.
pub fn rotate_about(rotation: &Rotation2<f64>, center: Point2<f64>, p: Point2<f64>) -> Point2<f64> {
    center + rotation * (p - center)
}

/// Position `profile` at `(layer, path)` and sweep it by `extrusion_depth`.
pub fn place_track(
    profile: &TrackProfile,
    params: &ParameterRecord,
    config: &BuildConfig,
    id: TrackId,
) -> PlacedTrack {
    let rotation = layer_rotation(params, id.layer);
    let sweep = extrude_direction(&rotation) * config.extrusion_depth;
    let center = Point2::new(config.rotation_center.x, config.rotation_center.y);

    let center_x = params.width + id.path as f64 * params.hatch_distance - config.pattern_offset_x;
    let center_y = 0.0;
    let center_z = id.layer as f64 * params.layer_thickness;

    let mut front = Vec::with_capacity(profile.len());
    let mut back = Vec::with_capacity(profile.len());
    for p in &profile.points {
        let xy = rotate_about(&rotation, center, Point2::new(p.x + center_x, center_y));
        let z = p.y + center_z;
        front.push(Point3::new(xy.x, xy.y, z));
        back.push(Point3::new(xy.x + sweep.x, xy.y + sweep.y, z));
    }

    PlacedTrack { id, front, back }
}
