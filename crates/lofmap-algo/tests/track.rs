use lofmap_algo::track::{extrude_direction, layer_rotation, place_track, track_profile};
use lofmap_core::model::TrackId;
use lofmap_core::params::{BuildConfig, ParameterRecord};
use nalgebra::Point2;
use proptest::prelude::*;

#[test]
fn profile_is_arc_then_flat_top() {
    let profile = track_profile(138.0, 69.0, 100);
    assert_eq!(200, profile.len());

    let first = profile.points[0];
    let deepest = profile.points[..100]
        .iter()
        .fold(f64::INFINITY, |m, p| m.min(p.y));
    assert_eq!(Point2::new(69.0, 0.0), first);
    assert!((deepest + 69.0).abs() < 0.05, "deepest = {deepest}");

    let top_z = profile.points[99].y;
    for p in &profile.points[100..] {
        assert_eq!(top_z, p.y);
    }
    assert_eq!(-69.0, profile.points[100].x);
}

#[test]
fn layer_zero_is_unrotated() {
    let dir = extrude_direction(&layer_rotation(&ParameterRecord::default(), 0));
    assert!(dir.x.abs() < 1e-12);
    assert!((dir.y - 1.0).abs() < 1e-12);
}

#[test]
fn rotation_is_cumulative_per_layer() {
    let params = ParameterRecord {
        rotation_angle_deg: 90.0,
        ..ParameterRecord::default()
    };
    let dir = extrude_direction(&layer_rotation(&params, 1));
    assert!((dir.x + 1.0).abs() < 1e-12);
    assert!(dir.y.abs() < 1e-12);

    let dir = extrude_direction(&layer_rotation(&params, 3));
    assert!((dir.x - 1.0).abs() < 1e-12);
    assert!(dir.y.abs() < 1e-12);
}

#[test]
fn placement_offsets_path_and_layer() {
    let params = ParameterRecord::default();
    let cfg = BuildConfig::default();
    let profile = track_profile(params.width, params.depth, cfg.arc_samples);
    let track = place_track(&profile, &params, &cfg, TrackId { layer: 0, path: 2 });

    // First profile sample sits at (w/2, 0) relative to the track center.
    let center_x = params.width + 2.0 * params.hatch_distance - 300.0;
    let p = track.front[0];
    assert!((p.x - (center_x + params.width / 2.0)).abs() < 1e-9);
    assert!(p.y.abs() < 1e-9);
    assert!(p.z.abs() < 1e-9);

    let b = track.back[0];
    assert!((b.y - cfg.extrusion_depth).abs() < 1e-9);

    let upper = place_track(&profile, &params, &cfg, TrackId { layer: 4, path: 2 });
    assert!((upper.front[0].z - 4.0 * params.layer_thickness).abs() < 1e-9);
}

proptest! {
    #[test]
    fn profile_closes_on_flat_top(width in 10.0f64..1000.0, depth in 5.0f64..1000.0) {
        let profile = track_profile(width, depth, 100);
        let first = profile.points[0];
        let last = profile.points[profile.len() - 1];
        prop_assert_eq!(first.x, last.x);
        prop_assert!((first.y - last.y).abs() < 1e-9);

        // Monotone x along the arc and nothing above the top keeps the outline simple.
        for w in profile.points[..100].windows(2) {
            prop_assert!(w[1].x < w[0].x);
        }
        for p in &profile.points {
            prop_assert!(p.y <= 1e-9);
        }
    }

    #[test]
    fn placement_is_rigid(angle in 0.0f64..180.0, layer in 0usize..30, path in 0usize..10) {
        let cfg = BuildConfig::default();
        let params = ParameterRecord { rotation_angle_deg: angle, ..ParameterRecord::default() };
        let flat = ParameterRecord { rotation_angle_deg: 0.0, ..params };
        let profile = track_profile(params.width, params.depth, cfg.arc_samples);
        let id = TrackId { layer, path };

        let rotated = place_track(&profile, &params, &cfg, id);
        let unrotated = place_track(&profile, &flat, &cfg, id);
        let c = Point2::new(cfg.rotation_center.x, cfg.rotation_center.y);

        for (r, u) in rotated.front.iter().zip(&unrotated.front) {
            let dr = (r.xy() - c).norm();
            let du = (u.xy() - c).norm();
            prop_assert!((dr - du).abs() < 1e-6);
            prop_assert_eq!(r.z, u.z);
        }
        for (f, b) in rotated.front.iter().zip(&rotated.back) {
            prop_assert!(((b - f).norm() - cfg.extrusion_depth).abs() < 1e-6);
        }
    }
}
