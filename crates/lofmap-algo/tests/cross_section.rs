use lofmap_algo::cross_section;
use lofmap_core::params::{BuildConfig, ParameterRecord};

#[test]
fn default_build_produces_polygons() {
    let params = ParameterRecord::default();
    let cfg = BuildConfig::default();
    let section = cross_section(&params, &cfg);

    assert_eq!(300, section.tracks_total);
    assert!(!section.polygons.is_empty());
    assert_eq!(
        section.tracks_total,
        section.polygons.len() + section.skipped_tracks
    );
    for poly in &section.polygons {
        assert!(poly.points.len() >= 3);
        assert!(poly.track.layer < cfg.num_layers);
        assert!(poly.track.path < cfg.num_paths);
    }
}

#[test]
fn cut_at_front_face_keeps_first_layer() {
    let params = ParameterRecord {
        cut_plane_depth: 0.0,
        ..ParameterRecord::default()
    };
    let section = cross_section(&params, &BuildConfig::default());

    // Layer 0 is unrotated, so its front face lies exactly on Y = 0.
    let first_layer: Vec<_> = section
        .polygons
        .iter()
        .filter(|p| p.track.layer == 0)
        .collect();
    assert_eq!(10, first_layer.len());
    for poly in first_layer {
        assert_eq!(200, poly.points.len());
        let bbox = poly.bbox();
        assert!((bbox.min.y + params.depth).abs() < 0.05);
        assert!(bbox.max.y.abs() < 1e-9);
        assert!((bbox.width() - params.width).abs() < 1e-9);
    }
}

#[test]
fn zero_rotation_stacks_tracks_in_columns() {
    let params = ParameterRecord {
        rotation_angle_deg: 0.0,
        ..ParameterRecord::default()
    };
    let cfg = BuildConfig::default();
    let section = cross_section(&params, &cfg);

    assert_eq!(300, section.polygons.len());
    for poly in &section.polygons {
        let center_x = params.width + poly.track.path as f64 * params.hatch_distance
            - cfg.pattern_offset_x;
        let bbox = poly.bbox();
        assert!((bbox.min.x - (center_x - params.width / 2.0)).abs() < 1e-9);
        assert!((bbox.max.x - (center_x + params.width / 2.0)).abs() < 1e-9);

        let base_z = poly.track.layer as f64 * params.layer_thickness;
        assert!(bbox.max.y - base_z < 1e-9);
    }
}

#[test]
fn plane_beyond_every_track_is_empty() {
    let params = ParameterRecord {
        cut_plane_depth: 5000.0,
        ..ParameterRecord::default()
    };
    let section = cross_section(&params, &BuildConfig::default());
    assert!(section.polygons.is_empty());
    assert_eq!(300, section.skipped_tracks);
    assert_eq!(None, section.extents());
}
