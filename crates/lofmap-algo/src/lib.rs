use lofmap_core::geom::Vec2;
use lofmap_core::model::{CrossSection, SectionPolygon, TrackId};
use lofmap_core::params::{BuildConfig, ParameterRecord};

pub mod intersect;
pub mod order;
pub mod structs;
pub mod svg_writer;
pub mod track;

/// Cut every track of the build with the plane `Y = params.cut_plane_depth`.
pub fn cross_section(params: &ParameterRecord, config: &BuildConfig) -> CrossSection {
    // Every track shares the same outline; only placement differs.
    let profile = track::track_profile(params.width, params.depth, config.arc_samples);

    let mut polygons = Vec::new();
    let mut skipped_tracks = 0;

    for layer in 0..config.num_layers {
        let before = polygons.len();
        for path in 0..config.num_paths {
            let placed = track::place_track(&profile, params, config, TrackId { layer, path });
            let points: Vec<Vec2> = intersect::intersect_track(&placed, params.cut_plane_depth)
                .iter()
                .map(|p| Vec2::new(p.x, p.y))
                .collect();
            let hits = points.len();

            match order::order_polygon(points) {
                Some(ordered) => polygons.push(SectionPolygon {
                    track: placed.id,
                    points: ordered,
                }),
                None => {
                    log::trace!(
                        "track {}/{}: {hits} crossing(s), skipped",
                        placed.id.layer,
                        placed.id.path
                    );
                    skipped_tracks += 1;
                }
            }
        }
        log::debug!("layer {layer}: {} polygon(s)", polygons.len() - before);
    }

    let tracks_total = config.num_layers * config.num_paths;
    log::info!(
        "cut at y = {}: {} polygon(s) from {tracks_total} track(s), {skipped_tracks} skipped",
        params.cut_plane_depth,
        polygons.len()
    );

    CrossSection {
        params: *params,
        config: *config,
        polygons,
        tracks_total,
        skipped_tracks,
    }
}
