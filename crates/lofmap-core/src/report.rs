use crate::figure::FigureLayout;
use crate::geom::BBox2;
use crate::model::CrossSection;
use crate::params::{BuildConfig, ParameterRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub params: ParameterRecord,
    pub config: BuildConfig,
    pub tracks_total: usize,
    pub polygons_total: usize,
    pub skipped_tracks: usize,
    pub extents: Option<BBox2>,
    pub warnings: Vec<Warning>,
}

impl SectionReport {
    pub fn from_section(section: &CrossSection, layout: &FigureLayout) -> Self {
        let extents = section.extents();

        let mut warnings = Vec::new();
        if section.polygons.is_empty() {
            warnings.push(Warning {
                code: "no_polygons".to_string(),
                message: "The cut plane misses every track; nothing to draw.".to_string(),
            });
        } else if !section
            .polygons
            .iter()
            .any(|p| p.bbox().intersects(&layout.viewport))
        {
            warnings.push(Warning {
                code: "outside_viewport".to_string(),
                message: "All section polygons fall outside the figure viewport.".to_string(),
            });
        }

        Self {
            params: section.params,
            config: section.config,
            tracks_total: section.tracks_total,
            polygons_total: section.polygons.len(),
            skipped_tracks: section.skipped_tracks,
            extents,
            warnings,
        }
    }
}
