use crate::geom::{BBox2, Vec2};
use crate::params::ParameterRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const GRAY: Rgb = Rgb(0x80, 0x80, 0x80);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBar {
    pub start: Vec2,
    pub length: f64,
    pub color: Rgb,
    pub line_width: f64,
    pub label: String,
    /// Gap between the bar and the bottom of its label.
    pub label_offset: f64,
    pub font_size: f64,
}

impl ScaleBar {
    pub fn end(&self) -> Vec2 {
        Vec2::new(self.start.x + self.length, self.start.y)
    }

    pub fn label_anchor(&self) -> Vec2 {
        Vec2::new(self.start.x + self.length / 2.0, self.start.y + self.label_offset)
    }
}

/// How a section is drawn: what the canvas collaborator needs besides the polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    /// Visible window in section coordinates (µm), drawn at equal aspect.
    pub viewport: BBox2,
    pub fill: Rgb,
    pub edge: Rgb,
    pub edge_width: f64,
    pub scale_bar: ScaleBar,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            viewport: BBox2::new(Vec2::new(0.0, 0.0), Vec2::new(500.0, 500.0)),
            fill: Rgb::GRAY,
            edge: Rgb::BLACK,
            edge_width: 0.5,
            scale_bar: ScaleBar {
                start: Vec2::new(350.0, 20.0),
                length: 100.0,
                color: Rgb::WHITE,
                line_width: 4.0,
                label: "100 µm".to_string(),
                label_offset: 10.0,
                font_size: 20.0,
            },
        }
    }
}

pub fn title(params: &ParameterRecord) -> String {
    format!(
        "Cross-Section at y = {} µm | MPW = {} µm, MPD = {} µm, LT = {} µm, HD = {} µm, RA = {}°",
        params.cut_plane_depth,
        params.width,
        params.depth,
        params.layer_thickness,
        params.hatch_distance,
        params.rotation_angle_deg
    )
}
