use crate::geom::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-tunable process parameters. Lengths in µm, angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterRecord {
    /// Melt-pool width (MPW).
    pub width: f64,
    /// Melt-pool depth (MPD).
    pub depth: f64,
    pub layer_thickness: f64,
    pub hatch_distance: f64,
    /// Scan-direction rotation between consecutive layers.
    pub rotation_angle_deg: f64,
    /// Position of the polished section along the (unrotated) print direction.
    pub cut_plane_depth: f64,
}

impl Default for ParameterRecord {
    fn default() -> Self {
        Self {
            width: 138.0,
            depth: 69.0,
            layer_thickness: 25.0,
            hatch_distance: 130.0,
            rotation_angle_deg: 67.0,
            cut_plane_depth: 350.0,
        }
    }
}

/// Build-plate constants that the form does not expose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub extrusion_depth: f64,
    pub num_paths: usize,
    pub num_layers: usize,
    pub rotation_center: Vec2,
    /// Samples along the half-ellipse arc of each track profile.
    pub arc_samples: usize,
    /// Horizontal shift applied to every track so the hatch pattern sits in view.
    pub pattern_offset_x: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            extrusion_depth: 1300.0,
            num_paths: 10,
            num_layers: 30,
            rotation_center: Vec2::new(350.0, 650.0),
            arc_samples: 100,
            pattern_offset_x: 300.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    Width,
    Depth,
    LayerThickness,
    HatchDistance,
    RotationAngleDeg,
    CutPlaneDepth,
}

/// Form metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParamSpec {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const PARAM_SPECS: [ParamSpec; 6] = [
    ParamSpec {
        key: ParamKey::Width,
        label: "Melt Pool Width",
        unit: "µm",
        min: 10.0,
        max: 1000.0,
        step: 5.0,
        default: 138.0,
    },
    ParamSpec {
        key: ParamKey::Depth,
        label: "Melt Pool Depth",
        unit: "µm",
        min: 5.0,
        max: 1000.0,
        step: 5.0,
        default: 69.0,
    },
    ParamSpec {
        key: ParamKey::LayerThickness,
        label: "Layer Thickness",
        unit: "µm",
        min: 1.0,
        max: 500.0,
        step: 1.0,
        default: 25.0,
    },
    ParamSpec {
        key: ParamKey::HatchDistance,
        label: "Hatch Distance",
        unit: "µm",
        min: 10.0,
        max: 1000.0,
        step: 5.0,
        default: 130.0,
    },
    ParamSpec {
        key: ParamKey::RotationAngleDeg,
        label: "Rotation Angle",
        unit: "°",
        min: 0.0,
        max: 180.0,
        step: 1.0,
        default: 67.0,
    },
    ParamSpec {
        key: ParamKey::CutPlaneDepth,
        label: "Cut Plane Depth",
        unit: "µm",
        min: 0.0,
        max: 5000.0,
        step: 10.0,
        default: 350.0,
    },
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{key:?} must be a finite number, got {value}")]
    NonFinite { key: ParamKey, value: f64 },
    #[error("{key:?} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        key: ParamKey,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ParameterRecord {
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::Width => self.width,
            ParamKey::Depth => self.depth,
            ParamKey::LayerThickness => self.layer_thickness,
            ParamKey::HatchDistance => self.hatch_distance,
            ParamKey::RotationAngleDeg => self.rotation_angle_deg,
            ParamKey::CutPlaneDepth => self.cut_plane_depth,
        }
    }

    pub fn get_mut(&mut self, key: ParamKey) -> &mut f64 {
        match key {
            ParamKey::Width => &mut self.width,
            ParamKey::Depth => &mut self.depth,
            ParamKey::LayerThickness => &mut self.layer_thickness,
            ParamKey::HatchDistance => &mut self.hatch_distance,
            ParamKey::RotationAngleDeg => &mut self.rotation_angle_deg,
            ParamKey::CutPlaneDepth => &mut self.cut_plane_depth,
        }
    }

    pub fn set(&mut self, key: ParamKey, value: f64) {
        *self.get_mut(key) = value;
    }

    /// Replace every field whose override is `Some`, leaving the rest as they are.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (ParamKey, Option<f64>)>,
    {
        for (key, value) in overrides {
            if let Some(v) = value {
                self.set(key, v);
            }
        }
        self
    }

    /// Range check performed by the input forms. The section pipeline itself accepts anything.
    pub fn validate(&self) -> Result<(), ParamError> {
        for spec in &PARAM_SPECS {
            let value = self.get(spec.key);
            if !value.is_finite() {
                return Err(ParamError::NonFinite {
                    key: spec.key,
                    value,
                });
            }
            if !spec.contains(value) {
                return Err(ParamError::OutOfRange {
                    key: spec.key,
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }
}
