//! Typed feature records.
//!
//! Feature dispatch is a closed, adjacently tagged enum: `feature_type`
//! selects the variant, `params` carries its payload. Unknown feature types
//! therefore fail at deserialization, naming the offending tag.

use serde::{Deserialize, Serialize};

/// Tool approach axis. Only the Z pair is meaningful to the current feature
/// set; X/Y tokens parse so the error can come from validation rather than
/// ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "+X")]
    PlusX,
    #[serde(rename = "-X")]
    MinusX,
    #[serde(rename = "+Y")]
    PlusY,
    #[serde(rename = "-Y")]
    MinusY,
    #[serde(rename = "+Z")]
    PlusZ,
    #[serde(rename = "-Z")]
    MinusZ,
}

impl Axis {
    pub fn is_z(&self) -> bool {
        matches!(self, Axis::PlusZ | Axis::MinusZ)
    }

    /// +1.0 for the positive tokens, -1.0 for the negative ones.
    pub fn sign(&self) -> f64 {
        match self {
            Axis::PlusX | Axis::PlusY | Axis::PlusZ => 1.0,
            Axis::MinusX | Axis::MinusY | Axis::MinusZ => -1.0,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Axis::PlusX => "+X",
            Axis::MinusX => "-X",
            Axis::PlusY => "+Y",
            Axis::MinusY => "-Y",
            Axis::PlusZ => "+Z",
            Axis::MinusZ => "-Z",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

fn default_axis() -> Axis {
    Axis::MinusZ
}

/// Whether the constructed tool volume is subtracted from or unioned into
/// the workpiece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Cut,
    Add,
}

/// One point of an axial profile: offset along the spindle axis from the
/// stock's axial minimum, and the diameter at that station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub z: f64,
    #[serde(alias = "d")]
    pub dia: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarFaceParams {
    pub csys_id: String,
    pub size_x: f64,
    pub size_y: f64,
    pub depth: f64,
    #[serde(default = "default_axis")]
    pub axis: Axis,
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PocketParams {
    pub csys_id: String,
    pub width: f64,
    pub length: f64,
    pub depth: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub origin_x: f64,
    #[serde(default)]
    pub origin_y: f64,
    #[serde(default = "default_axis")]
    pub axis: Axis,
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoleParams {
    pub csys_id: String,
    pub diameter: f64,
    pub depth: f64,
    #[serde(default)]
    pub origin_x: f64,
    #[serde(default)]
    pub origin_y: f64,
    /// Accepted and recorded; carries no geometric meaning.
    #[serde(default)]
    pub through: bool,
    #[serde(default = "default_axis")]
    pub axis: Axis,
    #[serde(default)]
    pub mode: Mode,
}

fn default_angle() -> f64 {
    360.0
}

/// Shared payload of `turn_od_profile` and `bore_id_profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnProfileParams {
    pub csys_id: String,
    pub profile: Vec<ProfilePoint>,
    #[serde(default = "default_angle")]
    pub angle_deg: f64,
    #[serde(default)]
    pub mode: Mode,
}

/// The closed set of feature kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feature_type", content = "params", rename_all = "snake_case")]
pub enum FeatureOp {
    PlanarFace(PlanarFaceParams),
    PocketRectangular(PocketParams),
    SimpleHole(HoleParams),
    TurnOdProfile(TurnProfileParams),
    BoreIdProfile(TurnProfileParams),
}

impl FeatureOp {
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureOp::PlanarFace(_) => "planar_face",
            FeatureOp::PocketRectangular(_) => "pocket_rectangular",
            FeatureOp::SimpleHole(_) => "simple_hole",
            FeatureOp::TurnOdProfile(_) => "turn_od_profile",
            FeatureOp::BoreIdProfile(_) => "bore_id_profile",
        }
    }
}

/// One entry of the ordered feature list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Caller-owned annotations, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(flatten)]
    pub op: FeatureOp,
}

impl Feature {
    pub fn kind(&self) -> &'static str {
        self.op.kind()
    }

    /// Display name: the optional human name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
