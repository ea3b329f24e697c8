//! Named coordinate system definitions.

use serde::{Deserialize, Serialize};

/// Reserved name of the implicit world coordinate system.
pub const WORLD_CSYS: &str = "WCS";

/// Intended role of a coordinate system. Informational; resolution and
/// placement math treat all roles identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsysRole {
    World,
    Setup,
    #[default]
    Local,
}

/// A named frame: origin plus a roll/pitch/yaw rotation in degrees, applied
/// about the fixed world X, then Y, then Z axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsysDef {
    pub name: String,
    #[serde(default)]
    pub role: CsysRole,
    #[serde(default)]
    pub origin: [f64; 3],
    #[serde(default)]
    pub rpy_deg: [f64; 3],
}

impl CsysDef {
    /// The identity world frame.
    pub fn world() -> Self {
        CsysDef {
            name: WORLD_CSYS.to_string(),
            role: CsysRole::World,
            origin: [0.0; 3],
            rpy_deg: [0.0; 3],
        }
    }

    /// True when this frame carries no translation and no rotation.
    pub fn is_identity(&self) -> bool {
        self.origin.iter().all(|v| v.abs() < 1e-12)
            && self.rpy_deg.iter().all(|v| v.abs() < 1e-12)
    }
}
