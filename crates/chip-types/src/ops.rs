//! Legacy string-dispatched operation records.
//!
//! The older pipeline generation carries operations as `op` strings with a
//! free-form parameter map, plus named setups whose orientations reorient the
//! workpiece while the op runs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named setup orientation: roll/pitch/yaw degrees about the fixed world
/// axes, applied X then Y then Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupDef {
    pub id: String,
    #[serde(default)]
    pub orientation: [f64; 3],
}

/// One legacy operation. Parameters are free-form; numeric values may arrive
/// as numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Face selector, e.g. `">Z"`. Defaults per op when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Per-op setup override; takes precedence over the pipeline's current
    /// setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl Operation {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.op)
    }
}
