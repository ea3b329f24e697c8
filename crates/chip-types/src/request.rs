//! Request envelopes for the two pipeline generations.

use serde::{Deserialize, Serialize};

use crate::csys::CsysDef;
use crate::feature::Feature;
use crate::ops::{Operation, SetupDef};
use crate::stock::Stock;

/// Length units of the request. Informational; the core never converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Mm,
    Inch,
}

/// Export preferences carried with a request. Informational; the core
/// computes geometry and leaves file writing to the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputPrefs {
    /// Filename template for per-step exports, e.g. `"{name}.stl"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_file_template: Option<String>,
    /// Tessellation resolution hint for mesh export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_resolution: Option<u32>,
}

/// Feature-based pipeline request: stock, named frames, ordered features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequest {
    #[serde(default)]
    pub units: Units,
    pub stock: Stock,
    #[serde(default)]
    pub csys_list: Vec<CsysDef>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputPrefs>,
}

/// Legacy pipeline request: stock, named setups, ordered operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    #[serde(default)]
    pub units: Units,
    pub stock: Stock,
    #[serde(default)]
    pub setups: Vec<SetupDef>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_request_parses_minimal_form() {
        let json = r#"{
            "stock": { "type": "block", "params": { "w": 80, "d": 60, "h": 50 } }
        }"#;
        let req: FeatureRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.units, Units::Mm);
        assert!(req.csys_list.is_empty());
        assert!(req.features.is_empty());
        assert!(req.output.is_none());
    }

    #[test]
    fn output_prefs_are_optional_fields() {
        let json = r#"{
            "stock": { "type": "block", "params": { "w": 10, "d": 10, "h": 10 } },
            "output": { "step_file_template": "{name}.stl" }
        }"#;
        let req: FeatureRequest = serde_json::from_str(json).unwrap();
        let output = req.output.unwrap();
        assert_eq!(output.step_file_template.as_deref(), Some("{name}.stl"));
        assert!(output.mesh_resolution.is_none());
    }

    #[test]
    fn operation_request_parses_setups_and_ops() {
        let json = r#"{
            "units": "mm",
            "stock": { "type": "cylinder", "params": { "dia": 50, "h": 80 } },
            "setups": [ { "id": "S1", "orientation": [90, 0, 0] } ],
            "operations": [
                { "op": "setup:index", "params": { "setup": "S1" } },
                { "op": "lathe:face_cut", "params": { "depth": 2 } }
            ]
        }"#;
        let req: OperationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.setups.len(), 1);
        assert_eq!(req.operations[0].op, "setup:index");
        assert_eq!(req.operations[1].params["depth"], 2);
    }
}
