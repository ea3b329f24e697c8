//! Shared data model for the material-removal pipeline.
//!
//! Pure serde types: coordinate frames, typed feature records, stock
//! descriptions, legacy operation records, and the request envelopes that
//! carry them. No geometry lives here.

pub mod csys;
pub mod feature;
pub mod ops;
pub mod request;
pub mod stock;

pub use csys::{CsysDef, CsysRole};
pub use feature::{
    Axis, Feature, FeatureOp, HoleParams, Mode, PlanarFaceParams, PocketParams, ProfilePoint,
    TurnProfileParams,
};
pub use ops::{Operation, SetupDef};
pub use request::{FeatureRequest, OperationRequest, OutputPrefs, Units};
pub use stock::Stock;
