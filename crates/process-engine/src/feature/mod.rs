//! One applier per feature kind.
//!
//! Every applier validates in the same order: numeric finiteness, domain
//! constraints, frame resolution, then volume construction and boolean
//! application. Anything that goes wrong surfaces as a validation error
//! naming the feature.

mod hole;
mod planar_face;
mod pocket;
mod turn;

use chip_types::feature::{Axis, Feature, FeatureOp};
use solid_kernel::placement::{BasePlane, Placement};
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;
use volume_ops::types::{GeometryDelta, OpError};

use crate::csys::CsysRegistry;
use crate::error::EngineError;

/// Apply one feature to the current workpiece.
pub fn apply_feature(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    feature: &Feature,
    registry: &CsysRegistry,
) -> Result<GeometryDelta, EngineError> {
    match &feature.op {
        FeatureOp::PlanarFace(p) => planar_face::apply(kernel, before, feature, p, registry),
        FeatureOp::PocketRectangular(p) => pocket::apply(kernel, before, feature, p, registry),
        FeatureOp::SimpleHole(p) => hole::apply(kernel, before, feature, p, registry),
        FeatureOp::TurnOdProfile(p) => {
            turn::apply(kernel, before, feature, p, registry, false)
        }
        FeatureOp::BoreIdProfile(p) => turn::apply(kernel, before, feature, p, registry, true),
    }
}

// ── Shared validation helpers ──

pub(crate) fn invalid(feature: &Feature, reason: impl Into<String>) -> EngineError {
    EngineError::Validation {
        feature_id: feature.id.clone(),
        feature_type: feature.kind().to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn from_op(feature: &Feature, err: OpError) -> EngineError {
    invalid(feature, err.to_string())
}

pub(crate) fn finite_positive(
    feature: &Feature,
    value: f64,
    what: &str,
) -> Result<(), EngineError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(
            feature,
            format!("{what} must be finite and positive, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn finite_depth(feature: &Feature, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            feature,
            format!("depth must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn finite(feature: &Feature, value: f64, what: &str) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(invalid(feature, format!("{what} must be finite, got {value}")));
    }
    Ok(())
}

/// Only the Z pair makes sense for the current feature kinds.
pub(crate) fn z_axis_only(feature: &Feature, axis: Axis) -> Result<(), EngineError> {
    if !axis.is_z() {
        return Err(invalid(
            feature,
            format!("axis {axis} is not supported; use +Z or -Z"),
        ));
    }
    Ok(())
}

/// Resolve a frame, folding an unknown name into a validation error that
/// names the feature.
pub(crate) fn frame_placement(
    feature: &Feature,
    registry: &CsysRegistry,
    csys_id: &str,
) -> Result<Placement, EngineError> {
    registry
        .placement(csys_id, BasePlane::XY)
        .map_err(|e| invalid(feature, e.to_string()))
}
