//! Turning and boring from an axial Z-diameter profile.
//!
//! Outside turning in cut mode treats the revolved profile as the shape to
//! retain: the workpiece is intersected with it. Boring subtracts the
//! profile solid instead. Both measure axial offsets from the workpiece's
//! minimum along the frame's Z axis.

use chip_types::feature::{Feature, TurnProfileParams};
use solid_kernel::placement::Placement;
use solid_kernel::traits::Kernel;
use solid_kernel::types::{Bbox, SolidHandle};
use volume_ops::profile::axial_profile;
use volume_ops::types::GeometryDelta;
use volume_ops::volume::{revolve_volume, ProfileMode};

use crate::csys::CsysRegistry;
use crate::error::EngineError;

use super::{finite, frame_placement, from_op, invalid};

/// Slack applied to the outer-radius guards.
const RADIUS_TOL: f64 = 1e-6;

pub(super) fn apply(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    feature: &Feature,
    p: &TurnProfileParams,
    registry: &CsysRegistry,
    boring: bool,
) -> Result<GeometryDelta, EngineError> {
    if p.profile.len() < 2 {
        return Err(invalid(
            feature,
            format!("profile needs at least 2 points, got {}", p.profile.len()),
        ));
    }
    finite(feature, p.angle_deg, "angle_deg")?;
    if p.angle_deg < 0.0 {
        return Err(invalid(
            feature,
            format!("angle_deg must be non-negative, got {}", p.angle_deg),
        ));
    }
    let place = frame_placement(feature, registry, &p.csys_id)?;

    let bb = kernel
        .bounding_box(before)
        .map_err(|e| invalid(feature, e.to_string()))?
        .ok_or_else(|| invalid(feature, "workpiece has no material left to turn"))?;
    let outer_radius = bb.xlen().max(bb.ylen()) / 2.0;
    let axial_min = local_axial_min(&bb, &place);

    for (i, point) in p.profile.iter().enumerate() {
        let r = point.dia / 2.0;
        if boring {
            if r >= outer_radius - RADIUS_TOL {
                return Err(invalid(
                    feature,
                    format!(
                        "profile point {i} radius {r} must stay below the outer radius {outer_radius}"
                    ),
                ));
            }
        } else if r > outer_radius + RADIUS_TOL {
            return Err(invalid(
                feature,
                format!(
                    "profile point {i} radius {r} exceeds the outer radius {outer_radius}"
                ),
            ));
        }
    }

    let loop_rz = axial_profile(&p.profile, axial_min).map_err(|e| from_op(feature, e))?;
    let mode = ProfileMode::for_turning(p.mode, boring);
    revolve_volume(kernel, before, &loop_rz, &place, p.angle_deg, mode)
        .map_err(|e| from_op(feature, e))
}

/// Minimum of the workpiece bound along the frame's local Z. Identical to
/// the world Z minimum for an identity frame.
fn local_axial_min(bb: &Bbox, place: &Placement) -> f64 {
    bb.corners()
        .iter()
        .map(|c| place.to_local(*c)[2])
        .fold(f64::INFINITY, f64::min)
}
