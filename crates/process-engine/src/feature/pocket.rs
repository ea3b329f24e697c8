//! Rectangular pocket, optionally with rounded corners, offset on the
//! frame plane.

use chip_types::feature::{Feature, PocketParams};
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;
use volume_ops::profile::rect_profile;
use volume_ops::types::GeometryDelta;
use volume_ops::volume::extrude_volume;

use crate::csys::CsysRegistry;
use crate::error::EngineError;

use super::{finite, finite_depth, finite_positive, frame_placement, from_op, invalid, z_axis_only};

pub(super) fn apply(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    feature: &Feature,
    p: &PocketParams,
    registry: &CsysRegistry,
) -> Result<GeometryDelta, EngineError> {
    finite_positive(feature, p.width, "width")?;
    finite_positive(feature, p.length, "length")?;
    finite_depth(feature, p.depth)?;
    finite(feature, p.origin_x, "origin_x")?;
    finite(feature, p.origin_y, "origin_y")?;
    if !p.corner_radius.is_finite()
        || p.corner_radius < 0.0
        || p.corner_radius > p.width.min(p.length) / 2.0 + 1e-9
    {
        return Err(invalid(
            feature,
            format!(
                "corner_radius {} must lie in 0 ..= min(width, length) / 2",
                p.corner_radius
            ),
        ));
    }
    z_axis_only(feature, p.axis)?;
    let place = frame_placement(feature, registry, &p.csys_id)?
        .local_offset(p.origin_x, p.origin_y);
    let profile =
        rect_profile(p.width, p.length, p.corner_radius).map_err(|e| from_op(feature, e))?;
    let distance = p.axis.sign() * p.depth;
    extrude_volume(kernel, before, &profile, &place, distance, p.mode)
        .map_err(|e| from_op(feature, e))
}
