//! Simple drilled hole.

use chip_types::feature::{Feature, HoleParams};
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;
use volume_ops::types::GeometryDelta;
use volume_ops::volume::cylinder_volume;

use crate::csys::CsysRegistry;
use crate::error::EngineError;

use super::{finite, finite_depth, finite_positive, frame_placement, from_op, z_axis_only};

pub(super) fn apply(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    feature: &Feature,
    p: &HoleParams,
    registry: &CsysRegistry,
) -> Result<GeometryDelta, EngineError> {
    finite_positive(feature, p.diameter, "diameter")?;
    finite_depth(feature, p.depth)?;
    finite(feature, p.origin_x, "origin_x")?;
    finite(feature, p.origin_y, "origin_y")?;
    z_axis_only(feature, p.axis)?;
    if p.through {
        tracing::debug!(feature = %feature.id, "through flag recorded, depth drives the cut");
    }
    let place = frame_placement(feature, registry, &p.csys_id)?
        .local_offset(p.origin_x, p.origin_y);
    let distance = p.axis.sign() * p.depth;
    cylinder_volume(kernel, before, &place, p.diameter, distance, p.mode)
        .map_err(|e| from_op(feature, e))
}
