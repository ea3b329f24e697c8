//! Facing: a rectangular footprint cut (or built up) from the frame plane.

use chip_types::feature::{Feature, PlanarFaceParams};
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;
use volume_ops::types::GeometryDelta;
use volume_ops::volume::box_volume;

use crate::csys::CsysRegistry;
use crate::error::EngineError;

use super::{finite_depth, finite_positive, frame_placement, from_op, z_axis_only};

pub(super) fn apply(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    feature: &Feature,
    p: &PlanarFaceParams,
    registry: &CsysRegistry,
) -> Result<GeometryDelta, EngineError> {
    finite_positive(feature, p.size_x, "size_x")?;
    finite_positive(feature, p.size_y, "size_y")?;
    finite_depth(feature, p.depth)?;
    z_axis_only(feature, p.axis)?;
    let place = frame_placement(feature, registry, &p.csys_id)?;
    let distance = p.axis.sign() * p.depth;
    box_volume(kernel, before, &place, p.size_x, p.size_y, distance, p.mode)
        .map_err(|e| from_op(feature, e))
}
