//! Tool volume construction and boolean application.

use chip_types::feature::Mode;
use solid_kernel::placement::Placement;
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;

use crate::profile::rect_profile;
use crate::types::{GeometryDelta, OpError};

/// Depths and angles below this are the identity step.
const IDENTITY_EPS: f64 = 1e-9;

/// How a revolved profile meets the workpiece. `Retain` is outside turning:
/// the profile describes the material to keep, so the application is an
/// intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode {
    Retain,
    Cut,
    Add,
}

impl ProfileMode {
    /// Map a feature mode onto revolution semantics. Cut-mode outside
    /// turning retains; cut-mode boring subtracts.
    pub fn for_turning(mode: Mode, boring: bool) -> ProfileMode {
        match (mode, boring) {
            (Mode::Cut, false) => ProfileMode::Retain,
            (Mode::Cut, true) => ProfileMode::Cut,
            (Mode::Add, _) => ProfileMode::Add,
        }
    }
}

/// `before \ after`, falling back to the whole pre-step solid when the
/// difference cannot be formed.
pub fn subtract_or_whole(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    after: SolidHandle,
) -> SolidHandle {
    match kernel.cut(before, after) {
        Ok(removed) => removed,
        Err(e) => {
            tracing::debug!(error = %e, "removed-volume difference failed, reporting whole solid");
            before
        }
    }
}

fn apply_tool(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    tool: SolidHandle,
    mode: Mode,
) -> Result<GeometryDelta, OpError> {
    match mode {
        Mode::Cut => {
            let after = kernel.cut(before, tool)?;
            let removed = subtract_or_whole(kernel, before, after);
            Ok(GeometryDelta {
                solid: after,
                removed: Some(removed),
                added: None,
            })
        }
        Mode::Add => {
            let after = kernel.union(before, tool)?;
            Ok(GeometryDelta {
                solid: after,
                removed: None,
                added: Some(tool),
            })
        }
    }
}

/// Extrude a closed polygon from the placement plane by the signed `depth`
/// along local Z and apply it.
pub fn extrude_volume(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    profile: &[[f64; 2]],
    placement: &Placement,
    depth: f64,
    mode: Mode,
) -> Result<GeometryDelta, OpError> {
    if !depth.is_finite() {
        return Err(OpError::invalid(format!("depth {depth} is not finite")));
    }
    if depth.abs() < IDENTITY_EPS {
        return Ok(GeometryDelta::identity(before));
    }
    let tool = kernel.extrude_profile(profile, placement, depth)?;
    apply_tool(kernel, before, tool, mode)
}

/// Rectangle tool volume: centered `size_x` by `size_y`, extruded by the
/// signed `depth`.
pub fn box_volume(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    placement: &Placement,
    size_x: f64,
    size_y: f64,
    depth: f64,
    mode: Mode,
) -> Result<GeometryDelta, OpError> {
    let profile = rect_profile(size_x, size_y, 0.0)?;
    extrude_volume(kernel, before, &profile, placement, depth, mode)
}

/// Circular tool volume, e.g. a drilled hole.
pub fn cylinder_volume(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    placement: &Placement,
    diameter: f64,
    depth: f64,
    mode: Mode,
) -> Result<GeometryDelta, OpError> {
    if !(diameter.is_finite() && diameter > 0.0) {
        return Err(OpError::invalid(format!(
            "diameter must be positive, got {diameter}"
        )));
    }
    if !depth.is_finite() {
        return Err(OpError::invalid(format!("depth {depth} is not finite")));
    }
    if depth.abs() < IDENTITY_EPS {
        return Ok(GeometryDelta::identity(before));
    }
    let tool = kernel.extrude_circle(diameter, placement, depth)?;
    apply_tool(kernel, before, tool, mode)
}

/// Revolve a closed (radius, z) loop about the placement's local Z and
/// apply it per `mode`.
pub fn revolve_volume(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    profile_rz: &[[f64; 2]],
    placement: &Placement,
    angle_deg: f64,
    mode: ProfileMode,
) -> Result<GeometryDelta, OpError> {
    if !angle_deg.is_finite() {
        return Err(OpError::invalid(format!(
            "revolution angle {angle_deg} is not finite"
        )));
    }
    if angle_deg.abs() < IDENTITY_EPS {
        return Ok(GeometryDelta::identity(before));
    }
    let tool = kernel.revolve_profile(profile_rz, placement, angle_deg)?;
    match mode {
        ProfileMode::Retain => {
            let after = kernel.intersect(before, tool)?;
            let removed = subtract_or_whole(kernel, before, after);
            Ok(GeometryDelta {
                solid: after,
                removed: Some(removed),
                added: None,
            })
        }
        ProfileMode::Cut => apply_tool(kernel, before, tool, Mode::Cut),
        ProfileMode::Add => apply_tool(kernel, before, tool, Mode::Add),
    }
}
