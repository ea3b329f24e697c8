//! The kernel capability trait.

use crate::placement::Placement;
use crate::types::{Bbox, KernelError, SolidHandle, TriMesh};

/// Everything the pipeline asks of a solid-modeling backend.
///
/// All construction is value-producing: inputs are never mutated and handles
/// stay valid for the life of the kernel, so any prefix of a step history can
/// be revisited later.
pub trait Kernel {
    /// Axis-aligned box centered on the world origin.
    fn make_box(&mut self, w: f64, d: f64, h: f64) -> Result<SolidHandle, KernelError>;

    /// Cylinder about the world Z axis, centered on the origin, total height
    /// `h` (Z spans -h/2 .. +h/2).
    fn make_cylinder(&mut self, dia: f64, h: f64) -> Result<SolidHandle, KernelError>;

    /// Extrude a closed planar polygon (placement-local XY coordinates) along
    /// the placement's local Z by the signed `distance`.
    fn extrude_profile(
        &mut self,
        profile: &[[f64; 2]],
        placement: &Placement,
        distance: f64,
    ) -> Result<SolidHandle, KernelError>;

    /// Extrude a circle of `diameter` centered on the placement origin along
    /// the placement's local Z by the signed `distance`.
    fn extrude_circle(
        &mut self,
        diameter: f64,
        placement: &Placement,
        distance: f64,
    ) -> Result<SolidHandle, KernelError>;

    /// Revolve a closed (radius, z) polygon about the placement's local Z
    /// axis by `angle_deg` (clamped to a full turn).
    fn revolve_profile(
        &mut self,
        profile_rz: &[[f64; 2]],
        placement: &Placement,
        angle_deg: f64,
    ) -> Result<SolidHandle, KernelError>;

    fn union(&mut self, a: SolidHandle, b: SolidHandle) -> Result<SolidHandle, KernelError>;

    fn cut(&mut self, a: SolidHandle, b: SolidHandle) -> Result<SolidHandle, KernelError>;

    fn intersect(&mut self, a: SolidHandle, b: SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Rigidly transform a solid.
    fn transformed(
        &mut self,
        solid: SolidHandle,
        placement: &Placement,
    ) -> Result<SolidHandle, KernelError>;

    /// World-space bounding box; `None` when the solid contains no material.
    fn bounding_box(&self, solid: SolidHandle) -> Result<Option<Bbox>, KernelError>;

    /// Resolve an axis-extreme face selector (`">Z"`, `"<X"`, ...) to the
    /// placement of the selected planar face: origin at the face centroid,
    /// local +Z along the outward normal.
    fn face_plane(&self, solid: SolidHandle, selector: &str)
        -> Result<Placement, KernelError>;

    /// Triangulate the solid's boundary at roughly `resolution` cells along
    /// the longest axis.
    fn tessellate(&self, solid: SolidHandle, resolution: u32) -> Result<TriMesh, KernelError>;
}
