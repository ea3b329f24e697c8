//! Rigid placements: where and how a tool volume meets the workpiece.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

use nalgebra::{Isometry3, Translation3, Unit, UnitQuaternion, Vector3};

/// Base working plane of a frame. `XY` keeps the frame's own orientation;
/// `XZ` and `YZ` re-aim the local Z axis the way a workplane selection does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasePlane {
    XY,
    XZ,
    YZ,
}

/// A rigid transform from tool-local coordinates into the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub iso: Isometry3<f64>,
}

impl Placement {
    pub fn identity() -> Self {
        Placement {
            iso: Isometry3::identity(),
        }
    }

    /// Origin plus roll/pitch/yaw in degrees about the fixed world axes,
    /// applied X, then Y, then Z.
    pub fn from_origin_rpy_deg(origin: [f64; 3], rpy_deg: [f64; 3]) -> Self {
        let rot = UnitQuaternion::from_euler_angles(
            rpy_deg[0].to_radians(),
            rpy_deg[1].to_radians(),
            rpy_deg[2].to_radians(),
        );
        Placement {
            iso: Isometry3::from_parts(Translation3::new(origin[0], origin[1], origin[2]), rot),
        }
    }

    /// Pure rotation about the world origin.
    pub fn rotation_deg(rpy_deg: [f64; 3]) -> Self {
        Self::from_origin_rpy_deg([0.0; 3], rpy_deg)
    }

    /// Pure translation.
    pub fn translation(offset: [f64; 3]) -> Self {
        Placement {
            iso: Isometry3::translation(offset[0], offset[1], offset[2]),
        }
    }

    /// Compose a base-plane selection onto this placement. `XZ` turns the
    /// local Z toward world -Y of the frame, `YZ` cycles the local axes.
    pub fn on_base_plane(&self, plane: BasePlane) -> Placement {
        let rot = match plane {
            BasePlane::XY => return self.clone(),
            BasePlane::XZ => UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2),
            BasePlane::YZ => UnitQuaternion::from_axis_angle(
                &Unit::new_normalize(Vector3::new(1.0, 1.0, 1.0)),
                2.0 * FRAC_PI_3,
            ),
        };
        Placement {
            iso: self.iso * rot,
        }
    }

    /// Shift the placement origin along its own local X/Y axes.
    pub fn local_offset(&self, x: f64, y: f64) -> Placement {
        Placement {
            iso: self.iso * Translation3::new(x, y, 0.0),
        }
    }

    pub fn inverse(&self) -> Placement {
        Placement {
            iso: self.iso.inverse(),
        }
    }

    /// Map a world point into this placement's local frame.
    pub fn to_local(&self, p: [f64; 3]) -> [f64; 3] {
        let q = self
            .iso
            .inverse_transform_point(&nalgebra::Point3::new(p[0], p[1], p[2]));
        [q.x, q.y, q.z]
    }

    pub fn origin(&self) -> [f64; 3] {
        let t = self.iso.translation.vector;
        [t.x, t.y, t.z]
    }

    /// World direction of the placement's local +Z axis.
    pub fn local_z(&self) -> [f64; 3] {
        let z = self.iso.rotation * Vector3::z();
        [z.x, z.y, z.z]
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}
