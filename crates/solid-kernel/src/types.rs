//! Kernel-boundary types: handles, bounding boxes, meshes, errors.

use nalgebra::{Isometry3, Point3};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub(crate) struct SolidKey;
}

/// Opaque reference to a solid owned by a kernel instance. Handles are never
/// invalidated; every operation produces a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidHandle(pub(crate) SolidKey);

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bbox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Bbox { min, max }
    }

    pub fn size(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn xlen(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn ylen(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn zlen(&self) -> f64 {
        self.max[2] - self.min[2]
    }

    pub fn center(&self) -> [f64; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Smallest box containing both.
    pub fn hull(&self, other: &Bbox) -> Bbox {
        let mut min = self.min;
        let mut max = self.max;
        for a in 0..3 {
            min[a] = min[a].min(other.min[a]);
            max[a] = max[a].max(other.max[a]);
        }
        Bbox { min, max }
    }

    /// Intersection of the two boxes, `None` when disjoint.
    pub fn overlap(&self, other: &Bbox) -> Option<Bbox> {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        for a in 0..3 {
            min[a] = self.min[a].max(other.min[a]);
            max[a] = self.max[a].min(other.max[a]);
            if min[a] > max[a] {
                return None;
            }
        }
        Some(Bbox { min, max })
    }

    /// The eight corner points.
    pub fn corners(&self) -> [[f64; 3]; 8] {
        let mut out = [[0.0; 3]; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = [
                if i & 1 == 0 { self.min[0] } else { self.max[0] },
                if i & 2 == 0 { self.min[1] } else { self.max[1] },
                if i & 4 == 0 { self.min[2] } else { self.max[2] },
            ];
        }
        out
    }

    /// Box around the rigidly transformed corners of this box.
    pub(crate) fn transformed_corners(&self, iso: &Isometry3<f64>) -> Bbox {
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];
        for ix in 0..2 {
            for iy in 0..2 {
                for iz in 0..2 {
                    let corner = Point3::new(
                        if ix == 0 { self.min[0] } else { self.max[0] },
                        if iy == 0 { self.min[1] } else { self.max[1] },
                        if iz == 0 { self.min[2] } else { self.max[2] },
                    );
                    let p = iso.transform_point(&corner);
                    for a in 0..3 {
                        min[a] = min[a].min(p[a]);
                        max[a] = max[a].max(p[a]);
                    }
                }
            }
        }
        Bbox { min, max }
    }
}

/// Indexed triangle mesh. `vertices` and `normals` are flat xyz triples,
/// `indices` are triangle corner indices into the vertex list.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum KernelError {
    #[error("solid handle is stale or unknown")]
    UnknownSolid,

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("degenerate profile: {reason}")]
    DegenerateProfile { reason: String },

    #[error("empty solid: {context}")]
    EmptySolid { context: String },

    #[error("face selector '{selector}' failed: {reason}")]
    SelectorFailed { selector: String, reason: String },
}
