//! Solid-modeling kernel boundary.
//!
//! The [`Kernel`] trait is the complete capability set the pipeline relies
//! on: primitive and profile-based solid construction, booleans, rigid
//! transforms, bounding-box queries, planar face-selector resolution, and
//! tessellation. [`CsgKernel`] is the in-tree deterministic backend: solids
//! are implicit CSG trees classified by exact membership tests, with
//! bounding boxes refined by bisection against the membership function.

pub mod csg;
mod mesh;
mod node;
pub mod placement;
pub mod traits;
pub mod types;

pub use csg::CsgKernel;
pub use placement::{BasePlane, Placement};
pub use traits::Kernel;
pub use types::{Bbox, KernelError, SolidHandle, TriMesh};
