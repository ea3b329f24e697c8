//! Tool-volume construction and application.
//!
//! This crate owns the geometric conventions of the pipeline: profile
//! construction, extrusion/revolution sign rules, the zero-depth and
//! zero-angle identity cases, and how a boolean application turns into a
//! [`GeometryDelta`]. Feature appliers validate parameters and resolve
//! frames; everything after that happens here.

pub mod profile;
pub mod types;
pub mod volume;

pub use profile::{axial_profile, rect_profile};
pub use types::{GeometryDelta, OpError};
pub use volume::{
    box_volume, cylinder_volume, extrude_volume, revolve_volume, subtract_or_whole, ProfileMode,
};
