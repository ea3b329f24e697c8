//! Test harness for the material-removal pipeline.
//!
//! Provides request builders, bounding-box math shortcuts, mesh metrics,
//! and STL export for the scenario suites.
//!
//! # Key Components
//!
//! - [`helpers`] — request/feature constructors, bbox shortcuts, mesh math
//! - [`stl`] — STL export from [`solid_kernel::TriMesh`]

pub mod helpers;
pub mod stl;

pub use helpers::HarnessError;
