//! Feature-application pipeline.
//!
//! Drives a [`solid_kernel::Kernel`] from parsed requests: builds stock,
//! resolves coordinate frames, applies features (or legacy operations) in
//! order, and keeps the append-only step history that makes every
//! intermediate state replayable.

pub mod context;
pub mod csys;
pub mod error;
pub mod feature;
pub mod ops;
pub mod setup;
pub mod stock;

pub use context::{run_request, PipelineOutcome, ProcessContext, StepRecord};
pub use csys::CsysRegistry;
pub use error::EngineError;
pub use setup::{OpPipeline, OpStepRecord};
