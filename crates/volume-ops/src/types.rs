//! Operation results and errors.

use solid_kernel::types::{KernelError, SolidHandle};
use thiserror::Error;

/// Outcome of applying one tool volume to a workpiece.
///
/// `solid` is the workpiece after the step. At most one of `removed` /
/// `added` is set; an identity step (zero depth, zero angle) sets neither
/// and leaves `solid` equal to the input.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryDelta {
    pub solid: SolidHandle,
    pub removed: Option<SolidHandle>,
    pub added: Option<SolidHandle>,
}

impl GeometryDelta {
    /// A step that touched nothing.
    pub fn identity(solid: SolidHandle) -> Self {
        GeometryDelta {
            solid,
            removed: None,
            added: None,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.removed.is_none() && self.added.is_none()
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OpError {
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

impl OpError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        OpError::InvalidParameter {
            reason: reason.into(),
        }
    }
}
