//! Setup-indexed legacy pipeline.
//!
//! Geometry ops run in the orientation of the current setup: the workpiece
//! is rotated forward, the op applies, and the result (and its removed
//! volume) rotate back, so stored state is always in the canonical world
//! pose. `setup:index` switches the current setup and touches no geometry.

use std::collections::HashMap;

use chip_types::ops::Operation;
use chip_types::request::OperationRequest;
use serde_json::Value;
use solid_kernel::placement::Placement;
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;

use crate::error::EngineError;
use crate::ops::apply_operation;
use crate::stock::build_stock;

/// One applied geometry operation. `solid` and `removed` are in the
/// canonical world pose.
#[derive(Debug, Clone)]
pub struct OpStepRecord {
    pub name: String,
    pub op: Operation,
    pub solid: SolidHandle,
    pub removed: SolidHandle,
}

#[derive(Debug)]
pub struct OpPipeline {
    pub solid: SolidHandle,
    setups: HashMap<String, [f64; 3]>,
    current_setup: Option<String>,
    pub steps: Vec<OpStepRecord>,
}

impl OpPipeline {
    pub fn new(kernel: &mut dyn Kernel, request: &OperationRequest) -> Result<Self, EngineError> {
        let solid = build_stock(kernel, &request.stock)?;
        let setups = request
            .setups
            .iter()
            .map(|s| (s.id.clone(), s.orientation))
            .collect();
        Ok(OpPipeline {
            solid,
            setups,
            current_setup: None,
            steps: Vec::new(),
        })
    }

    pub fn current_setup(&self) -> Option<&str> {
        self.current_setup.as_deref()
    }

    /// Apply every operation in order, halting on the first failure.
    pub fn run(
        &mut self,
        kernel: &mut dyn Kernel,
        operations: &[Operation],
    ) -> Result<(), EngineError> {
        for op in operations {
            self.apply(kernel, op)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, kernel: &mut dyn Kernel, op: &Operation) -> Result<(), EngineError> {
        if op.op == "setup:index" {
            return self.index_setup(op);
        }

        let effective = op
            .setup
            .clone()
            .or_else(|| self.current_setup.clone());
        let orientation = match &effective {
            Some(id) => *self
                .setups
                .get(id)
                .ok_or_else(|| EngineError::UnknownSetup { id: id.clone() })?,
            None => [0.0; 3],
        };

        let oriented = orientation.iter().any(|v| v.abs() > 1e-12);
        let work = if oriented {
            let fwd = Placement::rotation_deg(orientation);
            kernel
                .transformed(self.solid, &fwd)
                .map_err(|e| EngineError::OperationFailed {
                    op: op.op.clone(),
                    reason: e.to_string(),
                })?
        } else {
            self.solid
        };

        let (after, removed) = apply_operation(kernel, work, op)?;

        let (after, removed) = if oriented {
            let back = Placement::rotation_deg(orientation).inverse();
            let map_back = |kernel: &mut dyn Kernel, s| {
                kernel
                    .transformed(s, &back)
                    .map_err(|e| EngineError::OperationFailed {
                        op: op.op.clone(),
                        reason: e.to_string(),
                    })
            };
            (map_back(kernel, after)?, map_back(kernel, removed)?)
        } else {
            (after, removed)
        };

        tracing::debug!(op = %op.op, setup = effective.as_deref(), "operation applied");
        self.solid = after;
        self.steps.push(OpStepRecord {
            name: op.display_name().to_string(),
            op: op.clone(),
            solid: after,
            removed,
        });
        Ok(())
    }

    /// Switch the current setup. An absent or null `setup` parameter resets
    /// to the canonical world pose.
    fn index_setup(&mut self, op: &Operation) -> Result<(), EngineError> {
        let target = match op.params.get("setup") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => op.setup.clone(),
            Some(other) => {
                return Err(EngineError::OperationFailed {
                    op: op.op.clone(),
                    reason: format!("setup parameter must be a string, got {other}"),
                })
            }
        };
        if let Some(id) = &target {
            if !self.setups.contains_key(id) {
                return Err(EngineError::UnknownSetup { id: id.clone() });
            }
        }
        tracing::info!(setup = target.as_deref(), "setup indexed");
        self.current_setup = target;
        Ok(())
    }
}
