//! Legacy string-dispatched operation appliers.
//!
//! These cut relative to a selected planar face of the current solid rather
//! than a named frame. Parameters are free-form; numbers may arrive as JSON
//! numbers or numeric strings.

use chip_types::ops::Operation;
use serde_json::Value;
use solid_kernel::placement::Placement;
use solid_kernel::traits::Kernel;
use solid_kernel::types::SolidHandle;
use volume_ops::profile::rect_profile;
use volume_ops::volume::subtract_or_whole;

use crate::error::EngineError;

/// Facing cuts overhang the footprint by this factor so the tool clears the
/// edges.
const FACE_OVERHANG: f64 = 1.1;

/// Apply one geometry operation, returning `(after, removed)`.
pub fn apply_operation(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    op: &Operation,
) -> Result<(SolidHandle, SolidHandle), EngineError> {
    let after = match op.op.as_str() {
        "mill:face" => {
            let depth = num(op, "depth")?.abs();
            face_cut(kernel, before, op, depth)?
        }
        "lathe:face_cut" => {
            let depth = num_or(op, "depth", 1.0)?.abs();
            face_cut(kernel, before, op, depth)?
        }
        "mill:profile" => {
            let w = num(op, "rect_w")?;
            let l = num(op, "rect_h")?;
            let depth = num(op, "depth")?.abs();
            let place = face_placement(kernel, before, op)?;
            let profile = rect_profile(w, l, 0.0).map_err(|e| op_failed(op, e.to_string()))?;
            let tool = kernel
                .extrude_profile(&profile, &place, -depth)
                .map_err(|e| op_failed(op, e.to_string()))?;
            kernel.cut(before, tool).map_err(|e| op_failed(op, e.to_string()))?
        }
        "drill:hole" => {
            let dia = num(op, "dia")?;
            let depth = num(op, "depth")?.abs();
            let x = num_or(op, "x", 0.0)?;
            let y = num_or(op, "y", 0.0)?;
            let place = face_placement(kernel, before, op)?.local_offset(x, y);
            let tool = kernel
                .extrude_circle(dia, &place, -depth)
                .map_err(|e| op_failed(op, e.to_string()))?;
            kernel.cut(before, tool).map_err(|e| op_failed(op, e.to_string()))?
        }
        "lathe:turn_od" => {
            let dia = num(op, "dia")?;
            let shell = full_length_cylinder(kernel, before, op, dia)?;
            kernel
                .intersect(before, shell)
                .map_err(|e| op_failed(op, e.to_string()))?
        }
        "lathe:bore_id" => {
            let dia = num(op, "dia")?;
            let core = full_length_cylinder(kernel, before, op, dia)?;
            kernel.cut(before, core).map_err(|e| op_failed(op, e.to_string()))?
        }
        "xform:transform" => {
            let dx = num_or(op, "dx", 0.0)?;
            let dy = num_or(op, "dy", 0.0)?;
            let dz = num_or(op, "dz", 0.0)?;
            kernel
                .transformed(before, &Placement::translation([dx, dy, dz]))
                .map_err(|e| op_failed(op, e.to_string()))?
        }
        other => {
            return Err(EngineError::UnsupportedOperation {
                op: other.to_string(),
            })
        }
    };
    let removed = subtract_or_whole(kernel, before, after);
    Ok((after, removed))
}

/// Rectangle cut covering the whole footprint of the selected face.
fn face_cut(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    op: &Operation,
    depth: f64,
) -> Result<SolidHandle, EngineError> {
    let bb = kernel
        .bounding_box(before)
        .map_err(|e| op_failed(op, e.to_string()))?
        .ok_or_else(|| op_failed(op, "workpiece is empty"))?;
    let place = face_placement(kernel, before, op)?;
    let profile = rect_profile(bb.xlen() * FACE_OVERHANG, bb.ylen() * FACE_OVERHANG, 0.0)
        .map_err(|e| op_failed(op, e.to_string()))?;
    let tool = kernel
        .extrude_profile(&profile, &place, -depth)
        .map_err(|e| op_failed(op, e.to_string()))?;
    kernel.cut(before, tool).map_err(|e| op_failed(op, e.to_string()))
}

/// Cylinder about world Z spanning the solid's full Z extent.
fn full_length_cylinder(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    op: &Operation,
    dia: f64,
) -> Result<SolidHandle, EngineError> {
    let bb = kernel
        .bounding_box(before)
        .map_err(|e| op_failed(op, e.to_string()))?
        .ok_or_else(|| op_failed(op, "workpiece is empty"))?;
    let place = Placement::translation([0.0, 0.0, bb.min[2]]);
    kernel
        .extrude_circle(dia, &place, bb.zlen())
        .map_err(|e| op_failed(op, e.to_string()))
}

fn face_placement(
    kernel: &mut dyn Kernel,
    before: SolidHandle,
    op: &Operation,
) -> Result<Placement, EngineError> {
    let selector = op.selector.as_deref().unwrap_or(">Z");
    kernel
        .face_plane(before, selector)
        .map_err(|e| op_failed(op, e.to_string()))
}

fn op_failed(op: &Operation, reason: impl Into<String>) -> EngineError {
    EngineError::OperationFailed {
        op: op.op.clone(),
        reason: reason.into(),
    }
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn num(op: &Operation, key: &str) -> Result<f64, EngineError> {
    let value = op
        .params
        .get(key)
        .ok_or_else(|| op_failed(op, format!("missing parameter '{key}'")))?;
    let parsed =
        coerce(value).ok_or_else(|| op_failed(op, format!("parameter '{key}' is not numeric")))?;
    if !parsed.is_finite() {
        return Err(op_failed(op, format!("parameter '{key}' is not finite")));
    }
    Ok(parsed)
}

fn num_or(op: &Operation, key: &str, default: f64) -> Result<f64, EngineError> {
    match op.params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => {
            let parsed = coerce(value)
                .ok_or_else(|| op_failed(op, format!("parameter '{key}' is not numeric")))?;
            if !parsed.is_finite() {
                return Err(op_failed(op, format!("parameter '{key}' is not finite")));
            }
            Ok(parsed)
        }
    }
}
