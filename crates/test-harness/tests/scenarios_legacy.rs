//! Legacy operation pipeline scenarios: setups, selectors, free-form params.

use approx::assert_relative_eq;
use chip_types::request::OperationRequest;
use process_engine::OpPipeline;
use serde_json::json;
use solid_kernel::csg::CsgKernel;
use test_harness::helpers::bbox;

fn request(value: serde_json::Value) -> OperationRequest {
    serde_json::from_value(value).expect("test request must parse")
}

#[test]
fn lathe_sequence_on_cylinder_stock() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": { "type": "cylinder", "params": { "dia": 50, "h": 80 } },
        "operations": [
            { "op": "lathe:face_cut", "params": { "depth": 2 } },
            { "op": "lathe:turn_od", "params": { "dia": 40 } },
            { "op": "drill:hole", "params": { "dia": 10, "depth": 30 } }
        ]
    }));
    let mut pipeline = OpPipeline::new(&mut k, &req).unwrap();
    pipeline.run(&mut k, &req.operations).unwrap();
    assert_eq!(pipeline.steps.len(), 3);

    let bb = bbox(&k, pipeline.solid);
    assert_relative_eq!(bb.max[2], 38.0, epsilon = 1e-5);
    assert_relative_eq!(bb.min[2], -40.0, epsilon = 1e-5);
    assert_relative_eq!(bb.xlen(), 40.0, epsilon = 1e-5);

    // The facing step is recorded with its own geometry.
    let faced = bbox(&k, pipeline.steps[0].solid);
    assert_relative_eq!(faced.max[2], 38.0, epsilon = 1e-5);
    assert_relative_eq!(faced.xlen(), 50.0, epsilon = 1e-5);

    // Drill removes a centered core from the faced top.
    let drilled = bbox(&k, pipeline.steps[2].removed);
    assert_relative_eq!(drilled.xlen(), 10.0, epsilon = 1e-4);
    assert_relative_eq!(drilled.max[2], 38.0, epsilon = 1e-5);
    assert_relative_eq!(drilled.min[2], 8.0, epsilon = 1e-5);
}

#[test]
fn transform_shifts_the_workpiece() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": { "type": "block", "params": { "w": 10, "d": 10, "h": 10 } },
        "operations": [
            { "op": "xform:transform", "params": { "dz": 7.5 } }
        ]
    }));
    let mut pipeline = OpPipeline::new(&mut k, &req).unwrap();
    pipeline.run(&mut k, &req.operations).unwrap();
    let bb = bbox(&k, pipeline.solid);
    assert_relative_eq!(bb.min[2], 2.5, epsilon = 1e-9);
    assert_relative_eq!(bb.max[2], 12.5, epsilon = 1e-9);
}

#[test]
fn setup_round_trip_preserves_world_pose_extents() {
    // Face both the top and, via a 90-degree setup, one side. The stored
    // solid must stay in canonical world pose throughout.
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": { "type": "block", "params": { "w": 80, "d": 60, "h": 50 } },
        "setups": [ { "id": "S_SIDE", "orientation": [90, 0, 0] } ],
        "operations": [
            { "op": "mill:face", "params": { "depth": 5 } },
            { "op": "setup:index", "params": { "setup": "S_SIDE" } },
            { "op": "mill:face", "params": { "depth": 5 } },
            { "op": "setup:index", "params": {} },
            { "op": "mill:face", "params": { "depth": 5 } }
        ]
    }));
    let mut pipeline = OpPipeline::new(&mut k, &req).unwrap();
    pipeline.run(&mut k, &req.operations).unwrap();
    assert_eq!(pipeline.steps.len(), 3);
    assert_eq!(pipeline.current_setup(), None);

    let bb = bbox(&k, pipeline.solid);
    // Top faced twice (once before, once after the side setup): 50 - 10.
    assert_relative_eq!(bb.zlen(), 40.0, epsilon = 1e-5);
    // Side faced once under the rolled setup: the +Y extreme moves in.
    assert_relative_eq!(bb.min[1], -30.0, epsilon = 1e-5);
    assert_relative_eq!(bb.max[1], 25.0, epsilon = 1e-5);
    assert_relative_eq!(bb.xlen(), 80.0, epsilon = 1e-5);
}

#[test]
fn failure_keeps_earlier_steps() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": { "type": "block", "params": { "w": 80, "d": 60, "h": 50 } },
        "operations": [
            { "op": "mill:face", "params": { "depth": 2 } },
            { "op": "grind:flat", "params": {} }
        ]
    }));
    let mut pipeline = OpPipeline::new(&mut k, &req).unwrap();
    let err = pipeline.run(&mut k, &req.operations).unwrap_err();
    assert_eq!(err.to_string(), "operation 'grind:flat' is not supported");
    assert_eq!(pipeline.steps.len(), 1);
}
