//! End-to-end feature pipeline behavior.

use approx::assert_relative_eq;
use chip_types::request::FeatureRequest;
use process_engine::{run_request, EngineError};
use serde_json::json;
use solid_kernel::csg::CsgKernel;
use solid_kernel::traits::Kernel;
use solid_kernel::types::{Bbox, SolidHandle};

fn request(value: serde_json::Value) -> FeatureRequest {
    serde_json::from_value(value).unwrap()
}

fn bbox(kernel: &CsgKernel, s: SolidHandle) -> Bbox {
    kernel.bounding_box(s).unwrap().unwrap()
}

fn block_stock() -> serde_json::Value {
    json!({ "type": "block", "params": { "w": 80, "d": 60, "h": 50 } })
}

#[test]
fn zero_depth_feature_is_an_identity_step() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "features": [{
            "id": "f1",
            "feature_type": "planar_face",
            "params": { "csys_id": "WCS", "size_x": 100, "size_y": 100, "depth": 0 }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none());
    let step = &outcome.context.steps[0];
    assert!(step.delta.is_identity());
    assert_eq!(step.delta.solid, outcome.context.solid);
}

#[test]
fn minus_z_cut_removes_below_the_plane() {
    // Frame at the block center: a -Z cut of depth 5 takes local z -5..0.
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "features": [{
            "id": "f1",
            "feature_type": "planar_face",
            "params": {
                "csys_id": "WCS", "size_x": 100, "size_y": 100,
                "depth": 5, "axis": "-Z"
            }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none());
    let removed = outcome.context.steps[0].delta.removed.unwrap();
    let rb = bbox(&k, removed);
    assert_relative_eq!(rb.min[2], -5.0, epsilon = 1e-6);
    assert_relative_eq!(rb.max[2], 0.0, epsilon = 1e-6);
}

#[test]
fn plus_z_cut_mirrors_the_minus_z_cut() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "features": [{
            "id": "f1",
            "feature_type": "planar_face",
            "params": {
                "csys_id": "WCS", "size_x": 100, "size_y": 100,
                "depth": 5, "axis": "+Z"
            }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    let removed = outcome.context.steps[0].delta.removed.unwrap();
    let rb = bbox(&k, removed);
    assert_relative_eq!(rb.min[2], 0.0, epsilon = 1e-6);
    assert_relative_eq!(rb.max[2], 5.0, epsilon = 1e-6);
}

#[test]
fn rotated_frame_redirects_the_cut_along_world_y() {
    // 90 degrees about X: the frame's -Z points at world +Y, so the hole
    // drills sideways.
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "csys_list": [
            { "name": "CSYS_SIDE", "origin": [0, 0, 0], "rpy_deg": [90, 0, 0] }
        ],
        "features": [{
            "id": "f1",
            "feature_type": "simple_hole",
            "params": { "csys_id": "CSYS_SIDE", "diameter": 8.5, "depth": 20 }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none());
    let removed = outcome.context.steps[0].delta.removed.unwrap();
    let rb = bbox(&k, removed);
    assert_relative_eq!(rb.min[1], 0.0, epsilon = 1e-6);
    assert_relative_eq!(rb.max[1], 20.0, epsilon = 1e-6);
    assert_relative_eq!(rb.xlen(), 8.5, epsilon = 1e-6);
    assert_relative_eq!(rb.zlen(), 8.5, epsilon = 1e-6);
}

#[test]
fn unknown_frame_halts_and_keeps_earlier_steps() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "features": [
            {
                "id": "f1",
                "feature_type": "planar_face",
                "params": { "csys_id": "WCS", "size_x": 100, "size_y": 100, "depth": 2 }
            },
            {
                "id": "f2",
                "feature_type": "simple_hole",
                "params": { "csys_id": "CSYS_MISSING", "diameter": 8, "depth": 10 }
            },
            {
                "id": "f3",
                "feature_type": "simple_hole",
                "params": { "csys_id": "WCS", "diameter": 8, "depth": 10 }
            }
        ]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    let err = outcome.error.unwrap();
    match &err {
        EngineError::Validation {
            feature_id, reason, ..
        } => {
            assert_eq!(feature_id, "f2");
            assert!(reason.contains("CSYS_MISSING"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(outcome.context.steps.len(), 1);
    assert_eq!(
        outcome.context.solid,
        outcome.context.steps[0].delta.solid
    );
}

#[test]
fn invalid_parameters_name_the_feature() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "features": [{
            "id": "bad-pocket",
            "feature_type": "pocket_rectangular",
            "params": {
                "csys_id": "WCS", "width": 40, "length": 30,
                "depth": 5, "corner_radius": 16
            }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    let msg = outcome.error.unwrap().to_string();
    assert!(msg.contains("bad-pocket"), "{msg}");
    assert!(msg.contains("pocket_rectangular"), "{msg}");
    assert!(msg.contains("corner_radius"), "{msg}");
}

#[test]
fn replaying_a_prefix_reproduces_the_same_geometry() {
    let features = json!([
        {
            "id": "f1",
            "feature_type": "planar_face",
            "params": { "csys_id": "CSYS_TOP", "size_x": 100, "size_y": 100, "depth": 3 }
        },
        {
            "id": "f2",
            "feature_type": "pocket_rectangular",
            "params": { "csys_id": "WCS", "width": 40, "length": 30, "depth": 5,
                         "origin_x": 10, "origin_y": 5 }
        },
        {
            "id": "f3",
            "feature_type": "simple_hole",
            "params": { "csys_id": "WCS", "diameter": 8, "depth": 20, "origin_x": -20 }
        }
    ]);
    let full = request(json!({
        "stock": block_stock(),
        "csys_list": [ { "name": "CSYS_TOP", "origin": [0, 0, 25] } ],
        "features": features
    }));
    let mut prefix = full.clone();
    prefix.features.truncate(2);

    let mut k1 = CsgKernel::new();
    let full_outcome = run_request(&mut k1, &full).unwrap();
    assert!(full_outcome.error.is_none());
    assert_eq!(full_outcome.context.steps.len(), 3);

    let mut k2 = CsgKernel::new();
    let prefix_outcome = run_request(&mut k2, &prefix).unwrap();
    assert!(prefix_outcome.error.is_none());

    // Step 2 of the full run matches the prefix run exactly.
    let a = bbox(&k1, full_outcome.context.steps[1].delta.solid);
    let b = bbox(&k2, prefix_outcome.context.solid);
    for axis in 0..3 {
        assert_relative_eq!(a.min[axis], b.min[axis], epsilon = 1e-9);
        assert_relative_eq!(a.max[axis], b.max[axis], epsilon = 1e-9);
    }

    // Earlier handles in the full run are still queryable after later steps.
    let first = bbox(&k1, full_outcome.context.steps[0].delta.solid);
    assert_relative_eq!(first.max[2], 22.0, epsilon = 1e-6);
}

#[test]
fn pocket_and_hole_compose_on_one_block() {
    let mut k = CsgKernel::new();
    let req = request(json!({
        "stock": block_stock(),
        "csys_list": [
            { "name": "CSYS_TOP", "origin": [0, 0, 25] }
        ],
        "features": [
            {
                "id": "f1",
                "name": "face top",
                "feature_type": "planar_face",
                "params": { "csys_id": "CSYS_TOP", "size_x": 90, "size_y": 70, "depth": 3 }
            },
            {
                "id": "f2",
                "name": "main pocket",
                "feature_type": "pocket_rectangular",
                "params": { "csys_id": "CSYS_TOP", "width": 40, "length": 30, "depth": 8 }
            },
            {
                "id": "f3",
                "name": "dowel hole",
                "feature_type": "simple_hole",
                "params": { "csys_id": "CSYS_TOP", "diameter": 8, "depth": 30,
                             "origin_x": 30, "origin_y": 20 }
            }
        ]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none());
    assert_eq!(outcome.context.steps.len(), 3);

    let final_bb = bbox(&k, outcome.context.solid);
    assert_relative_eq!(final_bb.max[2], 22.0, epsilon = 1e-6);
    assert_relative_eq!(final_bb.xlen(), 80.0, epsilon = 1e-6);

    // The pocket floor sits 8 below the original frame plane.
    let pocket_removed = bbox(&k, outcome.context.steps[1].delta.removed.unwrap());
    assert_relative_eq!(pocket_removed.min[2], 17.0, epsilon = 1e-6);
    assert_relative_eq!(pocket_removed.max[2], 22.0, epsilon = 1e-6);
    assert_relative_eq!(pocket_removed.xlen(), 40.0, epsilon = 1e-6);

    // Step naming for export.
    assert_eq!(outcome.context.steps[0].file_stem(0), "face_top");
    assert_eq!(outcome.context.steps[2].file_stem(2), "dowel_hole");
}
