//! Milling scenarios: block stock, frame-placed features, step history,
//! mesh export.

use approx::assert_relative_eq;
use process_engine::run_request;
use serde_json::json;
use solid_kernel::csg::CsgKernel;
use solid_kernel::traits::Kernel;
use test_harness::helpers::{bbox, block_stock_json, feature_request, mesh_volume};
use test_harness::stl::{export_ascii_stl, export_binary_stl};

#[test]
fn face_pocket_hole_part() {
    let mut k = CsgKernel::new();
    let req = feature_request(json!({
        "units": "mm",
        "stock": block_stock_json(80.0, 60.0, 50.0),
        "csys_list": [
            { "name": "CSYS_TOP", "origin": [0, 0, 25] }
        ],
        "features": [
            {
                "id": "f1",
                "name": "face top",
                "feature_type": "planar_face",
                "params": { "csys_id": "CSYS_TOP", "size_x": 90, "size_y": 70, "depth": 2 }
            },
            {
                "id": "f2",
                "name": "center pocket",
                "feature_type": "pocket_rectangular",
                "params": { "csys_id": "CSYS_TOP", "width": 40, "length": 30, "depth": 10,
                             "corner_radius": 5 }
            },
            {
                "id": "f3",
                "name": "corner hole",
                "feature_type": "simple_hole",
                "params": { "csys_id": "CSYS_TOP", "diameter": 8.5, "depth": 48,
                             "origin_x": 30, "origin_y": 20, "through": true }
            }
        ]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none(), "{:?}", outcome.error);
    assert_eq!(outcome.context.steps.len(), 3);

    let final_bb = bbox(&k, outcome.context.solid);
    assert_relative_eq!(final_bb.max[2], 23.0, epsilon = 1e-6);
    assert_relative_eq!(final_bb.min[2], -25.0, epsilon = 1e-6);
    assert_relative_eq!(final_bb.xlen(), 80.0, epsilon = 1e-6);

    // Pocket reaches 10 below the frame plane; corner rounding keeps the
    // removed volume inside the sharp rectangle.
    let pocket = bbox(&k, outcome.context.steps[1].delta.removed.unwrap());
    assert_relative_eq!(pocket.min[2], 15.0, epsilon = 1e-6);
    assert_relative_eq!(pocket.max[2], 23.0, epsilon = 1e-6);
    assert!(pocket.xlen() <= 40.0 + 1e-6);
    assert!(pocket.ylen() <= 30.0 + 1e-6);

    // Hole removes material under the already-faced top.
    let hole = bbox(&k, outcome.context.steps[2].delta.removed.unwrap());
    assert_relative_eq!(hole.center()[0], 30.0, epsilon = 1e-5);
    assert_relative_eq!(hole.center()[1], 20.0, epsilon = 1e-5);
    assert_relative_eq!(hole.max[2], 23.0, epsilon = 1e-6);
    assert_relative_eq!(hole.min[2], -23.0, epsilon = 1e-6);
}

#[test]
fn additive_feature_grows_the_part() {
    let mut k = CsgKernel::new();
    let req = feature_request(json!({
        "stock": block_stock_json(40.0, 40.0, 20.0),
        "csys_list": [ { "name": "CSYS_TOP", "origin": [0, 0, 10] } ],
        "features": [{
            "id": "boss",
            "feature_type": "simple_hole",
            "params": { "csys_id": "CSYS_TOP", "diameter": 12, "depth": 6,
                         "axis": "+Z", "mode": "add" }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none());
    let step = &outcome.context.steps[0];
    assert!(step.delta.removed.is_none());

    let added = bbox(&k, step.delta.added.unwrap());
    assert_relative_eq!(added.min[2], 10.0, epsilon = 1e-6);
    assert_relative_eq!(added.max[2], 16.0, epsilon = 1e-6);
    let final_bb = bbox(&k, outcome.context.solid);
    assert_relative_eq!(final_bb.max[2], 16.0, epsilon = 1e-6);
}

#[test]
fn final_part_exports_to_stl() {
    let mut k = CsgKernel::new();
    let req = feature_request(json!({
        "stock": block_stock_json(40.0, 40.0, 20.0),
        "csys_list": [ { "name": "CSYS_TOP", "origin": [0, 0, 10] } ],
        "features": [{
            "id": "f1",
            "feature_type": "pocket_rectangular",
            "params": { "csys_id": "CSYS_TOP", "width": 20, "length": 20, "depth": 5 }
        }]
    }));
    let outcome = run_request(&mut k, &req).unwrap();
    assert!(outcome.error.is_none());

    let mesh = k.tessellate(outcome.context.solid, 32).unwrap();
    assert!(mesh.triangle_count() > 0);

    // Stock minus pocket, within voxel slack.
    let volume = mesh_volume(&mesh);
    let expected = 40.0 * 40.0 * 20.0 - 20.0 * 20.0 * 5.0;
    assert!(
        (volume - expected).abs() / expected < 0.05,
        "volume {volume} vs expected {expected}"
    );

    let name = outcome.context.steps[0].file_stem(0);
    let binary = export_binary_stl(&mesh, &name).unwrap();
    assert_eq!(binary.len(), 80 + 4 + mesh.triangle_count() * 50);
    let ascii = export_ascii_stl(&mesh, &name).unwrap();
    assert!(ascii.starts_with("solid f1\n"));
    assert_eq!(
        ascii.matches("facet normal").count(),
        mesh.triangle_count()
    );
}
