//! Helper functions: error type, request constructors, bbox shortcuts,
//! mesh math.

use chip_types::request::FeatureRequest;
use solid_kernel::csg::CsgKernel;
use solid_kernel::traits::Kernel;
use solid_kernel::types::{Bbox, SolidHandle, TriMesh};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("STL error: {reason}")]
    StlError { reason: String },
}

// ── Request Constructors ────────────────────────────────────────────────────

/// Parse a JSON literal into a feature request, panicking on malformed test
/// input.
pub fn feature_request(value: serde_json::Value) -> FeatureRequest {
    serde_json::from_value(value).expect("test request must parse")
}

pub fn block_stock_json(w: f64, d: f64, h: f64) -> serde_json::Value {
    serde_json::json!({ "type": "block", "params": { "w": w, "d": d, "h": h } })
}

pub fn cylinder_stock_json(dia: f64, h: f64) -> serde_json::Value {
    serde_json::json!({ "type": "cylinder", "params": { "dia": dia, "h": h } })
}

// ── Bbox Shortcuts ──────────────────────────────────────────────────────────

/// Bounding box of a solid that must exist and must not be empty.
pub fn bbox(kernel: &CsgKernel, solid: SolidHandle) -> Bbox {
    kernel
        .bounding_box(solid)
        .expect("solid handle must be live")
        .expect("solid must not be empty")
}

/// Diameter of a solid measured across X at its widest, assuming a part
/// turned about Z.
pub fn turned_diameter(kernel: &CsgKernel, solid: SolidHandle) -> f64 {
    bbox(kernel, solid).xlen()
}

/// Bounding box of the solid clipped to a Z band, for inspecting one
/// diameter step of a turned part.
pub fn band_bbox(kernel: &mut CsgKernel, solid: SolidHandle, z0: f64, z1: f64) -> Bbox {
    let bb = bbox(kernel, solid);
    let margin = bb.xlen().max(bb.ylen());
    let half = margin / 2.0 + 1.0;
    let slab = kernel
        .extrude_profile(
            &[
                [-half, -half],
                [half, -half],
                [half, half],
                [-half, half],
            ],
            &solid_kernel::placement::Placement::translation([0.0, 0.0, z0]),
            z1 - z0,
        )
        .expect("band slab must build");
    let clipped = kernel.intersect(solid, slab).expect("band clip must apply");
    bbox(kernel, clipped)
}

// ── Mesh Math ───────────────────────────────────────────────────────────────

/// Signed volume of a closed triangle mesh (positive for outward winding).
pub fn mesh_volume(mesh: &TriMesh) -> f64 {
    let mut volume = 0.0;
    for tri in mesh.indices.chunks(3) {
        let v = |i: u32| {
            let at = i as usize * 3;
            [
                mesh.vertices[at] as f64,
                mesh.vertices[at + 1] as f64,
                mesh.vertices[at + 2] as f64,
            ]
        };
        let (a, b, c) = (v(tri[0]), v(tri[1]), v(tri[2]));
        let cross = [
            b[1] * c[2] - b[2] * c[1],
            b[2] * c[0] - b[0] * c[2],
            b[0] * c[1] - b[1] * c[0],
        ];
        volume += (a[0] * cross[0] + a[1] * cross[1] + a[2] * cross[2]) / 6.0;
    }
    volume
}

/// Total surface area of a triangle mesh.
pub fn mesh_surface_area(mesh: &TriMesh) -> f64 {
    let mut area = 0.0;
    for tri in mesh.indices.chunks(3) {
        let v = |i: u32| {
            let at = i as usize * 3;
            [
                mesh.vertices[at] as f64,
                mesh.vertices[at + 1] as f64,
                mesh.vertices[at + 2] as f64,
            ]
        };
        let (a, b, c) = (v(tri[0]), v(tri[1]), v(tri[2]));
        let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let cross = [
            ab[1] * ac[2] - ab[2] * ac[1],
            ab[2] * ac[0] - ab[0] * ac[2],
            ab[0] * ac[1] - ab[1] * ac[0],
        ];
        area += (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt() / 2.0;
    }
    area
}
