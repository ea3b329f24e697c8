//! Blocky boundary tessellation over the membership function.
//!
//! The solid is voxelized on a padded uniform grid; every face between a
//! filled and an empty cell becomes a quad. Good enough for export and
//! visual inspection, and fully deterministic.

use nalgebra::Point3;

use crate::node::Node;
use crate::types::{KernelError, TriMesh};

// Base quad corner order for a +axis face, as (du, dv) steps in the two
// cross axes. Axis Y flips because its cross pair (X, Z) is left-handed.
const QUAD: [(usize, usize); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

pub(crate) fn tessellate(node: &Node, resolution: u32) -> Result<TriMesh, KernelError> {
    let bb = node.conservative_bbox().ok_or_else(|| KernelError::EmptySolid {
        context: "tessellation".to_string(),
    })?;
    let n = resolution.clamp(8, 64) as usize;
    let size = bb.size();
    let longest = size[0].max(size[1]).max(size[2]);
    if longest <= 0.0 {
        return Err(KernelError::EmptySolid {
            context: "tessellation of zero-extent solid".to_string(),
        });
    }
    let cell = longest / n as f64;

    // One empty pad cell on every side so the boundary closes.
    let mut dims = [0usize; 3];
    let mut origin = [0.0; 3];
    for a in 0..3 {
        dims[a] = (size[a] / cell).ceil() as usize + 2;
        origin[a] = bb.min[a] - cell;
    }

    let idx = |i: usize, j: usize, k: usize| (i * dims[1] + j) * dims[2] + k;
    let mut filled = vec![false; dims[0] * dims[1] * dims[2]];
    let mut any = false;
    for i in 0..dims[0] {
        for j in 0..dims[1] {
            for k in 0..dims[2] {
                let p = Point3::new(
                    origin[0] + (i as f64 + 0.5) * cell,
                    origin[1] + (j as f64 + 0.5) * cell,
                    origin[2] + (k as f64 + 0.5) * cell,
                );
                if node.contains(&p) {
                    filled[idx(i, j, k)] = true;
                    any = true;
                }
            }
        }
    }
    if !any {
        return Err(KernelError::EmptySolid {
            context: "tessellation".to_string(),
        });
    }

    let mut mesh = TriMesh::default();
    for i in 0..dims[0] {
        for j in 0..dims[1] {
            for k in 0..dims[2] {
                let here = filled[idx(i, j, k)];
                let cell_idx = [i, j, k];
                for axis in 0..3 {
                    if cell_idx[axis] + 1 >= dims[axis] {
                        continue;
                    }
                    let mut next = cell_idx;
                    next[axis] += 1;
                    let there = filled[idx(next[0], next[1], next[2])];
                    if here == there {
                        continue;
                    }
                    // Face at the shared grid plane, normal toward the
                    // empty cell.
                    let positive = here;
                    emit_face(&mut mesh, origin, cell, next, axis, positive);
                }
            }
        }
    }
    Ok(mesh)
}

fn cross_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn emit_face(
    mesh: &mut TriMesh,
    origin: [f64; 3],
    cell: f64,
    plane_cell: [usize; 3],
    axis: usize,
    positive: bool,
) {
    let (u, v) = cross_axes(axis);
    // The Y cross pair is left-handed, so its winding flips.
    let reverse = positive == (axis == 1);
    let base = mesh.vertex_count() as u32;
    let plane = origin[axis] + plane_cell[axis] as f64 * cell;
    let normal = if positive { 1.0f32 } else { -1.0 };

    for step in 0..4 {
        let (du, dv) = if reverse { QUAD[3 - step] } else { QUAD[step] };
        let mut p = [0.0f64; 3];
        p[axis] = plane;
        p[u] = origin[u] + (plane_cell[u] + du) as f64 * cell;
        p[v] = origin[v] + (plane_cell[v] + dv) as f64 * cell;
        mesh.vertices
            .extend_from_slice(&[p[0] as f32, p[1] as f32, p[2] as f32]);
        let mut nvec = [0.0f32; 3];
        nvec[axis] = normal;
        mesh.normals.extend_from_slice(&nvec);
    }
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}
