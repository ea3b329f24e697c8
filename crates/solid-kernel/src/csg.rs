//! Deterministic implicit-CSG backend.

use std::f64::consts::PI;
use std::sync::Arc;

use nalgebra::{Point3, UnitQuaternion, Vector3};
use slotmap::SlotMap;

use crate::mesh;
use crate::node::{Node, TOL};
use crate::placement::Placement;
use crate::traits::Kernel;
use crate::types::{Bbox, KernelError, SolidHandle, SolidKey, TriMesh};

/// Samples per axis when a bounding box has to be recovered from membership.
const GRID: usize = 65;
/// Samples per cross axis when classifying a selected face.
const CROSS_GRID: usize = 33;
const BISECT_ITERS: usize = 80;

/// CSG-tree kernel. Solids are immutable expression trees; every operation
/// allocates a new handle and existing handles stay valid, so earlier states
/// of a pipeline remain queryable.
pub struct CsgKernel {
    solids: SlotMap<SolidKey, Arc<Node>>,
}

impl CsgKernel {
    pub fn new() -> Self {
        CsgKernel {
            solids: SlotMap::with_key(),
        }
    }

    fn insert(&mut self, node: Node) -> SolidHandle {
        SolidHandle(self.solids.insert(Arc::new(node)))
    }

    fn node(&self, handle: SolidHandle) -> Result<&Arc<Node>, KernelError> {
        self.solids.get(handle.0).ok_or(KernelError::UnknownSolid)
    }

    fn finite_positive(value: f64, what: &str) -> Result<(), KernelError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(KernelError::InvalidGeometry {
                reason: format!("{what} must be finite and positive, got {value}"),
            });
        }
        Ok(())
    }

    fn check_profile(profile: &[[f64; 2]]) -> Result<(), KernelError> {
        if profile.len() < 3 {
            return Err(KernelError::DegenerateProfile {
                reason: format!("polygon needs at least 3 points, got {}", profile.len()),
            });
        }
        for p in profile {
            if !p[0].is_finite() || !p[1].is_finite() {
                return Err(KernelError::DegenerateProfile {
                    reason: "polygon contains a non-finite coordinate".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for CsgKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for CsgKernel {
    fn make_box(&mut self, w: f64, d: f64, h: f64) -> Result<SolidHandle, KernelError> {
        Self::finite_positive(w, "box width")?;
        Self::finite_positive(d, "box depth")?;
        Self::finite_positive(h, "box height")?;
        Ok(self.insert(Node::Block {
            half: Vector3::new(w / 2.0, d / 2.0, h / 2.0),
        }))
    }

    fn make_cylinder(&mut self, dia: f64, h: f64) -> Result<SolidHandle, KernelError> {
        Self::finite_positive(dia, "cylinder diameter")?;
        Self::finite_positive(h, "cylinder height")?;
        Ok(self.insert(Node::Cylinder {
            radius: dia / 2.0,
            z0: -h / 2.0,
            z1: h / 2.0,
        }))
    }

    fn extrude_profile(
        &mut self,
        profile: &[[f64; 2]],
        placement: &Placement,
        distance: f64,
    ) -> Result<SolidHandle, KernelError> {
        Self::check_profile(profile)?;
        if !distance.is_finite() || distance.abs() <= TOL {
            return Err(KernelError::DegenerateProfile {
                reason: format!("extrusion distance {distance} is degenerate"),
            });
        }
        let prism = Node::Extrude {
            poly: profile.to_vec(),
            z0: distance.min(0.0),
            z1: distance.max(0.0),
        };
        Ok(self.insert(Node::Placed {
            iso: placement.iso,
            child: Arc::new(prism),
        }))
    }

    fn extrude_circle(
        &mut self,
        diameter: f64,
        placement: &Placement,
        distance: f64,
    ) -> Result<SolidHandle, KernelError> {
        Self::finite_positive(diameter, "circle diameter")?;
        if !distance.is_finite() || distance.abs() <= TOL {
            return Err(KernelError::DegenerateProfile {
                reason: format!("extrusion distance {distance} is degenerate"),
            });
        }
        let cyl = Node::Cylinder {
            radius: diameter / 2.0,
            z0: distance.min(0.0),
            z1: distance.max(0.0),
        };
        Ok(self.insert(Node::Placed {
            iso: placement.iso,
            child: Arc::new(cyl),
        }))
    }

    fn revolve_profile(
        &mut self,
        profile_rz: &[[f64; 2]],
        placement: &Placement,
        angle_deg: f64,
    ) -> Result<SolidHandle, KernelError> {
        Self::check_profile(profile_rz)?;
        if !angle_deg.is_finite() || angle_deg.abs() <= 1e-9 {
            return Err(KernelError::DegenerateProfile {
                reason: format!("revolution angle {angle_deg} is degenerate"),
            });
        }
        for p in profile_rz {
            if p[0] < -TOL {
                return Err(KernelError::DegenerateProfile {
                    reason: format!("revolved profile has negative radius {}", p[0]),
                });
            }
        }
        let angle_rad = angle_deg.abs().min(360.0).to_radians();
        let spun = Node::Revolve {
            poly: profile_rz.to_vec(),
            angle_rad,
        };
        Ok(self.insert(Node::Placed {
            iso: placement.iso,
            child: Arc::new(spun),
        }))
    }

    fn union(&mut self, a: SolidHandle, b: SolidHandle) -> Result<SolidHandle, KernelError> {
        let (na, nb) = (self.node(a)?.clone(), self.node(b)?.clone());
        Ok(self.insert(Node::Union(na, nb)))
    }

    fn cut(&mut self, a: SolidHandle, b: SolidHandle) -> Result<SolidHandle, KernelError> {
        let (na, nb) = (self.node(a)?.clone(), self.node(b)?.clone());
        Ok(self.insert(Node::Difference(na, nb)))
    }

    fn intersect(&mut self, a: SolidHandle, b: SolidHandle) -> Result<SolidHandle, KernelError> {
        let (na, nb) = (self.node(a)?.clone(), self.node(b)?.clone());
        Ok(self.insert(Node::Intersect(na, nb)))
    }

    fn transformed(
        &mut self,
        solid: SolidHandle,
        placement: &Placement,
    ) -> Result<SolidHandle, KernelError> {
        let child = self.node(solid)?.clone();
        Ok(self.insert(Node::Placed {
            iso: placement.iso,
            child,
        }))
    }

    fn bounding_box(&self, solid: SolidHandle) -> Result<Option<Bbox>, KernelError> {
        Ok(refined_bbox(self.node(solid)?))
    }

    fn face_plane(
        &self,
        solid: SolidHandle,
        selector: &str,
    ) -> Result<Placement, KernelError> {
        let node = self.node(solid)?;
        let (axis, sign) =
            parse_selector(selector).ok_or_else(|| KernelError::SelectorFailed {
                selector: selector.to_string(),
                reason: "unsupported selector; expected one of >X <X >Y <Y >Z <Z".to_string(),
            })?;
        let bb = refined_bbox(node).ok_or_else(|| KernelError::EmptySolid {
            context: format!("face query '{selector}'"),
        })?;
        let plane = if sign > 0.0 { bb.max[axis] } else { bb.min[axis] };
        let (u, v) = cross_axes(axis);

        let us = linspace(bb.min[u], bb.max[u], CROSS_GRID);
        let vs = linspace(bb.min[v], bb.max[v], CROSS_GRID);
        let mut hits: Vec<(f64, f64)> = Vec::new();
        for &uu in &us {
            for &vv in &vs {
                let mut p = Point3::origin();
                p[axis] = plane;
                p[u] = uu;
                p[v] = vv;
                if node.contains(&p) {
                    hits.push((uu, vv));
                }
            }
        }
        if distinct_count(hits.iter().map(|h| h.0)) < 2
            || distinct_count(hits.iter().map(|h| h.1)) < 2
        {
            return Err(KernelError::SelectorFailed {
                selector: selector.to_string(),
                reason: "extreme does not resolve to a planar face".to_string(),
            });
        }

        let inv = 1.0 / hits.len() as f64;
        let cu = hits.iter().map(|h| h.0).sum::<f64>() * inv;
        let cv = hits.iter().map(|h| h.1).sum::<f64>() * inv;
        let mut origin = Point3::origin();
        origin[axis] = plane;
        origin[u] = cu;
        origin[v] = cv;

        let mut normal = Vector3::zeros();
        normal[axis] = sign;
        let rot = UnitQuaternion::rotation_between(&Vector3::z(), &normal)
            .unwrap_or_else(|| UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI));
        tracing::debug!(selector, ?origin, "resolved face plane");
        Ok(Placement {
            iso: nalgebra::Isometry3::from_parts(origin.coords.into(), rot),
        })
    }

    fn tessellate(&self, solid: SolidHandle, resolution: u32) -> Result<TriMesh, KernelError> {
        mesh::tessellate(self.node(solid)?, resolution)
    }
}

fn parse_selector(selector: &str) -> Option<(usize, f64)> {
    match selector.trim() {
        ">X" => Some((0, 1.0)),
        "<X" => Some((0, -1.0)),
        ">Y" => Some((1, 1.0)),
        "<Y" => Some((1, -1.0)),
        ">Z" => Some((2, 1.0)),
        "<Z" => Some((2, -1.0)),
        _ => None,
    }
}

fn cross_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n < 2 || hi <= lo {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + i as f64 * step).collect()
}

fn distinct_count(values: impl Iterator<Item = f64>) -> usize {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut count = 0;
    let mut last = f64::NEG_INFINITY;
    for v in sorted {
        if v - last > 1e-6 {
            count += 1;
            last = v;
        }
    }
    count
}

/// Bounding box recovered from membership when no tight analytic bound
/// exists: sample a grid inside the conservative interval bound, then push
/// each extreme layer outward by bisection.
fn refined_bbox(node: &Node) -> Option<Bbox> {
    if let Some(bb) = node.exact_bbox() {
        return Some(bb);
    }
    let cons = node.conservative_bbox()?;
    let coords = [
        linspace(cons.min[0], cons.max[0], GRID),
        linspace(cons.min[1], cons.max[1], GRID),
        linspace(cons.min[2], cons.max[2], GRID),
    ];
    let dims = [coords[0].len(), coords[1].len(), coords[2].len()];
    let flat = |i: usize, j: usize, k: usize| (i * dims[1] + j) * dims[2] + k;

    let mut filled = vec![false; dims[0] * dims[1] * dims[2]];
    let mut lo = dims;
    let mut hi = [0usize; 3];
    let mut any = false;
    for i in 0..dims[0] {
        for j in 0..dims[1] {
            for k in 0..dims[2] {
                let p = Point3::new(coords[0][i], coords[1][j], coords[2][k]);
                if node.contains(&p) {
                    filled[flat(i, j, k)] = true;
                    any = true;
                    let at = [i, j, k];
                    for a in 0..3 {
                        lo[a] = lo[a].min(at[a]);
                        hi[a] = hi[a].max(at[a]);
                    }
                }
            }
        }
    }
    if !any {
        return None;
    }

    let mut min = [0.0; 3];
    let mut max = [0.0; 3];
    for axis in 0..3 {
        max[axis] = refine_face(node, &coords, &filled, dims, axis, hi[axis], cons.max[axis]);
        min[axis] = refine_face(node, &coords, &filled, dims, axis, lo[axis], cons.min[axis]);
    }
    Some(Bbox::new(min, max))
}

/// Push one bounding face from its extreme sample layer toward the
/// conservative limit along every filled sample column of that layer.
fn refine_face(
    node: &Node,
    coords: &[Vec<f64>; 3],
    filled: &[bool],
    dims: [usize; 3],
    axis: usize,
    layer: usize,
    limit: f64,
) -> f64 {
    let flat = |at: [usize; 3]| (at[0] * dims[1] + at[1]) * dims[2] + at[2];
    let (u, v) = cross_axes(axis);
    let toward_max = limit >= coords[axis][layer];
    let dir = if toward_max { 1.0 } else { -1.0 };
    let mut best = coords[axis][layer];

    for i in 0..dims[u] {
        for j in 0..dims[v] {
            let mut at = [0usize; 3];
            at[axis] = layer;
            at[u] = i;
            at[v] = j;
            if !filled[flat(at)] {
                continue;
            }
            let mut p = Point3::new(coords[0][at[0]], coords[1][at[1]], coords[2][at[2]]);
            // Skip columns with no material just past the current best.
            p[axis] = best + dir * 1e-7;
            if (p[axis] - limit) * dir > 0.0 || !node.contains(&p) {
                continue;
            }
            let found = bisect_boundary(node, p, axis, limit);
            best = if toward_max {
                best.max(found)
            } else {
                best.min(found)
            };
            if (best - limit).abs() <= 1e-12 {
                return limit;
            }
        }
    }
    best
}

/// `start` classifies inside; find the boundary crossing between it and
/// `limit` along `axis`.
fn bisect_boundary(node: &Node, start: Point3<f64>, axis: usize, limit: f64) -> f64 {
    let mut probe = start;
    probe[axis] = limit;
    if node.contains(&probe) {
        return limit;
    }
    let mut inside = start[axis];
    let mut outside = limit;
    for _ in 0..BISECT_ITERS {
        let mid = 0.5 * (inside + outside);
        probe[axis] = mid;
        if node.contains(&probe) {
            inside = mid;
        } else {
            outside = mid;
        }
        if (outside - inside).abs() < 1e-12 {
            break;
        }
    }
    inside
}
