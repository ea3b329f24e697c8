//! Implicit CSG representation: membership classification and interval
//! bounding boxes.

use std::sync::Arc;

use nalgebra::{Isometry3, Point3, Vector3};

use crate::types::Bbox;

/// Membership tolerance. Solids are closed: points on the boundary classify
/// as inside.
pub(crate) const TOL: f64 = 1e-9;

const FULL_TURN: f64 = std::f64::consts::TAU;

#[derive(Debug)]
pub(crate) enum Node {
    Block {
        half: Vector3<f64>,
    },
    Cylinder {
        radius: f64,
        z0: f64,
        z1: f64,
    },
    /// Prism over a closed XY polygon, local Z in `z0..z1`.
    Extrude {
        poly: Vec<[f64; 2]>,
        z0: f64,
        z1: f64,
    },
    /// Revolution of a closed (radius, z) polygon about local Z.
    Revolve {
        poly: Vec<[f64; 2]>,
        angle_rad: f64,
    },
    Placed {
        iso: Isometry3<f64>,
        child: Arc<Node>,
    },
    Union(Arc<Node>, Arc<Node>),
    Intersect(Arc<Node>, Arc<Node>),
    Difference(Arc<Node>, Arc<Node>),
}

impl Node {
    pub(crate) fn contains(&self, p: &Point3<f64>) -> bool {
        match self {
            Node::Block { half } => {
                p.x.abs() <= half.x + TOL && p.y.abs() <= half.y + TOL && p.z.abs() <= half.z + TOL
            }
            Node::Cylinder { radius, z0, z1 } => {
                p.z >= z0 - TOL && p.z <= z1 + TOL && p.x.hypot(p.y) <= radius + TOL
            }
            Node::Extrude { poly, z0, z1 } => {
                p.z >= z0 - TOL && p.z <= z1 + TOL && point_in_polygon(poly, p.x, p.y)
            }
            Node::Revolve { poly, angle_rad } => {
                let r = p.x.hypot(p.y);
                if *angle_rad < FULL_TURN - 1e-9 && r > TOL {
                    let theta = p.y.atan2(p.x).rem_euclid(FULL_TURN);
                    if theta > angle_rad + 1e-9 {
                        return false;
                    }
                }
                point_in_polygon(poly, r, p.z)
            }
            Node::Placed { iso, child } => child.contains(&iso.inverse_transform_point(p)),
            Node::Union(a, b) => a.contains(p) || b.contains(p),
            Node::Intersect(a, b) => a.contains(p) && b.contains(p),
            Node::Difference(a, b) => a.contains(p) && !b.contains(p),
        }
    }

    /// Interval bound: guaranteed to enclose the solid, possibly loose for
    /// rotated or boolean shapes.
    pub(crate) fn conservative_bbox(&self) -> Option<Bbox> {
        match self {
            Node::Block { half } => Some(Bbox::new(
                [-half.x, -half.y, -half.z],
                [half.x, half.y, half.z],
            )),
            Node::Cylinder { radius, z0, z1 } => {
                Some(Bbox::new([-radius, -radius, *z0], [*radius, *radius, *z1]))
            }
            Node::Extrude { poly, z0, z1 } => {
                let (min, max) = polygon_bounds(poly)?;
                Some(Bbox::new([min[0], min[1], *z0], [max[0], max[1], *z1]))
            }
            Node::Revolve { poly, .. } => {
                let (min, max) = polygon_bounds(poly)?;
                let r = max[0].abs().max(min[0].abs());
                Some(Bbox::new([-r, -r, min[1]], [r, r, max[1]]))
            }
            Node::Placed { iso, child } => child
                .conservative_bbox()
                .map(|bb| bb.transformed_corners(iso)),
            Node::Union(a, b) => match (a.conservative_bbox(), b.conservative_bbox()) {
                (Some(x), Some(y)) => Some(x.hull(&y)),
                (Some(x), None) | (None, Some(x)) => Some(x),
                (None, None) => None,
            },
            Node::Intersect(a, b) => a
                .conservative_bbox()
                .zip(b.conservative_bbox())
                .and_then(|(x, y)| x.overlap(&y)),
            Node::Difference(a, _) => a.conservative_bbox(),
        }
    }

    /// Bound known to be tight without sampling: primitive leaves, full
    /// revolutions, translated exact children, rotated blocks, and unions of
    /// exact bounds.
    pub(crate) fn exact_bbox(&self) -> Option<Bbox> {
        match self {
            Node::Block { .. } | Node::Cylinder { .. } | Node::Extrude { .. } => {
                self.conservative_bbox()
            }
            Node::Revolve { angle_rad, .. } if *angle_rad >= FULL_TURN - 1e-9 => {
                self.conservative_bbox()
            }
            Node::Placed { iso, child } => {
                if iso.rotation.angle() < 1e-12 {
                    child.exact_bbox().map(|bb| bb.transformed_corners(iso))
                } else if matches!(child.as_ref(), Node::Block { .. }) {
                    child.exact_bbox().map(|bb| bb.transformed_corners(iso))
                } else {
                    None
                }
            }
            Node::Union(a, b) => match (a.exact_bbox(), b.exact_bbox()) {
                (Some(x), Some(y)) => Some(x.hull(&y)),
                _ => None,
            },
            _ => None,
        }
    }
}

fn polygon_bounds(poly: &[[f64; 2]]) -> Option<([f64; 2], [f64; 2])> {
    let first = poly.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in poly {
        min[0] = min[0].min(p[0]);
        min[1] = min[1].min(p[1]);
        max[0] = max[0].max(p[0]);
        max[1] = max[1].max(p[1]);
    }
    Some((min, max))
}

/// Even-odd test; points on the boundary count as inside.
pub(crate) fn point_in_polygon(poly: &[[f64; 2]], x: f64, y: f64) -> bool {
    let n = poly.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        if dist_point_segment(x, y, poly[i], poly[(i + 1) % n]) <= TOL {
            return true;
        }
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (poly[i][0], poly[i][1]);
        let (xj, yj) = (poly[j][0], poly[j][1]);
        if (yi > y) != (yj > y) {
            let t = (y - yi) / (yj - yi);
            if x < xi + t * (xj - xi) {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn dist_point_segment(x: f64, y: f64, a: [f64; 2], b: [f64; 2]) -> f64 {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len2 = dx * dx + dy * dy;
    if len2 < TOL * TOL {
        return (x - a[0]).hypot(y - a[1]);
    }
    let t = (((x - a[0]) * dx + (y - a[1]) * dy) / len2).clamp(0.0, 1.0);
    (x - (a[0] + t * dx)).hypot(y - (a[1] + t * dy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_membership_includes_boundary() {
        let square = vec![[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        assert!(point_in_polygon(&square, 0.0, 0.0));
        assert!(point_in_polygon(&square, 1.0, 0.5));
        assert!(point_in_polygon(&square, 1.0, 1.0));
        assert!(!point_in_polygon(&square, 1.0 + 1e-6, 0.0));
    }

    #[test]
    fn concave_polygon_membership() {
        // L-shape: notch in the upper right quadrant.
        let ell = vec![
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ];
        assert!(point_in_polygon(&ell, 0.5, 1.5));
        assert!(point_in_polygon(&ell, 1.5, 0.5));
        assert!(!point_in_polygon(&ell, 1.5, 1.5));
    }

    #[test]
    fn difference_membership_is_closed_on_the_removed_side() {
        let a = Arc::new(Node::Block {
            half: Vector3::new(1.0, 1.0, 1.0),
        });
        let b = Arc::new(Node::Block {
            half: Vector3::new(2.0, 2.0, 0.5),
        });
        let diff = Node::Difference(a, b);
        assert!(diff.contains(&Point3::new(0.0, 0.0, 0.9)));
        assert!(!diff.contains(&Point3::new(0.0, 0.0, 0.4)));
        assert!(!diff.contains(&Point3::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn partial_revolve_respects_sweep_angle() {
        let profile = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let quarter = Node::Revolve {
            poly: profile,
            angle_rad: std::f64::consts::FRAC_PI_2,
        };
        assert!(quarter.contains(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!quarter.contains(&Point3::new(0.5, -0.5, 0.5)));
    }
}
