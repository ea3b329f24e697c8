//! Closed 2D profile construction.

use chip_types::feature::ProfilePoint;

use crate::types::OpError;

/// Segments per quarter arc when rounding pocket corners.
const CORNER_SEGMENTS: usize = 8;

/// Points closer than this collapse during loop cleanup.
const MERGE_TOL: f64 = 1e-9;

/// Centered rectangle in local XY, optionally with rounded corners.
///
/// `corner_radius` up to `min(width, length) / 2` is honored by a
/// discretized arc at each corner; zero gives the plain four-point loop.
pub fn rect_profile(width: f64, length: f64, corner_radius: f64) -> Result<Vec<[f64; 2]>, OpError> {
    if !(width.is_finite() && width > 0.0) || !(length.is_finite() && length > 0.0) {
        return Err(OpError::invalid(format!(
            "rectangle sides must be positive, got {width} x {length}"
        )));
    }
    if !corner_radius.is_finite() || corner_radius < 0.0 {
        return Err(OpError::invalid(format!(
            "corner radius must be non-negative, got {corner_radius}"
        )));
    }
    let limit = width.min(length) / 2.0;
    if corner_radius > limit + MERGE_TOL {
        return Err(OpError::invalid(format!(
            "corner radius {corner_radius} exceeds half the short side ({limit})"
        )));
    }

    let (hw, hl) = (width / 2.0, length / 2.0);
    if corner_radius <= MERGE_TOL {
        return Ok(vec![[-hw, -hl], [hw, -hl], [hw, hl], [-hw, hl]]);
    }

    let r = corner_radius;
    // Corner arc centers, counterclockwise starting in the +X/+Y quadrant.
    let centers = [
        [hw - r, hl - r],
        [-(hw - r), hl - r],
        [-(hw - r), -(hl - r)],
        [hw - r, -(hl - r)],
    ];
    let mut poly: Vec<[f64; 2]> = Vec::with_capacity(4 * (CORNER_SEGMENTS + 1));
    for (corner, center) in centers.iter().enumerate() {
        let start = std::f64::consts::FRAC_PI_2 * corner as f64;
        for s in 0..=CORNER_SEGMENTS {
            let a = start + std::f64::consts::FRAC_PI_2 * s as f64 / CORNER_SEGMENTS as f64;
            poly.push([center[0] + r * a.cos(), center[1] + r * a.sin()]);
        }
    }
    dedup_loop(&mut poly);
    Ok(poly)
}

/// Closed (radius, z) loop from an axial Z-diameter polyline.
///
/// Offsets are measured from the stock's axial minimum: each point maps to
/// `(dia / 2, stock_z_min + z)`. The loop closes over the rotation axis so a
/// revolution produces a solid of revolution. Non-monotonic Z (undercuts) is
/// allowed.
pub fn axial_profile(
    points: &[ProfilePoint],
    stock_z_min: f64,
) -> Result<Vec<[f64; 2]>, OpError> {
    if points.len() < 2 {
        return Err(OpError::invalid(format!(
            "axial profile needs at least 2 points, got {}",
            points.len()
        )));
    }
    for (i, p) in points.iter().enumerate() {
        if !p.z.is_finite() || !p.dia.is_finite() {
            return Err(OpError::invalid(format!(
                "axial profile point {i} has a non-finite coordinate"
            )));
        }
        if p.dia <= 0.0 {
            return Err(OpError::invalid(format!(
                "axial profile point {i} has non-positive diameter {}",
                p.dia
            )));
        }
    }
    for (i, pair) in points.windows(2).enumerate() {
        if (pair[0].z - pair[1].z).abs() <= MERGE_TOL
            && (pair[0].dia - pair[1].dia).abs() <= MERGE_TOL
        {
            return Err(OpError::invalid(format!(
                "axial profile repeats point {i} exactly"
            )));
        }
    }

    let first = points[0];
    let last = points[points.len() - 1];
    if (first.z - last.z).abs() <= MERGE_TOL {
        return Err(OpError::invalid(
            "axial profile spans zero length along the axis",
        ));
    }

    let mut poly: Vec<[f64; 2]> = points
        .iter()
        .map(|p| [p.dia / 2.0, stock_z_min + p.z])
        .collect();
    // Close over the rotation axis.
    poly.push([0.0, stock_z_min + last.z]);
    poly.push([0.0, stock_z_min + first.z]);
    dedup_loop(&mut poly);
    if poly.len() < 3 {
        return Err(OpError::invalid("axial profile degenerates after cleanup"));
    }
    Ok(poly)
}

fn dedup_loop(poly: &mut Vec<[f64; 2]>) {
    poly.dedup_by(|a, b| (a[0] - b[0]).abs() <= MERGE_TOL && (a[1] - b[1]).abs() <= MERGE_TOL);
    while poly.len() > 1 {
        let first = poly[0];
        let last = poly[poly.len() - 1];
        if (first[0] - last[0]).abs() <= MERGE_TOL && (first[1] - last[1]).abs() <= MERGE_TOL {
            poly.pop();
        } else {
            break;
        }
    }
}
