//! Polygon triangulation.

use anyhow::bail;
use cgmath::{InnerSpace, Point3, Vector2, Vector3};

/// Splits a polygon into triangles, appending them to `results`.
///
/// `polygon` holds indices into `positions` in winding order. Triangles keep
/// the winding of the polygon.
pub(super) fn triangulate(
    positions: &[Point3<f32>],
    polygon: &[u32],
    results: &mut Vec<[u32; 3]>,
) -> anyhow::Result<()> {
    match polygon.len() {
        n @ 0..=2 => bail!("Not enough vertices in the polygon: length={}", n),
        3 => {
            corners(positions, polygon)?;
            results.push([polygon[0], polygon[1], polygon[2]]);
            Ok(())
        }
        4 => {
            let p = corners(positions, polygon)?;
            // Normals at corners 1 and 3 agree when the diagonal 0-2 lies
            // inside the quadrangle.
            let n1 = (p[1] - p[0]).cross(p[2] - p[1]);
            let n3 = (p[3] - p[2]).cross(p[0] - p[3]);
            if n1.dot(n3) >= 0.0 {
                results.push([polygon[0], polygon[1], polygon[2]]);
                results.push([polygon[0], polygon[2], polygon[3]]);
            } else {
                results.push([polygon[1], polygon[2], polygon[3]]);
                results.push([polygon[1], polygon[3], polygon[0]]);
            }
            Ok(())
        }
        n => {
            let flat = flatten(&corners(positions, polygon)?);
            // Turn direction at each corner.
            let turns = (0..n)
                .map(|i| {
                    let prev = flat[(i + n - 1) % n];
                    let next = flat[(i + 1) % n];
                    (flat[i] - prev).perp_dot(next - flat[i]) > 0.0
                })
                .collect::<Vec<_>>();
            let left = turns.iter().filter(|&&t| t).count();
            if left > 1 && left < n - 1 {
                bail!(
                    "Unsupported polygon: {}-gon with two or more concave corners",
                    n
                );
            }
            // At most one corner turns against the others; fan from it so
            // every triangle stays inside the polygon.
            let minority = left <= 1;
            let apex = turns.iter().position(|&t| t == minority).unwrap_or(0);
            for k in 1..n - 1 {
                results.push([
                    polygon[apex],
                    polygon[(apex + k) % n],
                    polygon[(apex + k + 1) % n],
                ]);
            }
            Ok(())
        }
    }
}

/// Looks up the polygon corners.
fn corners(positions: &[Point3<f32>], polygon: &[u32]) -> anyhow::Result<Vec<Point3<f32>>> {
    polygon
        .iter()
        .map(|&i| match positions.get(i as usize) {
            Some(&p) => Ok(p),
            None => bail!("Vertex index out of range: index={}", i),
        })
        .collect()
}

/// Drops the axis along which the polygon is thinnest.
fn flatten(points: &[Point3<f32>]) -> Vec<Vector2<f32>> {
    // Newell's method gives the polygon normal even for non-planar input.
    let normal = (0..points.len()).fold(Vector3::new(0.0, 0.0, 0.0), |acc, i| {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        acc + Vector3::new(
            (a.y - b.y) * (a.z + b.z),
            (a.z - b.z) * (a.x + b.x),
            (a.x - b.x) * (a.y + b.y),
        )
    });
    let abs = Vector3::new(normal.x.abs(), normal.y.abs(), normal.z.abs());
    points
        .iter()
        .map(|p| {
            if abs.x >= abs.y && abs.x >= abs.z {
                Vector2::new(p.y, p.z)
            } else if abs.y >= abs.z {
                Vector2::new(p.z, p.x)
            } else {
                Vector2::new(p.x, p.y)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[[f32; 2]]) -> Vec<Point3<f32>> {
        coords.iter().map(|c| Point3::new(c[0], c[1], 0.0)).collect()
    }

    #[test]
    fn triangle_passes_through() {
        let positions = pts(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let mut results = Vec::new();
        triangulate(&positions, &[2, 0, 1], &mut results).expect("triangle");
        assert_eq!(results, vec![[2, 0, 1]]);
    }

    #[test]
    fn degenerate_polygon() {
        let positions = pts(&[[0.0, 0.0], [1.0, 0.0]]);
        let mut results = Vec::new();
        assert!(triangulate(&positions, &[0, 1], &mut results).is_err());
        assert!(triangulate(&positions, &[0, 1, 5], &mut results).is_err());
    }

    #[test]
    fn concave_quad_uses_inner_diagonal() {
        // Corner 2 is concave, so the 0-2 diagonal is the only valid cut.
        let positions = pts(&[[0.0, 0.0], [2.0, 0.0], [0.5, 0.5], [0.0, 2.0]]);
        let mut results = Vec::new();
        triangulate(&positions, &[0, 1, 2, 3], &mut results).expect("quad");
        assert_eq!(results, vec![[0, 1, 2], [0, 2, 3]]);

        // Rotated labels: concave corner 3 forces the 1-3 diagonal.
        let mut results = Vec::new();
        triangulate(&positions, &[3, 0, 1, 2], &mut results).expect("quad");
        assert_eq!(results, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn convex_pentagon_is_fanned() {
        let positions = pts(&[[0.0, 0.0], [2.0, 0.0], [3.0, 1.0], [1.0, 3.0], [-1.0, 1.0]]);
        let mut results = Vec::new();
        triangulate(&positions, &[0, 1, 2, 3, 4], &mut results).expect("pentagon");
        assert_eq!(results, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
    }

    #[test]
    fn pentagon_with_one_concave_corner() {
        // Corner 3 points inward.
        let positions = pts(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [2.0, 1.0], [0.0, 4.0]]);
        let mut results = Vec::new();
        triangulate(&positions, &[0, 1, 2, 3, 4], &mut results).expect("pentagon");
        assert_eq!(results, vec![[3, 4, 0], [3, 0, 1], [3, 1, 2]]);
    }
}
