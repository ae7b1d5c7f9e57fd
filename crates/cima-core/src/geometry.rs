//! Planar vector geometry for joint-angle derivation.

use nalgebra::Vector2;

/// Unsigned planar angle between two 2D vectors, in `[0, π]`.
///
/// Uses `|atan2(det, dot)|`, which is invariant to the magnitude of either
/// vector and needs no normalization, so near-parallel or tiny vectors do
/// not hit an arccosine domain edge. NaN components propagate to a NaN
/// angle.
pub fn planar_angle(v1: &Vector2<f64>, v2: &Vector2<f64>) -> f64 {
    let det = v1.x * v2.y - v1.y * v2.x;
    det.atan2(v1.dot(v2)).abs()
}

/// Calculate angle between two vectors via unit-vector arccosine.
///
/// General-purpose helper; the derivation pipeline uses [`planar_angle`]
/// instead. Returns 0 for degenerate (near zero-length) inputs.
pub fn angle_between(v1: &Vector2<f64>, v2: &Vector2<f64>) -> f64 {
    let dot = v1.dot(v2);
    let norms = v1.norm() * v2.norm();
    if norms < 1e-10 {
        0.0
    } else {
        (dot / norms).clamp(-1.0, 1.0).acos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_right_angle() {
        let v1 = Vector2::new(0.0, 1.0);
        let v2 = Vector2::new(1.0, 0.0);
        assert!((planar_angle(&v1, &v2) - PI / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_opposite_vectors() {
        let v1 = Vector2::new(-1.0, 0.0);
        let v2 = Vector2::new(1.0, 0.0);
        assert!((planar_angle(&v1, &v2) - PI).abs() < 1e-10);
    }

    #[test]
    fn test_parallel_vectors() {
        let v1 = Vector2::new(2.0, 3.0);
        let v2 = Vector2::new(4.0, 6.0);
        assert!(planar_angle(&v1, &v2).abs() < 1e-10);
    }

    #[test]
    fn test_magnitude_invariance() {
        let v1 = Vector2::new(1.0, 2.0);
        let v2 = Vector2::new(-3.0, 0.5);
        let base = planar_angle(&v1, &v2);
        assert!((planar_angle(&(v1 * 1000.0), &v2) - base).abs() < 1e-10);
        assert!((planar_angle(&v1, &(v2 * 1e-6)) - base).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry() {
        let v1 = Vector2::new(0.3, -0.7);
        let v2 = Vector2::new(-1.2, 0.4);
        assert!((planar_angle(&v1, &v2) - planar_angle(&v2, &v1)).abs() < 1e-12);
    }

    #[test]
    fn test_range() {
        let vectors = [
            Vector2::new(1.0, 0.0),
            Vector2::new(-1.0, 1.0),
            Vector2::new(0.0, -5.0),
            Vector2::new(3.0, 4.0),
        ];
        for a in &vectors {
            for b in &vectors {
                let angle = planar_angle(a, b);
                assert!((0.0..=PI).contains(&angle));
            }
        }
    }

    #[test]
    fn test_nan_passthrough() {
        let v1 = Vector2::new(f64::NAN, 0.0);
        let v2 = Vector2::new(1.0, 0.0);
        assert!(planar_angle(&v1, &v2).is_nan());
    }

    #[test]
    fn test_angle_between_matches_planar() {
        let v1 = Vector2::new(1.0, 2.0);
        let v2 = Vector2::new(-0.5, 1.5);
        assert!((angle_between(&v1, &v2) - planar_angle(&v1, &v2)).abs() < 1e-10);
    }

    #[test]
    fn test_angle_between_degenerate() {
        let zero = Vector2::new(0.0, 0.0);
        let v = Vector2::new(1.0, 0.0);
        assert_eq!(angle_between(&zero, &v), 0.0);
    }
}
