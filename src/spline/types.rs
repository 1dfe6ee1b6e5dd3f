use bevy::prelude::*;

/// Read access to a curve's control points, indexed `0..point_count()`.
///
/// Positions and tangents share the curve's local space. Indexing outside
/// `0..point_count()` is a caller error.
pub trait CurveModel {
    /// Number of control points on the curve.
    fn point_count(&self) -> usize;

    /// Position of control point `index`.
    fn position(&self, index: usize) -> Vec3;

    /// Tangent of the curve at control point `index`.
    fn tangent(&self, index: usize) -> Vec3;
}

/// A single control point of a [`Spline`](super::Spline).
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Default)]
pub struct SplinePoint {
    /// Position in the spline's local space.
    pub position: Vec3,
    /// Explicit tangent. `None` lets the spline compute one from its neighbours.
    pub tangent: Option<Vec3>,
}

impl SplinePoint {
    /// A point with an automatic tangent.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            tangent: None,
        }
    }

    /// A point with an explicit tangent.
    pub fn with_tangent(position: Vec3, tangent: Vec3) -> Self {
        Self {
            position,
            tangent: Some(tangent),
        }
    }
}

impl From<Vec3> for SplinePoint {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

/// Compute the automatic tangent for point `index`.
///
/// End points use the one-sided difference to their neighbour, interior
/// points half the difference between their two neighbours. `tension`
/// scales the result by `1 - tension`.
pub fn auto_tangent(points: &[SplinePoint], index: usize, tension: f32) -> Vec3 {
    let n = points.len();
    if n < 2 || index >= n {
        return Vec3::ZERO;
    }

    let scale = 1.0 - tension;
    let tangent = if index == 0 {
        points[1].position - points[0].position
    } else if index == n - 1 {
        points[n - 1].position - points[n - 2].position
    } else {
        0.5 * (points[index + 1].position - points[index - 1].position)
    };

    tangent * scale
}

/// Cubic Hermite interpolation between two position/tangent pairs.
pub fn hermite(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p0 * h00 + m0 * h10 + p1 * h01 + m1 * h11
}

/// Derivative of [`hermite`] with respect to `t`.
pub fn hermite_derivative(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;

    let d00 = 6.0 * t2 - 6.0 * t;
    let d10 = 3.0 * t2 - 4.0 * t + 1.0;
    let d01 = -6.0 * t2 + 6.0 * t;
    let d11 = 3.0 * t2 - 2.0 * t;

    p0 * d00 + m0 * d10 + p1 * d01 + m1 * d11
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(positions: &[Vec3]) -> Vec<SplinePoint> {
        positions.iter().copied().map(SplinePoint::new).collect()
    }

    #[test]
    fn test_auto_tangent_endpoints_and_interior() {
        let pts = points(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 4.0),
        ]);

        assert_eq!(auto_tangent(&pts, 0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(auto_tangent(&pts, 1, 0.0), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(auto_tangent(&pts, 2, 0.0), Vec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_auto_tangent_tension() {
        let pts = points(&[Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]);
        assert_eq!(auto_tangent(&pts, 0, 0.5), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(auto_tangent(&pts, 1, 1.0), Vec3::ZERO);
    }

    #[test]
    fn test_auto_tangent_single_point() {
        let pts = points(&[Vec3::ONE]);
        assert_eq!(auto_tangent(&pts, 0, 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_hermite_endpoints() {
        let p0 = Vec3::new(1.0, 2.0, 3.0);
        let p1 = Vec3::new(-4.0, 0.0, 8.0);
        let m0 = Vec3::X;
        let m1 = Vec3::Z;

        assert!((hermite(p0, m0, p1, m1, 0.0) - p0).length() < 1e-5);
        assert!((hermite(p0, m0, p1, m1, 1.0) - p1).length() < 1e-5);
        assert!((hermite_derivative(p0, m0, p1, m1, 0.0) - m0).length() < 1e-5);
        assert!((hermite_derivative(p0, m0, p1, m1, 1.0) - m1).length() < 1e-5);
    }

    #[test]
    fn test_hermite_straight_line_is_linear() {
        // Tangent equal to the chord gives uniform speed.
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(0.0, 0.0, 10.0);
        let chord = p1 - p0;

        let mid = hermite(p0, chord, p1, chord, 0.25);
        assert!((mid - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5);
    }
}
