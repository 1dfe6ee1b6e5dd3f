use bevy::prelude::*;

use super::types::{auto_tangent, hermite, hermite_derivative, CurveModel, SplinePoint};

/// A 3D spline component that can be attached to entities.
///
/// The curve passes through every control point and is a cubic Hermite
/// between each consecutive pair, so `n` points give `n - 1` segments.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component)]
pub struct Spline {
    /// Control points defining the spline shape.
    pub points: Vec<SplinePoint>,
    /// Scales automatic tangents by `1 - tension`. Explicit tangents are unaffected.
    pub tension: f32,
}

impl Spline {
    /// Create a spline through the given positions with automatic tangents.
    pub fn new(positions: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            points: positions.into_iter().map(SplinePoint::new).collect(),
            tension: 0.0,
        }
    }

    /// Create a spline from fully specified points.
    pub fn from_points(points: Vec<SplinePoint>) -> Self {
        Self {
            points,
            tension: 0.0,
        }
    }

    /// Set the tension applied to automatic tangents.
    pub fn with_tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    /// Number of segments (intervals between consecutive points).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Evaluate segment `segment` at local parameter `t` (0.0 to 1.0).
    pub fn evaluate_segment(&self, segment: usize, t: f32) -> Option<Vec3> {
        if segment >= self.segment_count() {
            return None;
        }
        Some(hermite(
            self.position(segment),
            self.tangent(segment),
            self.position(segment + 1),
            self.tangent(segment + 1),
            t.clamp(0.0, 1.0),
        ))
    }

    /// Evaluate the tangent of segment `segment` at local parameter `t`.
    pub fn evaluate_segment_tangent(&self, segment: usize, t: f32) -> Option<Vec3> {
        if segment >= self.segment_count() {
            return None;
        }
        Some(hermite_derivative(
            self.position(segment),
            self.tangent(segment),
            self.position(segment + 1),
            self.tangent(segment + 1),
            t.clamp(0.0, 1.0),
        ))
    }

    /// Sample the spline into a series of points for rendering.
    pub fn sample(&self, samples_per_segment: usize) -> Vec<Vec3> {
        let segment_count = self.segment_count();
        if segment_count == 0 || samples_per_segment == 0 {
            return Vec::new();
        }

        let mut points = Vec::with_capacity(segment_count * samples_per_segment + 1);
        for segment in 0..segment_count {
            for i in 0..samples_per_segment {
                let t = i as f32 / samples_per_segment as f32;
                if let Some(point) = self.evaluate_segment(segment, t) {
                    points.push(point);
                }
            }
        }
        points.extend(self.points.last().map(|p| p.position));

        points
    }

    /// Add a control point at the end of the spline.
    pub fn add_point(&mut self, position: Vec3) {
        self.points.push(SplinePoint::new(position));
    }

    /// Insert a control point at the given index.
    pub fn insert_point(&mut self, index: usize, position: Vec3) {
        if index <= self.points.len() {
            self.points.insert(index, SplinePoint::new(position));
        }
    }

    /// Remove the control point at the given index.
    pub fn remove_point(&mut self, index: usize) -> Option<SplinePoint> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    /// Move an existing control point. Returns false if the index is out of range.
    pub fn set_position(&mut self, index: usize, position: Vec3) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.position = position;
                true
            }
            None => false,
        }
    }

    /// Override (or with `None`, reset to automatic) the tangent of a control point.
    pub fn set_tangent(&mut self, index: usize, tangent: Option<Vec3>) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.tangent = tangent;
                true
            }
            None => false,
        }
    }
}

impl CurveModel for Spline {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn position(&self, index: usize) -> Vec3 {
        self.points[index].position
    }

    fn tangent(&self, index: usize) -> Vec3 {
        self.points[index]
            .tangent
            .unwrap_or_else(|| auto_tangent(&self.points, index, self.tension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_model_counts_and_positions() {
        let spline = Spline::new([Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)]);
        assert_eq!(spline.point_count(), 3);
        assert_eq!(spline.segment_count(), 2);
        assert_eq!(spline.position(2), Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_explicit_tangent_passes_through() {
        let mut spline = Spline::new([Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]);
        assert!(spline.set_tangent(1, Some(Vec3::new(0.0, 3.0, 0.0))));
        assert_eq!(spline.tangent(1), Vec3::new(0.0, 3.0, 0.0));

        assert!(spline.set_tangent(1, None));
        assert_eq!(spline.tangent(1), Vec3::X);
    }

    #[test]
    fn test_evaluate_segment_hits_control_points() {
        let spline = Spline::new([
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 0.0, 1.0),
        ]);

        assert_eq!(spline.evaluate_segment(0, 0.0), Some(Vec3::ZERO));
        let end = spline.evaluate_segment(1, 1.0).unwrap();
        assert!((end - Vec3::new(3.0, 0.0, 1.0)).length() < 1e-5);
        assert!(spline.evaluate_segment(2, 0.5).is_none());
    }

    #[test]
    fn test_sample_includes_last_point() {
        let spline = Spline::new([Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)]);
        let samples = spline.sample(4);
        assert_eq!(samples.len(), 9);
        assert_eq!(samples.last().copied(), Some(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_point_editing() {
        let mut spline = Spline::new([Vec3::ZERO, Vec3::X]);
        spline.add_point(Vec3::Y);
        spline.insert_point(1, Vec3::Z);
        assert_eq!(spline.point_count(), 4);
        assert_eq!(spline.position(1), Vec3::Z);

        assert_eq!(spline.remove_point(1).map(|p| p.position), Some(Vec3::Z));
        assert!(spline.remove_point(10).is_none());
        assert!(!spline.set_position(10, Vec3::ONE));
    }
}
