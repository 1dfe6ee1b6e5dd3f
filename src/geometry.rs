//! Geometry utilities for bending meshes along spline segments.

use bevy::prelude::*;

/// A local coordinate frame defined by tangent, side, and up vectors.
///
/// The frame is right-handed: `side × up = tangent`. Mapping a point's
/// `(side, up, forward)` coordinates into it is a proper rotation, so
/// triangle winding survives the transform.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateFrame {
    /// The tangent (forward along spline) direction.
    pub tangent: Vec3,
    /// The side direction, `up × tangent`.
    pub side: Vec3,
    /// The corrected up direction (perpendicular to tangent and side).
    pub up: Vec3,
}

impl CoordinateFrame {
    /// Build a coordinate frame from a tangent direction using Y-up convention.
    ///
    /// Handles degenerate cases where tangent is parallel to Y by falling back
    /// to using X as the reference axis.
    pub fn from_tangent(tangent: Vec3) -> Self {
        Self::from_tangent_with_up(tangent, Vec3::Y)
    }

    /// Build a coordinate frame from a tangent and preferred up direction.
    ///
    /// The actual up vector may differ from `preferred_up` to maintain
    /// orthogonality with the tangent.
    pub fn from_tangent_with_up(tangent: Vec3, preferred_up: Vec3) -> Self {
        let tangent = tangent.normalize_or_zero();

        let side = preferred_up.cross(tangent).normalize_or_zero();

        // Tangent parallel to preferred_up: pick another reference.
        let side = if side.length_squared() < 0.001 {
            Vec3::X.cross(tangent).normalize_or_zero()
        } else {
            side
        };
        let up = tangent.cross(side).normalize_or_zero();

        Self { tangent, side, up }
    }

    /// Check if this frame is valid (non-degenerate).
    pub fn is_valid(&self) -> bool {
        self.tangent.length_squared() > 0.001
            && self.side.length_squared() > 0.001
            && self.up.length_squared() > 0.001
    }

    /// Transform a local point to world space relative to an origin.
    ///
    /// Local coordinates map as: X → side, Y → up, Z → tangent.
    pub fn transform_point(&self, origin: Vec3, local: Vec3) -> Vec3 {
        origin + self.transform_vector(local)
    }

    /// Rotate a local direction into the frame (no translation).
    pub fn transform_vector(&self, local: Vec3) -> Vec3 {
        self.side * local.x + self.up * local.y + self.tangent * local.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tangent_basic() {
        let frame = CoordinateFrame::from_tangent(Vec3::Z);
        assert!(frame.is_valid());
        assert!((frame.tangent - Vec3::Z).length() < 0.001);
        assert!((frame.up - Vec3::Y).length() < 0.001);
        assert!((frame.side - Vec3::X).length() < 0.001);
    }

    #[test]
    fn test_from_tangent_degenerate() {
        // Tangent parallel to Y should still produce valid frame
        let frame = CoordinateFrame::from_tangent(Vec3::Y);
        assert!(frame.is_valid());
        assert!(frame.side.dot(frame.tangent).abs() < 0.001);
    }

    #[test]
    fn test_frame_is_right_handed() {
        let frame = CoordinateFrame::from_tangent(Vec3::new(1.0, 0.5, -2.0));
        assert!((frame.side.cross(frame.up) - frame.tangent).length() < 0.001);
    }

    #[test]
    fn test_zero_tangent_is_invalid() {
        assert!(!CoordinateFrame::from_tangent(Vec3::ZERO).is_valid());
    }

    #[test]
    fn test_transform_point() {
        let frame = CoordinateFrame::from_tangent(Vec3::Z);
        let origin = Vec3::new(10.0, 0.0, 0.0);
        let local = Vec3::new(1.0, 2.0, 3.0);
        let world = frame.transform_point(origin, local);

        // Should offset by side*1, up*2, tangent*3
        let expected = origin + frame.side + frame.up * 2.0 + frame.tangent * 3.0;
        assert!((world - expected).length() < 0.001);
    }
}
