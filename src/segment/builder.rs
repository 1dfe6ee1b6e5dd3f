//! Resolution of spline intervals into mesh segment descriptors.
//!
//! Everything here is a pure function of a [`CurveModel`] and a
//! [`MeshConfig`]; nothing touches the ECS world.

use bevy::prelude::*;

use crate::spline::CurveModel;

use super::config::{ForwardAxis, MeshConfig, MeshRole};
use super::error::SegmentBuildError;

/// Position and tangent at one end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentFrame {
    pub position: Vec3,
    pub tangent: Vec3,
}

/// Mesh, axis and material resolved for a single segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentAssignment {
    pub mesh: Option<Handle<Mesh>>,
    pub forward_axis: ForwardAxis,
    pub material: Option<Handle<StandardMaterial>>,
}

/// Everything the scene layer needs to build one bent mesh instance.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSegmentDescriptor {
    /// Interval index; the segment runs from control point `index` to `index + 1`.
    pub index: usize,
    pub start: SegmentFrame,
    pub end: SegmentFrame,
    pub mesh: Option<Handle<Mesh>>,
    pub forward_axis: ForwardAxis,
    pub material: Option<Handle<StandardMaterial>>,
}

/// Check whether `build_segments` would produce anything.
pub fn check_buildable(
    curve: &impl CurveModel,
    config: &MeshConfig,
) -> Result<(), SegmentBuildError> {
    if config.spec_with_mesh(MeshRole::Default).is_none() {
        return Err(SegmentBuildError::MissingBaseMesh);
    }

    let point_count = curve.point_count();
    if point_count < 2 {
        return Err(SegmentBuildError::DegenerateCurve { point_count });
    }

    Ok(())
}

/// Resolve the mesh, axis and material of segment `index` on a curve with
/// `point_count` control points.
///
/// Precedence: the start mesh on the first segment, then the end mesh on the
/// last segment (only when there are at least two segments), then the
/// default mesh. Start and end segments never get a material. Default
/// segments use the alternative material on even indices above zero and the
/// default material otherwise.
pub fn resolve_assignment(
    index: usize,
    point_count: usize,
    config: &MeshConfig,
) -> SegmentAssignment {
    let last = point_count.saturating_sub(2);

    if let Some(start) = config.spec_with_mesh(MeshRole::Start) {
        if index == 0 {
            return SegmentAssignment {
                mesh: start.mesh.clone(),
                forward_axis: start.forward_axis,
                material: None,
            };
        }
    }

    if let Some(end) = config.spec_with_mesh(MeshRole::End) {
        if point_count > 2 && index == last {
            return SegmentAssignment {
                mesh: end.mesh.clone(),
                forward_axis: end.forward_axis,
                material: None,
            };
        }
    }

    // A default entry without a mesh leaves the segment empty.
    let Some(default) = config.spec_with_mesh(MeshRole::Default) else {
        return SegmentAssignment::default();
    };

    let material = match (&default.alternative_material, &default.default_material) {
        (Some(alternative), _) if index > 0 && index % 2 == 0 => Some(alternative.clone()),
        (_, Some(material)) => Some(material.clone()),
        _ => None,
    };

    SegmentAssignment {
        mesh: default.mesh.clone(),
        forward_axis: default.forward_axis,
        material,
    }
}

/// Build one descriptor per interval of `curve`, in index order.
///
/// Returns an empty list when the config has no default mesh or the curve
/// has fewer than two points; use [`check_buildable`] to find out which.
pub fn build_segments(curve: &impl CurveModel, config: &MeshConfig) -> Vec<MeshSegmentDescriptor> {
    if check_buildable(curve, config).is_err() {
        return Vec::new();
    }

    let point_count = curve.point_count();
    (0..point_count - 1)
        .map(|index| {
            let assignment = resolve_assignment(index, point_count, config);
            MeshSegmentDescriptor {
                index,
                start: SegmentFrame {
                    position: curve.position(index),
                    tangent: curve.tangent(index),
                },
                end: SegmentFrame {
                    position: curve.position(index + 1),
                    tangent: curve.tangent(index + 1),
                },
                mesh: assignment.mesh,
                forward_axis: assignment.forward_axis,
                material: assignment.material,
            }
        })
        .collect()
}
