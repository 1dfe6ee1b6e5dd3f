use bevy::{mesh::VertexAttributeValues, prelude::*};

use crate::geometry::CoordinateFrame;
use crate::spline::{hermite, hermite_derivative};

use super::builder::MeshSegmentDescriptor;
use super::error::DeformError;

/// Bend a source mesh so that it runs from the descriptor's start frame to
/// its end frame.
///
/// The mesh's extent along `descriptor.forward_axis` is mapped onto the
/// segment's Hermite curve (minimum at the start, maximum at the end). The
/// other two axes are laid out across the curve using a Y-up frame built
/// from the curve tangent at that point.
///
/// Indices, UVs and any other attributes are copied unchanged. Normals are
/// rotated with their vertex; the tangent attribute is dropped since it no
/// longer matches the bent surface.
pub fn bend_mesh(source: &Mesh, descriptor: &MeshSegmentDescriptor) -> Result<Mesh, DeformError> {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        source.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return Err(DeformError::MissingPositions);
    };

    let normals = match source.attribute(Mesh::ATTRIBUTE_NORMAL) {
        Some(VertexAttributeValues::Float32x3(normals)) => Some(normals),
        _ => None,
    };

    let axis = descriptor.forward_axis;
    let (min, max) = positions
        .iter()
        .map(|p| axis.component(Vec3::from_array(*p)))
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let extent = max - min;

    let start = descriptor.start;
    let end = descriptor.end;
    let chord = end.position - start.position;

    // Used where the curve has no direction: the chord, else +Z.
    let fallback = Some(CoordinateFrame::from_tangent(chord))
        .filter(CoordinateFrame::is_valid)
        .unwrap_or_else(|| CoordinateFrame::from_tangent(Vec3::Z));

    let frame_at = |t: f32| {
        let point = hermite(start.position, start.tangent, end.position, end.tangent, t);
        let tangent =
            hermite_derivative(start.position, start.tangent, end.position, end.tangent, t);
        let frame = Some(CoordinateFrame::from_tangent(tangent))
            .filter(CoordinateFrame::is_valid)
            .unwrap_or(fallback);
        (point, frame)
    };

    let mut bent_positions = Vec::with_capacity(positions.len());
    let mut bent_normals = normals.map(|n| Vec::with_capacity(n.len()));

    for (i, p) in positions.iter().enumerate() {
        let local = axis.to_segment_space(Vec3::from_array(*p));
        let t = if extent > 1e-6 {
            ((local.z - min) / extent).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let (point, frame) = frame_at(t);
        let world = frame.transform_point(point, Vec3::new(local.x, local.y, 0.0));
        bent_positions.push(world.to_array());

        if let (Some(normals), Some(out)) = (normals, bent_normals.as_mut()) {
            let normal = axis.to_segment_space(Vec3::from_array(normals[i]));
            out.push(frame.transform_vector(normal).normalize_or_zero().to_array());
        }
    }

    let mut mesh = source.clone();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, bent_positions);
    if let Some(bent_normals) = bent_normals {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, bent_normals);
    }
    mesh.remove_attribute(Mesh::ATTRIBUTE_TANGENT);

    Ok(mesh)
}
