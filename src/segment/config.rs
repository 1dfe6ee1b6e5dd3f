use std::collections::HashMap;

use bevy::prelude::*;

/// Which part of the spline a mesh choice applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Default)]
pub enum MeshRole {
    /// Interior segments. Required for anything to be built.
    #[default]
    Default,
    /// The first segment.
    Start,
    /// The last segment (only when the spline has more than one segment).
    End,
}

/// The local mesh axis that is stretched along a spline segment.
///
/// The remaining two axes become the segment's side and up directions:
///
/// | Forward | Side | Up |
/// |---------|------|----|
/// | `X`     | -Z   | +Y |
/// | `Y`     | -X   | +Z |
/// | `Z`     | +X   | +Y |
///
/// Each mapping is a rotation, so meshes are never mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Default)]
pub enum ForwardAxis {
    #[default]
    X,
    Y,
    Z,
}

impl ForwardAxis {
    /// Express a mesh-local vector as `(side, up, forward)`.
    pub fn to_segment_space(self, v: Vec3) -> Vec3 {
        match self {
            Self::X => Vec3::new(-v.z, v.y, v.x),
            Self::Y => Vec3::new(-v.x, v.z, v.y),
            Self::Z => v,
        }
    }

    /// The component of `v` along this axis.
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }
}

/// Mesh and material choice for one [`MeshRole`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshSpec {
    /// The mesh to bend. A spec without a mesh is treated as absent.
    pub mesh: Option<Handle<Mesh>>,
    /// Which local mesh axis runs along the spline.
    pub forward_axis: ForwardAxis,
    /// Material for interior segments.
    pub default_material: Option<Handle<StandardMaterial>>,
    /// Material for even interior segments (index > 0).
    pub alternative_material: Option<Handle<StandardMaterial>>,
}

impl MeshSpec {
    /// Create a spec for the given mesh, laid along X.
    pub fn new(mesh: Handle<Mesh>) -> Self {
        Self {
            mesh: Some(mesh),
            ..default()
        }
    }

    /// Set the forward axis.
    pub fn with_forward_axis(mut self, axis: ForwardAxis) -> Self {
        self.forward_axis = axis;
        self
    }

    /// Set the default material.
    pub fn with_material(mut self, material: Handle<StandardMaterial>) -> Self {
        self.default_material = Some(material);
        self
    }

    /// Set the alternative material.
    pub fn with_alternative_material(mut self, material: Handle<StandardMaterial>) -> Self {
        self.alternative_material = Some(material);
        self
    }

    /// The mesh handle, if this spec has one.
    pub fn mesh(&self) -> Option<&Handle<Mesh>> {
        self.mesh.as_ref()
    }
}

/// Mesh choices for a spline, at most one [`MeshSpec`] per [`MeshRole`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshConfig {
    specs: HashMap<MeshRole, MeshSpec>,
}

impl MeshConfig {
    /// Create an empty config. Nothing is built until a default mesh is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spec for interior segments.
    pub fn with_default(self, spec: MeshSpec) -> Self {
        self.with_role(MeshRole::Default, spec)
    }

    /// Set the spec for the first segment.
    pub fn with_start(self, spec: MeshSpec) -> Self {
        self.with_role(MeshRole::Start, spec)
    }

    /// Set the spec for the last segment.
    pub fn with_end(self, spec: MeshSpec) -> Self {
        self.with_role(MeshRole::End, spec)
    }

    /// Set the spec for any role, replacing the previous one.
    pub fn with_role(mut self, role: MeshRole, spec: MeshSpec) -> Self {
        self.insert(role, spec);
        self
    }

    /// Insert or replace the spec for `role`, returning the previous one.
    pub fn insert(&mut self, role: MeshRole, spec: MeshSpec) -> Option<MeshSpec> {
        self.specs.insert(role, spec)
    }

    /// Remove the spec for `role`.
    pub fn remove(&mut self, role: MeshRole) -> Option<MeshSpec> {
        self.specs.remove(&role)
    }

    /// The spec for `role`, if one is set.
    pub fn get(&self, role: MeshRole) -> Option<&MeshSpec> {
        self.specs.get(&role)
    }

    /// Mutable access to the spec for `role`.
    pub fn get_mut(&mut self, role: MeshRole) -> Option<&mut MeshSpec> {
        self.specs.get_mut(&role)
    }

    /// The spec for `role`, only if it carries a mesh.
    pub fn spec_with_mesh(&self, role: MeshRole) -> Option<&MeshSpec> {
        self.get(role).filter(|spec| spec.mesh.is_some())
    }

    /// Every mesh handle referenced by this config.
    pub fn meshes(&self) -> impl Iterator<Item = &Handle<Mesh>> {
        self.specs.values().filter_map(MeshSpec::mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_axis_mapping_is_rotation() {
        for axis in [ForwardAxis::X, ForwardAxis::Y, ForwardAxis::Z] {
            let x = axis.to_segment_space(Vec3::X);
            let y = axis.to_segment_space(Vec3::Y);
            let z = axis.to_segment_space(Vec3::Z);
            let det = Mat3::from_cols(x, y, z).determinant();
            assert!((det - 1.0).abs() < 1e-6, "{axis:?} mirrors geometry");
        }
    }

    #[test]
    fn test_forward_axis_lands_on_forward() {
        for (axis, local) in [
            (ForwardAxis::X, Vec3::X),
            (ForwardAxis::Y, Vec3::Y),
            (ForwardAxis::Z, Vec3::Z),
        ] {
            assert_eq!(axis.to_segment_space(local), Vec3::Z);
            assert_eq!(axis.component(local * 3.0), 3.0);
        }
    }

    #[test]
    fn test_config_replaces_role() {
        let mut meshes = Assets::<Mesh>::default();
        let a = meshes.add(Cuboid::default());
        let b = meshes.add(Sphere::default());

        let config = MeshConfig::new()
            .with_default(MeshSpec::new(a))
            .with_default(MeshSpec::new(b.clone()));

        assert_eq!(config.get(MeshRole::Default).and_then(MeshSpec::mesh), Some(&b));
        assert_eq!(config.meshes().count(), 1);
    }

    #[test]
    fn test_config_remove_role() {
        let mut meshes = Assets::<Mesh>::default();
        let mut config = MeshConfig::new()
            .with_default(MeshSpec::new(meshes.add(Cuboid::default())))
            .with_end(MeshSpec::new(meshes.add(Sphere::default())));

        assert!(config.remove(MeshRole::End).is_some());
        assert!(config.get(MeshRole::End).is_none());
        assert!(config.remove(MeshRole::Start).is_none());

        if let Some(spec) = config.get_mut(MeshRole::Default) {
            spec.forward_axis = ForwardAxis::Z;
        }
        assert_eq!(config.get(MeshRole::Default).map(|s| s.forward_axis), Some(ForwardAxis::Z));
    }

    #[test]
    fn test_spec_without_mesh_is_absent() {
        let config = MeshConfig::new().with_start(MeshSpec::default());
        assert!(config.get(MeshRole::Start).is_some());
        assert!(config.spec_with_mesh(MeshRole::Start).is_none());
    }
}
