mod builder;
mod config;
mod deform;
mod error;
mod systems;

pub use builder::*;
pub use config::*;
pub use deform::bend_mesh;
pub use error::*;

use bevy::prelude::*;

use crate::spline::SplinePlugin;

/// Plugin for bending meshes along splines, one mesh per spline interval.
///
/// A [`SplineMeshSet`] names a spline entity and a [`MeshConfig`]. Every time
/// either changes, the set's segments are rebuilt: one child entity per pair
/// of consecutive control points, carrying a copy of the chosen mesh bent to
/// run from the first point to the second.
///
/// # Mesh Roles
///
/// - [`MeshRole::Default`]: every interior segment (required)
/// - [`MeshRole::Start`]: the first segment
/// - [`MeshRole::End`]: the last segment, when there are at least two
///
/// Default segments alternate between the default and alternative material:
/// even indices above zero get the alternative one.
///
/// # Coordinate Space
///
/// Segment vertices are expressed in the spline's local space and the segment
/// entities are children of the spline entity, so they follow its transform
/// wherever the `SplineMeshSet` itself lives.
///
/// # Usage
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_spline_mesh::prelude::*;
///
/// fn setup(
///     mut commands: Commands,
///     mut meshes: ResMut<Assets<Mesh>>,
///     mut materials: ResMut<Assets<StandardMaterial>>,
/// ) {
///     let spline = commands
///         .spawn(Spline::new([Vec3::ZERO, Vec3::new(4.0, 0.0, 2.0), Vec3::new(8.0, 1.0, 0.0)]))
///         .id();
///
///     let rail = meshes.add(Cuboid::new(1.0, 0.2, 0.5));
///     let config = MeshConfig::new().with_default(
///         MeshSpec::new(rail).with_material(materials.add(Color::WHITE)),
///     );
///
///     commands.entity(spline).insert(SplineMeshSet::new(spline, config));
/// }
/// ```
pub struct SplineMeshPlugin;

impl Plugin for SplineMeshPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<SplinePlugin>() {
            app.add_plugins(SplinePlugin);
        }

        app.register_type::<MeshRole>()
            .register_type::<ForwardAxis>()
            .register_type::<SplineMeshSet>()
            .register_type::<GeneratedSegment>()
            .init_resource::<SplineMeshSettings>()
            .add_message::<SegmentsRebuilt>()
            .add_systems(
                Update,
                (
                    systems::mark_changed_mesh_sets,
                    systems::sync_segment_meshes,
                    systems::cleanup_removed_mesh_sets,
                )
                    .chain(),
            );
    }
}

/// Global settings for segment generation.
#[derive(Resource, Debug, Clone)]
pub struct SplineMeshSettings {
    /// Recompute smooth normals after bending instead of rotating the source normals.
    pub recompute_normals: bool,
    /// Log a warning when a set has no usable default mesh.
    pub warn_on_skip: bool,
}

impl Default for SplineMeshSettings {
    fn default() -> Self {
        Self {
            recompute_normals: false,
            warn_on_skip: true,
        }
    }
}

/// Component that places bent meshes along a spline.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct SplineMeshSet {
    /// The spline entity to follow.
    pub spline: Entity,
    /// Mesh and material choices per role.
    #[reflect(ignore)]
    pub config: MeshConfig,
    /// Give every segment a static trimesh collider.
    pub collision: bool,
    /// Whether to automatically rebuild when the spline changes.
    pub auto_update: bool,
    /// Material used when a segment resolves none of its own.
    #[reflect(ignore)]
    pub base_material: Option<Handle<StandardMaterial>>,
}

impl Default for SplineMeshSet {
    fn default() -> Self {
        Self {
            spline: Entity::PLACEHOLDER,
            config: MeshConfig::default(),
            collision: true,
            auto_update: true,
            base_material: None,
        }
    }
}

impl SplineMeshSet {
    /// Create a new mesh set for a spline.
    pub fn new(spline: Entity, config: MeshConfig) -> Self {
        Self {
            spline,
            config,
            ..default()
        }
    }

    /// Enable or disable segment colliders.
    pub fn with_collision(mut self, collision: bool) -> Self {
        self.collision = collision;
        self
    }

    /// Enable or disable rebuilding on spline edits.
    pub fn with_auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }

    /// Set the fallback material for segments without one.
    pub fn with_base_material(mut self, material: Handle<StandardMaterial>) -> Self {
        self.base_material = Some(material);
        self
    }
}

/// Marker component added to generated segment entities.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct GeneratedSegment {
    /// The `SplineMeshSet` entity this segment belongs to.
    pub mesh_set: Entity,
    /// Interval index along the spline.
    pub index: usize,
}

/// Marker for sets whose segments are out of date.
///
/// Kept until a rebuild succeeds, so sets waiting on a source mesh to load
/// are retried every frame. A source mesh that fails to load clears the
/// set's segments instead. Insert it manually to force a rebuild.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct NeedsSegmentRebuild;

/// Segment entities currently owned by a set, in index order.
#[derive(Component, Debug, Clone, Default)]
pub(crate) struct SegmentSetState {
    pub segments: Vec<Entity>,
}

/// Message emitted after a set's segments were rebuilt.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentsRebuilt {
    /// The `SplineMeshSet` entity.
    pub mesh_set: Entity,
    /// Number of segments now present (0 when nothing could be built).
    pub segment_count: usize,
}
