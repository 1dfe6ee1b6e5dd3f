//! # bevy_spline_mesh
//!
//! A Bevy plugin that lays bent mesh segments along 3D splines.
//!
//! ## Features
//!
//! - Hermite splines with automatic or explicit tangents
//! - One bent mesh per spline interval, rebuilt whenever the spline or the
//!   mesh choices change
//! - Separate start, end and repeating meshes, each with its own forward axis
//! - Alternating materials on repeating segments
//! - Optional static trimesh colliders per segment (avian3d)
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_spline_mesh::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SplineMeshPlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
//!     let spline = commands
//!         .spawn(Spline::new([
//!             Vec3::new(-3.0, 0.0, 0.0),
//!             Vec3::new(-1.0, 1.0, 2.0),
//!             Vec3::new(1.0, 0.0, 2.0),
//!             Vec3::new(3.0, 0.5, 0.0),
//!         ]))
//!         .id();
//!
//!     let pipe = meshes.add(Cylinder::new(0.2, 1.0));
//!     commands.entity(spline).insert(SplineMeshSet::new(
//!         spline,
//!         MeshConfig::new().with_default(MeshSpec::new(pipe).with_forward_axis(ForwardAxis::Y)),
//!     ));
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`SplinePlugin`]: Spline type registration (added automatically)
//! - [`SplineMeshPlugin`]: Segment generation and scene sync

pub mod geometry;
pub mod segment;
pub mod spline;

pub use segment::SplineMeshPlugin;
pub use spline::SplinePlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::segment::{
        bend_mesh, build_segments, check_buildable, resolve_assignment, DeformError,
        ForwardAxis, GeneratedSegment, MeshConfig, MeshRole, MeshSegmentDescriptor, MeshSpec,
        NeedsSegmentRebuild, SegmentAssignment, SegmentBuildError, SegmentFrame,
        SegmentsRebuilt, SplineMeshPlugin, SplineMeshSet, SplineMeshSettings,
    };
    pub use crate::spline::{CurveModel, Spline, SplinePlugin, SplinePoint};
}
