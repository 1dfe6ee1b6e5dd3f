use std::collections::HashSet;

use avian3d::prelude::*;
use bevy::{asset::LoadState, mesh::PrimitiveTopology, prelude::*};

use crate::spline::Spline;

use super::builder::{build_segments, check_buildable, MeshSegmentDescriptor};
use super::deform::bend_mesh;
use super::error::SegmentBuildError;
use super::{
    GeneratedSegment, NeedsSegmentRebuild, SegmentSetState, SegmentsRebuilt, SplineMeshSet,
    SplineMeshSettings,
};

/// Flag sets whose config changed, or whose spline changed while `auto_update` is on.
pub fn mark_changed_mesh_sets(
    mut commands: Commands,
    changed_sets: Query<Entity, Changed<SplineMeshSet>>,
    all_sets: Query<(Entity, &SplineMeshSet)>,
    changed_splines: Query<Entity, Changed<Spline>>,
) {
    let changed_spline_set: HashSet<Entity> = changed_splines.iter().collect();

    for entity in &changed_sets {
        commands.entity(entity).insert(NeedsSegmentRebuild);
    }

    for (entity, set) in &all_sets {
        if set.auto_update && changed_spline_set.contains(&set.spline) {
            commands.entity(entity).insert(NeedsSegmentRebuild);
        }
    }
}

/// A bent mesh ready to be attached to a segment entity.
struct BuiltSegment {
    mesh: Option<Handle<Mesh>>,
    material: Option<Handle<StandardMaterial>>,
    collider: Option<Collider>,
}

/// Rebuild segments for every flagged set.
pub fn sync_segment_meshes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    asset_server: Res<AssetServer>,
    settings: Res<SplineMeshSettings>,
    sets: Query<(Entity, &SplineMeshSet, Option<&SegmentSetState>), With<NeedsSegmentRebuild>>,
    splines: Query<&Spline>,
    mut messages: MessageWriter<SegmentsRebuilt>,
) {
    for (set_entity, set, state) in &sets {
        let existing = state.map(|s| s.segments.as_slice()).unwrap_or_default();

        let Ok(spline) = splines.get(set.spline) else {
            warn!("SplineMeshSet {set_entity} points at {} which has no Spline", set.spline);
            despawn_segments(&mut commands, existing);
            finish(&mut commands, &mut messages, set_entity, Vec::new());
            continue;
        };

        if let Err(reason) = check_buildable(spline, &set.config) {
            match reason {
                SegmentBuildError::MissingBaseMesh if settings.warn_on_skip => {
                    warn!("SplineMeshSet {set_entity}: {reason}, no segments built");
                }
                _ => debug!("SplineMeshSet {set_entity}: {reason}"),
            }
            despawn_segments(&mut commands, existing);
            finish(&mut commands, &mut messages, set_entity, Vec::new());
            continue;
        }

        let descriptors = build_segments(spline, &set.config);

        let pending: Vec<&Handle<Mesh>> = descriptors
            .iter()
            .filter_map(|d| d.mesh.as_ref())
            .filter(|handle| meshes.get(*handle).is_none())
            .collect();

        let failed = pending
            .iter()
            .find(|handle| matches!(asset_server.load_state(handle.id()), LoadState::Failed(_)));
        if let Some(handle) = failed {
            warn!("SplineMeshSet {set_entity}: source mesh {:?} failed to load", handle.id());
            despawn_segments(&mut commands, existing);
            finish(&mut commands, &mut messages, set_entity, Vec::new());
            continue;
        }

        if !pending.is_empty() {
            // Keep the marker and try again once the source meshes load.
            debug!("SplineMeshSet {set_entity}: waiting for source meshes");
            continue;
        }

        let built: Vec<BuiltSegment> = descriptors
            .iter()
            .map(|descriptor| build_segment(&mut meshes, &settings, set, descriptor))
            .collect();

        let mut segments = Vec::with_capacity(built.len());
        for (index, segment) in built.into_iter().enumerate() {
            let reused = existing
                .get(index)
                .and_then(|&entity| commands.get_entity(entity).ok().map(|e| e.id()));

            let entity = match reused {
                Some(entity) => entity,
                None => commands.spawn(Visibility::default()).id(),
            };

            // Vertices are in the spline's local space, so the spline is the parent.
            let mut entity_commands = commands.entity(entity);
            entity_commands.insert((
                ChildOf(set.spline),
                Transform::default(),
                GeneratedSegment {
                    mesh_set: set_entity,
                    index,
                },
            ));

            match segment.mesh {
                Some(mesh) => entity_commands.insert(Mesh3d(mesh)),
                None => entity_commands.remove::<Mesh3d>(),
            };

            match segment.material {
                Some(material) => entity_commands.insert(MeshMaterial3d(material)),
                None => entity_commands.remove::<MeshMaterial3d<StandardMaterial>>(),
            };

            match segment.collider {
                Some(collider) => entity_commands.insert((RigidBody::Static, collider)),
                None => entity_commands.remove::<(RigidBody, Collider)>(),
            };

            segments.push(entity);
        }

        if existing.len() > segments.len() {
            despawn_segments(&mut commands, &existing[segments.len()..]);
        }

        finish(&mut commands, &mut messages, set_entity, segments);
    }
}

/// Bend one descriptor's mesh and pick its material and collider.
fn build_segment(
    meshes: &mut Assets<Mesh>,
    settings: &SplineMeshSettings,
    set: &SplineMeshSet,
    descriptor: &MeshSegmentDescriptor,
) -> BuiltSegment {
    let bent = descriptor.mesh.as_ref().and_then(|handle| {
        let source = meshes.get(handle)?;
        match bend_mesh(source, descriptor) {
            Ok(mesh) => Some(mesh),
            Err(err) => {
                warn!("Segment {} not bent: {err}", descriptor.index);
                None
            }
        }
    });

    let material = descriptor
        .material
        .clone()
        .or_else(|| set.base_material.clone());

    let Some(mut bent) = bent else {
        return BuiltSegment {
            mesh: None,
            material,
            collider: None,
        };
    };

    if settings.recompute_normals
        && bent.primitive_topology() == PrimitiveTopology::TriangleList
    {
        bent.compute_normals();
    }

    // avian rejects meshes without indices or triangle topology.
    let collider = if set.collision {
        Collider::trimesh_from_mesh(&bent)
    } else {
        None
    };

    BuiltSegment {
        mesh: Some(meshes.add(bent)),
        material,
        collider,
    }
}

/// Store the new segment list, clear the rebuild flag and report the count.
fn finish(
    commands: &mut Commands,
    messages: &mut MessageWriter<SegmentsRebuilt>,
    set_entity: Entity,
    segments: Vec<Entity>,
) {
    messages.write(SegmentsRebuilt {
        mesh_set: set_entity,
        segment_count: segments.len(),
    });
    commands
        .entity(set_entity)
        .insert(SegmentSetState { segments })
        .remove::<NeedsSegmentRebuild>();
}

fn despawn_segments(commands: &mut Commands, segments: &[Entity]) {
    for &segment in segments {
        if let Ok(mut entity_commands) = commands.get_entity(segment) {
            entity_commands.despawn();
        }
    }
}

/// Despawn segments when their `SplineMeshSet` is removed.
pub fn cleanup_removed_mesh_sets(
    mut commands: Commands,
    mut removed: RemovedComponents<SplineMeshSet>,
    segments: Query<(Entity, &GeneratedSegment)>,
) {
    for removed_set in removed.read() {
        for (entity, segment) in &segments {
            if segment.mesh_set == removed_set {
                commands.entity(entity).despawn();
            }
        }

        if let Ok(mut entity_commands) = commands.get_entity(removed_set) {
            entity_commands.remove::<(SegmentSetState, NeedsSegmentRebuild)>();
        }
    }
}
