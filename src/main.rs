//! Example spline mesh application.
//!
//! A rail with distinct start and end pieces and alternating sleeper
//! materials. One control point bobs up and down so the segments rebuild
//! every frame.
//!
//! Run with: `cargo run`

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_spline_mesh::prelude::*;

/// Index of the control point animated by `bob_control_point`.
const ANIMATED_POINT: usize = 2;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Spline Mesh Example".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(SplineMeshPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (bob_control_point, draw_spline, log_rebuilds))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 10.0, 16.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Pieces are modelled one unit long along X and stretched to fit.
    let rail = meshes.add(Cuboid::new(1.0, 0.3, 1.2));
    let buffer = meshes.add(Cuboid::new(1.0, 0.8, 1.6));
    let light = materials.add(Color::srgb(0.8, 0.8, 0.75));
    let dark = materials.add(Color::srgb(0.3, 0.25, 0.2));
    let caps = materials.add(Color::srgb(0.8, 0.2, 0.1));

    let config = MeshConfig::new()
        .with_default(
            MeshSpec::new(rail)
                .with_material(light)
                .with_alternative_material(dark),
        )
        .with_start(MeshSpec::new(buffer.clone()))
        .with_end(MeshSpec::new(buffer));

    let spline = commands
        .spawn((
            Spline::new([
                Vec3::new(-8.0, 0.0, 0.0),
                Vec3::new(-5.0, 0.0, 3.0),
                Vec3::new(-1.0, 1.0, 2.0),
                Vec3::new(2.0, 0.0, -2.0),
                Vec3::new(5.0, 0.5, -1.0),
                Vec3::new(8.0, 0.0, 2.0),
            ]),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    // Segments are parented to the spline; the set may live on any entity.
    commands
        .entity(spline)
        .insert(SplineMeshSet::new(spline, config).with_base_material(caps));

    println!("Spline Mesh Example");
    println!("-------------------");
    println!("Red:    start/end pieces (base material)");
    println!("Light:  default material");
    println!("Dark:   alternative material (even segments)");
}

fn bob_control_point(time: Res<Time>, mut splines: Query<&mut Spline>) {
    let height = 1.0 + (time.elapsed_secs() * 1.5).sin() * 1.5;
    for mut spline in &mut splines {
        if let Some(point) = spline.points.get(ANIMATED_POINT).map(|p| p.position) {
            spline.set_position(ANIMATED_POINT, point.with_y(height));
        }
    }
}

fn draw_spline(mut gizmos: Gizmos, splines: Query<(&Spline, &GlobalTransform)>) {
    for (spline, transform) in &splines {
        let points: Vec<Vec3> = spline
            .sample(16)
            .into_iter()
            .map(|p| transform.transform_point(p))
            .collect();
        gizmos.linestrip(points, Color::srgb(1.0, 0.8, 0.2));

        for point in &spline.points {
            gizmos.sphere(
                Isometry3d::from_translation(transform.transform_point(point.position)),
                0.15,
                Color::srgb(0.3, 0.3, 0.8),
            );
        }
    }
}

fn log_rebuilds(mut rebuilt: MessageReader<SegmentsRebuilt>, mut last: Local<Option<usize>>) {
    for message in rebuilt.read() {
        if *last != Some(message.segment_count) {
            info!("{} now has {} segments", message.mesh_set, message.segment_count);
            *last = Some(message.segment_count);
        }
    }
}
