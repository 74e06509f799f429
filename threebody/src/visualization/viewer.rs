use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::configuration::config::RenderConfig;
use crate::simulation::states::N_BODIES;
use crate::simulation::trajectory::Trajectories;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Finished trajectories plus the frame currently on screen
#[derive(Resource)]
struct Playback {
    trajectories: Trajectories,
    frame: usize,
    timer: Timer,
    scale: f32, // world metres -> screen pixels
}

/// Screen half-width the view extent is mapped onto
const HALF_VIEW: f32 = 360.0;

/// Marker radii in screen pixels, star first
const MARKER_RADII: [f32; N_BODIES] = [12.0, 4.0, 4.0];

/// Replay a finished run in a window, looping over its frames
pub fn run_viewer(trajectories: Trajectories, settings: &RenderConfig) {
    info!("viewer: replaying {} frames", trajectories.len());

    let playback = Playback {
        trajectories,
        frame: 0,
        timer: Timer::from_seconds(settings.frame_delay_ms as f32 / 1000.0, TimerMode::Repeating),
        scale: HALF_VIEW / settings.extent as f32,
    };

    App::new()
        .insert_resource(playback)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (advance_frame_system, sync_transforms_system, draw_path_system))
        .run();
}

fn setup_bodies_system(mut commands: Commands, playback: Res<Playback>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let Some(first) = playback.trajectories.frame(0) else {
        return;
    };

    for (i, p) in first.iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(MARKER_RADII[i]))),
                material: materials.add(ColorMaterial::from(Color::srgb(0.84, 0.15, 0.16))),
                transform: Transform::from_xyz(p.x as f32 * playback.scale, p.y as f32 * playback.scale, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn advance_frame_system(time: Res<Time>, mut playback: ResMut<Playback>) {
    if playback.timer.tick(time.delta()).just_finished() {
        let n = playback.trajectories.len().max(1);
        playback.frame = (playback.frame + 1) % n;
    }
}

fn sync_transforms_system(playback: Res<Playback>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let Some(positions) = playback.trajectories.frame(playback.frame) else {
        return;
    };
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(p) = positions.get(*i) {
            transform.translation.x = (p.x as f32) * playback.scale;
            transform.translation.y = (p.y as f32) * playback.scale;
        }
    }
}

/// Path of body 2 up to the previous frame
fn draw_path_system(playback: Res<Playback>, mut gizmos: Gizmos) {
    let path = playback.trajectories.path(1);
    let end = playback.frame.min(path.len());
    gizmos.linestrip_2d(
        path[..end].iter().map(|p| Vec2::new(p.x as f32, p.y as f32) * playback.scale),
        Color::srgb(0.84, 0.15, 0.16),
    );
}
