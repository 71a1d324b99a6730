//! The viewer cube: geometry swaps and the per-frame spin

use bevy::prelude::*;
use cubeview_core::CubeSize;

use crate::types::{CubeResized, RotationState, ViewerCommand};

/// Marker component for the single cube in the scene
#[derive(Component, Debug, Clone)]
pub struct ViewerCube {
    pub size: CubeSize,
    /// Accumulated Euler angles (X, Y) in radians
    pub angles: Vec2,
}

/// Flat unlit material shared by every cube the viewer builds
#[derive(Resource, Debug, Clone)]
pub struct CubeMaterial(pub Handle<StandardMaterial>);

/// Spawn a cube entity with a fresh box mesh of the given size
pub fn spawn_cube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: &CubeMaterial,
    size: CubeSize,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(size.width, size.height, size.depth))),
            MeshMaterial3d(material.0.clone()),
            Transform::default(),
            ViewerCube {
                size,
                angles: Vec2::ZERO,
            },
        ))
        .id()
}

/// Replace the cube for resize/reset commands.
///
/// Requests are applied in order and only the last valid size is built,
/// so the scene always ends the frame with exactly one cube. Any accepted
/// request that asked for the input fields to be cleared clears them.
pub(crate) fn apply_resize_requests(
    mut commands: Commands,
    mut requests: MessageReader<ViewerCommand>,
    mut resized: MessageWriter<CubeResized>,
    mut meshes: ResMut<Assets<Mesh>>,
    material: Res<CubeMaterial>,
    cubes: Query<Entity, With<ViewerCube>>,
) {
    let mut accepted = None;
    let mut clear_inputs = false;
    for command in requests.read() {
        let Some((width, height, clear)) = command.resize_request() else {
            continue;
        };
        match CubeSize::from_request(width, height) {
            Some(size) => {
                accepted = Some(size);
                clear_inputs |= clear;
            }
            None => tracing::debug!("Ignoring cube resize to {}x{}", width, height),
        }
    }

    let Some(size) = accepted else {
        return;
    };

    for old in &cubes {
        commands.entity(old).despawn();
    }
    let entity = spawn_cube(&mut commands, &mut meshes, &material, size);
    tracing::info!("Cube replaced with {} ({:?})", size, entity);

    resized.write(CubeResized { size, clear_inputs });
}

pub(crate) fn toggle_rotation(
    mut requests: MessageReader<ViewerCommand>,
    mut rotation: ResMut<RotationState>,
) {
    for command in requests.read() {
        if matches!(command, ViewerCommand::ToggleRotation) {
            let enabled = rotation.toggle();
            tracing::info!("Cube rotation {}", if enabled { "enabled" } else { "disabled" });
        }
    }
}

/// Advance the cube rotation by a fixed step per frame
pub(crate) fn spin_cube(
    rotation: Res<RotationState>,
    mut cubes: Query<(&mut ViewerCube, &mut Transform)>,
) {
    if !rotation.enabled {
        return;
    }

    for (mut cube, mut transform) in &mut cubes {
        cube.angles += Vec2::splat(rotation.step);
        transform.rotation = Quat::from_euler(EulerRot::XYZ, cube.angles.x, cube.angles.y, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use crate::test_support::{cube, cube_count, send, test_app};

    #[test]
    fn test_bootstrap_builds_one_unit_cube() {
        let mut app = test_app();
        assert_eq!(cube_count(&mut app), 1);
        assert_eq!(cube(&mut app).1.size, CubeSize::UNIT);
    }

    #[test]
    fn test_resize_replaces_cube() {
        let mut app = test_app();
        let (before, _) = cube(&mut app);

        send(&mut app, ViewerCommand::resize(2.0, 3.0));
        app.update();

        assert_eq!(cube_count(&mut app), 1);
        let (after, state) = cube(&mut app);
        assert_ne!(before, after);
        assert_eq!(state.size.as_array(), [2.0, 3.0, 1.0]);
        assert!(app.world().get_entity(before).is_err());
    }

    #[test]
    fn test_invalid_resize_is_noop() {
        let mut app = test_app();
        let (before, _) = cube(&mut app);

        send(&mut app, ViewerCommand::resize(-1.0, 5.0));
        send(&mut app, ViewerCommand::resize(3.0, 0.0));
        app.update();

        assert_eq!(cube_count(&mut app), 1);
        let (after, state) = cube(&mut app);
        assert_eq!(before, after);
        assert_eq!(state.size, CubeSize::UNIT);
    }

    #[test]
    fn test_reset_restores_unit_cube() {
        let mut app = test_app();

        send(&mut app, ViewerCommand::resize(4.0, 0.5));
        app.update();
        assert_eq!(cube(&mut app).1.size.as_array(), [4.0, 0.5, 1.0]);

        send(&mut app, ViewerCommand::ResetCube);
        app.update();
        assert_eq!(cube_count(&mut app), 1);
        assert_eq!(cube(&mut app).1.size, CubeSize::UNIT);
    }

    #[test]
    fn test_many_resizes_in_one_frame_keep_one_cube() {
        let mut app = test_app();

        send(&mut app, ViewerCommand::resize(2.0, 2.0));
        send(&mut app, ViewerCommand::resize(5.0, 6.0));
        send(&mut app, ViewerCommand::resize(-5.0, 6.0));
        app.update();

        assert_eq!(cube_count(&mut app), 1);
        assert_eq!(cube(&mut app).1.size.as_array(), [5.0, 6.0, 1.0]);
    }

    #[test]
    fn test_resize_reports_input_clearing() {
        let mut app = test_app();

        send(
            &mut app,
            ViewerCommand::ResizeCube {
                width: 2.0,
                height: 3.0,
                clear_inputs: true,
            },
        );
        app.update();

        let messages = app.world().resource::<Messages<CubeResized>>();
        let mut cursor = messages.get_cursor();
        let resized: Vec<_> = cursor.read(messages).cloned().collect();
        assert_eq!(resized.len(), 1);
        assert!(resized[0].clear_inputs);
        assert_eq!(resized[0].size.as_array(), [2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_overwritten_field_resize_still_clears() {
        let mut app = test_app();

        send(
            &mut app,
            ViewerCommand::ResizeCube {
                width: 2.0,
                height: 3.0,
                clear_inputs: true,
            },
        );
        send(&mut app, ViewerCommand::resize(4.0, 4.0));
        send(
            &mut app,
            ViewerCommand::ResizeCube {
                width: -1.0,
                height: 3.0,
                clear_inputs: true,
            },
        );
        app.update();

        assert_eq!(cube(&mut app).1.size.as_array(), [4.0, 4.0, 1.0]);
        let messages = app.world().resource::<Messages<CubeResized>>();
        let mut cursor = messages.get_cursor();
        let resized: Vec<_> = cursor.read(messages).cloned().collect();
        assert_eq!(resized.len(), 1);
        assert!(resized[0].clear_inputs);
    }

    #[test]
    fn test_rotation_advances_only_when_enabled() {
        let mut app = test_app();

        app.update();
        assert_eq!(cube(&mut app).1.angles, Vec2::ZERO);

        send(&mut app, ViewerCommand::ToggleRotation);
        for _ in 0..10 {
            app.update();
        }
        let angles = cube(&mut app).1.angles;
        assert!((angles.x - 0.1).abs() < 1e-4);
        assert!((angles.y - 0.1).abs() < 1e-4);

        send(&mut app, ViewerCommand::ToggleRotation);
        app.update();
        let stopped = cube(&mut app).1.angles;
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(cube(&mut app).1.angles, stopped);
    }

    #[test]
    fn test_resize_keeps_rotation_flag() {
        let mut app = test_app();

        send(&mut app, ViewerCommand::ToggleRotation);
        app.update();
        send(&mut app, ViewerCommand::resize(2.0, 2.0));
        app.update();
        app.update();

        assert!(app.world().resource::<RotationState>().enabled);
        // the replacement cube keeps spinning from its own starting pose
        assert!(cube(&mut app).1.angles.x > 0.0);
    }
}
