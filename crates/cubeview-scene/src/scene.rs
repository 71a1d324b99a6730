//! Scene bootstrap - camera, cube material, initial cube, marker assets

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{primary_viewport, spawn_camera};
use crate::cube::{spawn_cube, CubeMaterial};
use crate::markers::MarkerAssets;
use crate::types::ViewerSettings;

pub(crate) fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<ViewerSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let config = &settings.0;

    spawn_camera(&mut commands, config, primary_viewport(&windows));

    // Flat and unlit, so the scene needs no lights
    let [r, g, b] = config.cube_color();
    let material = CubeMaterial(materials.add(StandardMaterial {
        base_color: Color::srgb(r, g, b),
        unlit: true,
        ..default()
    }));

    let size = config.initial_cube_size();
    spawn_cube(&mut commands, &mut meshes, &material, size);
    commands.insert_resource(material);

    commands.insert_resource(MarkerAssets::new(
        config.markers.length,
        &mut meshes,
        &mut materials,
    ));

    tracing::info!("Scene ready with {} cube", size);
}
