//! Perspective camera and viewport tracking

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use cubeview_core::{Viewport, ViewerConfig};

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Spawn the camera described by the config, looking at the origin from +Z
pub fn spawn_camera(commands: &mut Commands, config: &ViewerConfig, viewport: Option<Viewport>) -> Entity {
    let camera = &config.camera;
    let aspect_ratio = viewport.and_then(|v| v.aspect_ratio()).unwrap_or(1.0);

    commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: config.fov_radians(),
                aspect_ratio,
                near: camera.near,
                far: camera.far,
                ..default()
            }),
            Transform::from_xyz(0.0, 0.0, camera.distance).looking_at(Vec3::ZERO, Vec3::Y),
            MainCamera,
        ))
        .id()
}

/// Point the projection at a new viewport. Degenerate viewports are skipped.
pub fn apply_viewport(projection: &mut Projection, viewport: Viewport) -> bool {
    let Some(aspect_ratio) = viewport.aspect_ratio() else {
        return false;
    };
    let Projection::Perspective(perspective) = projection else {
        return false;
    };
    perspective.aspect_ratio = aspect_ratio;
    true
}

/// Current primary window size, if there is a window
pub(crate) fn primary_viewport(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Viewport> {
    windows
        .single()
        .ok()
        .map(|window| Viewport::new(window.width(), window.height()))
}

/// Initial viewport sync, run once after the camera exists
pub(crate) fn sync_viewport_on_startup(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    let Some(viewport) = primary_viewport(&windows) else {
        return;
    };
    for mut projection in &mut cameras {
        apply_viewport(&mut projection, viewport);
    }
}

/// Keep the aspect ratio in step with the window.
///
/// The surface itself is resized by the renderer when the window changes;
/// only the projection needs updating here.
pub(crate) fn handle_window_resized(
    mut resized: MessageReader<WindowResized>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };

    let viewport = Viewport::new(last.width, last.height);
    for mut projection in &mut cameras {
        if apply_viewport(&mut projection, viewport) {
            tracing::debug!("Viewport resized to {}x{}", last.width, last.height);
        } else {
            tracing::debug!("Ignoring degenerate viewport {}x{}", last.width, last.height);
        }
    }
}
