//! Cubeview Scene - Bevy plugin for the cube viewer
//!
//! The plugin bootstraps the scene once at startup (camera, cube, marker
//! assets) and then runs the per-frame systems: resize/reset commands swap
//! the cube, marker commands spawn timed arrows, and the render loop spins
//! the cube while rotation is enabled.

pub mod camera;
pub mod cube;
pub mod markers;
pub mod scene;
pub mod types;

use bevy::prelude::*;
use bevy::window::WindowResized;
use cubeview_core::{MarkerSchedule, ViewerConfig, ViewerSnapshot};

/// Plugin that sets up the viewer scene and its systems
#[derive(Default)]
pub struct CubeViewerPlugin {
    pub config: ViewerConfig,
}

impl CubeViewerPlugin {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }
}

impl Plugin for CubeViewerPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();
        let [r, g, b] = config.background_color();

        app.insert_resource(ClearColor(Color::srgb(r, g, b)))
            .insert_resource(RotationState {
                enabled: config.rotation.start_enabled,
                step: config.rotation.step_radians,
            })
            .insert_resource(LiveMarkers(MarkerSchedule::new(config.marker_lifetime())))
            .insert_resource(ViewerSettings(config))
            .add_message::<ViewerCommand>()
            .add_message::<CubeResized>()
            // WindowPlugin registers this in a full app; headless apps need it too
            .add_message::<WindowResized>()
            .configure_sets(
                Update,
                (ViewerSet::Commands, ViewerSet::Expire, ViewerSet::Animate).chain(),
            )
            .add_systems(
                Startup,
                (scene::setup_scene, camera::sync_viewport_on_startup).chain(),
            )
            .add_systems(
                Update,
                (
                    (cube::apply_resize_requests, markers::show_markers, cube::toggle_rotation)
                        .chain()
                        .in_set(ViewerSet::Commands),
                    markers::expire_markers.in_set(ViewerSet::Expire),
                    (camera::handle_window_resized, cube::spin_cube).in_set(ViewerSet::Animate),
                ),
            )
            .add_systems(Last, markers::cancel_markers_on_exit);
    }
}

/// Summarize the viewer for host pages
pub fn viewer_snapshot(rotation: &RotationState, cube: &ViewerCube, live: &LiveMarkers) -> ViewerSnapshot {
    ViewerSnapshot {
        rotating: rotation.enabled,
        cube: cube.size,
        live_markers: live.0.len(),
    }
}

// Re-export commonly used types
pub use camera::MainCamera;
pub use cube::ViewerCube;
pub use markers::{DimensionMarker, LiveMarkers};
pub use types::*;

#[cfg(test)]
pub(crate) mod test_support {
    use bevy::prelude::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    use super::*;

    /// Frame length used by every test app
    pub const FRAME_MS: u64 = 100;

    /// Headless app with the viewer plugin, bootstrapped and on a fixed clock
    pub fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(FRAME_MS)))
            .add_plugins(CubeViewerPlugin::default());
        app.update();
        app
    }

    pub fn send(app: &mut App, command: ViewerCommand) {
        app.world_mut().write_message(command);
    }

    /// Run frames until `millis` of clock time have passed
    pub fn step_millis(app: &mut App, millis: u64) {
        for _ in 0..millis / FRAME_MS {
            app.update();
        }
    }

    pub fn cube(app: &mut App) -> (Entity, ViewerCube) {
        let mut query = app.world_mut().query::<(Entity, &ViewerCube)>();
        let (entity, cube) = query.single(app.world()).unwrap();
        (entity, cube.clone())
    }

    pub fn cube_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&ViewerCube>();
        query.iter(app.world()).count()
    }

    pub fn markers(app: &mut App) -> Vec<DimensionMarker> {
        let mut query = app.world_mut().query::<&DimensionMarker>();
        query.iter(app.world()).cloned().collect()
    }

    pub fn marker_count(app: &mut App) -> usize {
        markers(app).len()
    }

    pub fn entity_count(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<Entity>();
        query.iter(app.world()).count()
    }
}
