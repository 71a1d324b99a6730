//! Bevy application setup

use bevy::app::PluginGroupBuilder;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use cubeview_core::ViewerConfig;
use cubeview_scene::CubeViewerPlugin;

use crate::bridge::BridgePlugin;
use crate::ui::{ShortcutsPlugin, UiPlugin};

/// Bevy's default plugins with the window bound to the configured canvas.
///
/// The entry points install their own tracing subscriber, so Bevy's
/// `LogPlugin` is left out.
pub(crate) fn default_plugins(config: &ViewerConfig) -> PluginGroupBuilder {
    let window = Window {
        title: config.window.title.clone(),
        canvas: Some(config.window.canvas.clone()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: false,
        ..default()
    };

    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        })
        .disable::<LogPlugin>()
}

/// Build and run the viewer. Returns when the window closes.
pub fn run(config: ViewerConfig) {
    App::new()
        .add_plugins(default_plugins(&config))
        // Redraw every display refresh, focused or not
        .insert_resource(WinitSettings::continuous())
        // EguiPlugin needs picking registered first
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(CubeViewerPlugin::new(config))
        .add_plugins((UiPlugin, ShortcutsPlugin, BridgePlugin))
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bevy_logger_left_out() {
        let plugins = default_plugins(&ViewerConfig::default());
        assert!(plugins.contains::<LogPlugin>());
        assert!(!plugins.enabled::<LogPlugin>());
        assert!(plugins.enabled::<WindowPlugin>());
    }
}
