//! Control panel and keyboard shortcuts using bevy_egui

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use cubeview_core::{CubeSize, Dimension};
use cubeview_scene::{CubeResized, LiveMarkers, RotationState, ViewerCommand, ViewerCube, ViewerSet};

/// Text in the width/height fields of the control panel
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CubeSizeInput {
    pub width: String,
    pub height: String,
}

impl CubeSizeInput {
    /// Resize command for the current field contents.
    ///
    /// `None` when either field is not a positive number.
    pub fn resize_command(&self) -> Option<ViewerCommand> {
        let size = CubeSize::from_text(&self.width, &self.height)?;
        Some(ViewerCommand::ResizeCube {
            width: size.width,
            height: size.height,
            clear_inputs: true,
        })
    }

    pub fn clear(&mut self) {
        self.width.clear();
        self.height.clear();
    }
}

/// Grouped system parameters for the control panel
#[derive(SystemParam)]
pub struct PanelParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub input: ResMut<'w, CubeSizeInput>,
    pub rotation: Res<'w, RotationState>,
    pub live: Res<'w, LiveMarkers>,
    pub cubes: Query<'w, 's, &'static ViewerCube>,
    pub commands: MessageWriter<'w, ViewerCommand>,
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CubeSizeInput>()
            .add_systems(Update, clear_size_inputs.after(ViewerSet::Commands))
            // Panel runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
            .add_systems(EguiPrimaryContextPass, control_panel);
    }
}

fn control_panel(mut params: PanelParams) {
    let Ok(ctx) = params.contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Cube")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            let rotation_label = if params.rotation.enabled {
                "Stop rotation"
            } else {
                "Start rotation"
            };
            if ui.button(rotation_label).clicked() {
                params.commands.write(ViewerCommand::ToggleRotation);
            }

            ui.separator();

            ui.label("Show dimension");
            ui.horizontal(|ui| {
                for dimension in Dimension::ALL {
                    let [r, g, b] = dimension.color_rgb().map(|c| (c * 255.0) as u8);
                    let text = egui::RichText::new(dimension.label()).color(egui::Color32::from_rgb(r, g, b));
                    if ui.button(text).clicked() {
                        params.commands.write(ViewerCommand::ShowMarker(dimension));
                    }
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("W");
                ui.add(
                    egui::TextEdit::singleline(&mut params.input.width)
                        .hint_text("width")
                        .desired_width(50.0),
                );
                ui.label("H");
                ui.add(
                    egui::TextEdit::singleline(&mut params.input.height)
                        .hint_text("height")
                        .desired_width(50.0),
                );
            });

            ui.horizontal(|ui| {
                if ui.button("Resize").clicked() {
                    match params.input.resize_command() {
                        Some(command) => {
                            params.commands.write(command);
                        }
                        None => tracing::debug!(
                            "Ignoring resize input {:?}x{:?}",
                            params.input.width,
                            params.input.height
                        ),
                    }
                }
                if ui.button("Reset").clicked() {
                    params.commands.write(ViewerCommand::ResetCube);
                }
            });

            ui.separator();

            if let Ok(cube) = params.cubes.single() {
                ui.label(
                    egui::RichText::new(format!("Cube {}", cube.size))
                        .size(11.0)
                        .color(egui::Color32::GRAY),
                );
            }
            ui.label(
                egui::RichText::new(format!("{} markers", params.live.0.len()))
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            );
        });
}

/// Empty the size fields after a resize that asked for it
fn clear_size_inputs(mut resized: MessageReader<CubeResized>, mut input: ResMut<CubeSizeInput>) {
    if resized.read().any(|event| event.clear_inputs) {
        input.clear();
    }
}

/// Keyboard shortcuts: Space toggles rotation, H/W/D show markers, R resets
pub struct ShortcutsPlugin;

impl Plugin for ShortcutsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts.before(ViewerSet::Commands));
    }
}

/// Command bound to a key, if any
pub fn shortcut_command(key: KeyCode) -> Option<ViewerCommand> {
    match key {
        KeyCode::Space => Some(ViewerCommand::ToggleRotation),
        KeyCode::KeyH => Some(ViewerCommand::ShowMarker(Dimension::Height)),
        KeyCode::KeyW => Some(ViewerCommand::ShowMarker(Dimension::Width)),
        KeyCode::KeyD => Some(ViewerCommand::ShowMarker(Dimension::Depth)),
        KeyCode::KeyR => Some(ViewerCommand::ResetCube),
        _ => None,
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut commands: MessageWriter<ViewerCommand>,
) {
    // Typing into the size fields must not trigger shortcuts
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    for key in keys.get_just_pressed() {
        if let Some(command) = shortcut_command(*key) {
            commands.write(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeview_scene::CubeViewerPlugin;

    fn panel_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_plugins((CubeViewerPlugin::default(), UiPlugin));
        app.update();
        app
    }

    fn cube_size(app: &mut App) -> [f32; 3] {
        let mut query = app.world_mut().query::<&ViewerCube>();
        query.single(app.world()).unwrap().size.as_array()
    }

    fn set_input(app: &mut App, width: &str, height: &str) {
        let mut input = app.world_mut().resource_mut::<CubeSizeInput>();
        input.width = width.to_string();
        input.height = height.to_string();
    }

    fn submit(app: &mut App) {
        let command = app.world().resource::<CubeSizeInput>().resize_command();
        if let Some(command) = command {
            app.world_mut().write_message(command);
        }
        app.update();
    }

    #[test]
    fn test_resize_command_from_fields() {
        let input = CubeSizeInput {
            width: "2".to_string(),
            height: " 3.5 ".to_string(),
        };
        assert_eq!(
            input.resize_command(),
            Some(ViewerCommand::ResizeCube {
                width: 2.0,
                height: 3.5,
                clear_inputs: true,
            })
        );
    }

    #[test]
    fn test_bad_fields_produce_no_command() {
        for (width, height) in [("", ""), ("abc", "2"), ("2", "-1"), ("0", "4")] {
            let input = CubeSizeInput {
                width: width.to_string(),
                height: height.to_string(),
            };
            assert_eq!(input.resize_command(), None, "{:?}x{:?}", width, height);
        }
    }

    #[test]
    fn test_successful_resize_clears_fields() {
        let mut app = panel_app();
        set_input(&mut app, "2", "3");
        submit(&mut app);

        assert_eq!(cube_size(&mut app), [2.0, 3.0, 1.0]);
        assert_eq!(*app.world().resource::<CubeSizeInput>(), CubeSizeInput::default());
    }

    #[test]
    fn test_rejected_resize_keeps_fields() {
        let mut app = panel_app();
        set_input(&mut app, "-1", "5");
        submit(&mut app);

        assert_eq!(cube_size(&mut app), [1.0, 1.0, 1.0]);
        let input = app.world().resource::<CubeSizeInput>();
        assert_eq!(input.width, "-1");
        assert_eq!(input.height, "5");
    }

    #[test]
    fn test_field_resize_followed_by_host_resize_clears_fields() {
        let mut app = panel_app();
        set_input(&mut app, "2", "3");
        let command = app.world().resource::<CubeSizeInput>().resize_command();
        if let Some(command) = command {
            app.world_mut().write_message(command);
        }
        app.world_mut().write_message(ViewerCommand::resize(4.0, 4.0));
        app.update();

        assert_eq!(cube_size(&mut app), [4.0, 4.0, 1.0]);
        assert_eq!(*app.world().resource::<CubeSizeInput>(), CubeSizeInput::default());
    }

    #[test]
    fn test_host_resize_leaves_fields_alone() {
        let mut app = panel_app();
        set_input(&mut app, "7", "8");
        app.world_mut().write_message(ViewerCommand::resize(2.0, 2.0));
        app.update();

        assert_eq!(cube_size(&mut app), [2.0, 2.0, 1.0]);
        assert_eq!(app.world().resource::<CubeSizeInput>().width, "7");
    }

    #[test]
    fn test_shortcut_bindings() {
        assert_eq!(shortcut_command(KeyCode::Space), Some(ViewerCommand::ToggleRotation));
        assert_eq!(
            shortcut_command(KeyCode::KeyH),
            Some(ViewerCommand::ShowMarker(Dimension::Height))
        );
        assert_eq!(
            shortcut_command(KeyCode::KeyW),
            Some(ViewerCommand::ShowMarker(Dimension::Width))
        );
        assert_eq!(
            shortcut_command(KeyCode::KeyD),
            Some(ViewerCommand::ShowMarker(Dimension::Depth))
        );
        assert_eq!(shortcut_command(KeyCode::KeyR), Some(ViewerCommand::ResetCube));
        assert_eq!(shortcut_command(KeyCode::KeyQ), None);
    }
}
