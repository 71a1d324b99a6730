//! Functions exported to the host page
//!
//! Calls from JavaScript arrive outside the Bevy schedule, so they are
//! queued and drained into [`ViewerCommand`] messages at the start of the
//! next frame. The latest state snapshot is published back the same way.

use std::collections::VecDeque;
use std::sync::Mutex;

use bevy::prelude::*;
use cubeview_scene::{viewer_snapshot, LiveMarkers, RotationState, ViewerCommand, ViewerCube, ViewerSet};
use wasm_bindgen::prelude::*;

/// Commands queued by the host page, waiting for the next frame
static PENDING_COMMANDS: Mutex<VecDeque<ViewerCommand>> = Mutex::new(VecDeque::new());

/// JSON snapshot written at the end of every frame
static LATEST_STATE: Mutex<Option<String>> = Mutex::new(None);

fn enqueue(command: ViewerCommand) {
    let mut pending = PENDING_COMMANDS.lock().unwrap_or_else(|e| e.into_inner());
    pending.push_back(command);
}

/// Flip the rotation flag
#[wasm_bindgen]
pub fn toggle_rotation() {
    enqueue(ViewerCommand::ToggleRotation);
}

/// Show the arrow for "height", "width" or "depth". Other tags are ignored.
#[wasm_bindgen]
pub fn show_marker(tag: &str) {
    match ViewerCommand::show_marker_tag(tag) {
        Some(command) => enqueue(command),
        None => tracing::debug!("Ignoring unknown marker tag {:?}", tag),
    }
}

/// Replace the cube with a `width` x `height` x 1 box
#[wasm_bindgen]
pub fn update_cube_size(width: f32, height: f32) {
    enqueue(ViewerCommand::resize(width, height));
}

#[wasm_bindgen]
pub fn reset_cube() {
    enqueue(ViewerCommand::ResetCube);
}

/// Latest viewer state as JSON, or `undefined` before the first frame
#[wasm_bindgen]
pub fn viewer_state() -> Option<String> {
    LATEST_STATE.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drain_host_commands.before(ViewerSet::Commands))
            .add_systems(Update, publish_viewer_state.after(ViewerSet::Animate));
    }
}

fn drain_host_commands(mut commands: MessageWriter<ViewerCommand>) {
    let drained: Vec<ViewerCommand> = {
        let mut pending = PENDING_COMMANDS.lock().unwrap_or_else(|e| e.into_inner());
        pending.drain(..).collect()
    };

    for command in drained {
        tracing::debug!("Host command {:?}", command);
        commands.write(command);
    }
}

fn publish_viewer_state(
    rotation: Res<RotationState>,
    live: Res<LiveMarkers>,
    cubes: Query<&ViewerCube>,
) {
    let Ok(cube) = cubes.single() else {
        return;
    };

    match viewer_snapshot(&rotation, cube, &live).to_json() {
        Ok(json) => {
            *LATEST_STATE.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        }
        Err(e) => tracing::warn!("Failed to serialize viewer state: {}", e),
    }
}
