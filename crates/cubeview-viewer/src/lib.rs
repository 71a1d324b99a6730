//! Cubeview Viewer - interactive cube in the browser or a desktop window
//!
//! Assembles the Bevy app around the scene plugin and adds the three ways
//! to drive it: an egui control panel, keyboard shortcuts, and functions
//! exported to the host page.

mod app;
pub mod bridge;
pub mod ui;

pub use app::run;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build(),
    );

    app::run(config_from_location());
}

/// Default config with overrides from the page URL (`?rotate=1&width=2`)
#[cfg(target_arch = "wasm32")]
fn config_from_location() -> cubeview_core::ViewerConfig {
    let mut config = cubeview_core::ViewerConfig::default();

    let Some(window) = web_sys::window() else {
        return config;
    };
    let Ok(href) = window.location().href() else {
        return config;
    };
    let Ok(url) = web_sys::Url::new(&href) else {
        return config;
    };

    let params = url.search_params();
    for key in cubeview_core::ViewerConfig::QUERY_KEYS {
        if let Some(value) = params.get(key) {
            if config.apply_query_param(key, &value) {
                tracing::info!("URL override {}={}", key, value);
            }
        }
    }
    config
}
