//! Cubeview - native desktop launcher
//!
//! Opens the cube viewer in a window, configured from a TOML file.

use anyhow::{Context, Result};
use clap::Parser;
use cubeview_core::ViewerConfig;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cubeview")]
#[command(about = "Interactive resizable cube viewer")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "cubeview.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Start with the cube rotating
    #[arg(long)]
    rotate: bool,
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&args.log_level))
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Cubeview v{}", env!("CARGO_PKG_VERSION"));

    if args.write_default_config {
        ViewerConfig::save_default(&args.config)
            .with_context(|| format!("writing {}", args.config.display()))?;
        info!(path = %args.config.display(), "Wrote default configuration");
        return Ok(());
    }

    let mut config = ViewerConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    if args.rotate {
        config.rotation.start_enabled = true;
    }

    info!(
        cube = %config.initial_cube_size(),
        rotating = config.rotation.start_enabled,
        marker_ms = config.markers.lifetime_ms,
        "Configuration loaded"
    );

    cubeview_viewer::run(config);

    Ok(())
}
