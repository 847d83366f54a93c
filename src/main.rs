use std::path::PathBuf;

use linecanvas::{run_canvas, CanvasConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Optional first argument: path to a YAML configuration file.
    let cfg = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match CanvasConfig::load_from_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("failed to load {:?}: {e}; using defaults", path);
                CanvasConfig::default()
            }
        },
        None => CanvasConfig::default(),
    };

    run_canvas(cfg)
}
