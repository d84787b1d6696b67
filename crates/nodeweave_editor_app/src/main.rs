// SPDX-License-Identifier: MIT OR Apache-2.0
//! `Nodeweave` editor.
//!
//! A node graph canvas docked next to an inspector:
//! - Drag nodes to move them
//! - Double-click a node and drag onto another to connect them
//! - Track simulated property values as live curves
//!
//! Settings are read from `nodeweave.ron` in the working directory, or from
//! the path given as the first argument. `--write-config [path]` writes the
//! default settings and exits.

mod app;
mod config;
mod panel_types;
mod panels;
mod state;

use app::EditorApp;
use config::{EditorConfig, CONFIG_FILE_NAME};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let mut args = std::env::args_os().skip(1).peekable();
    let write_config = args.next_if(|arg| arg == "--write-config").is_some();
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if write_config {
        match EditorConfig::default().save(&config_path) {
            Ok(()) => println!("Wrote {}", config_path.display()),
            Err(e) => {
                eprintln!("Failed to write {}: {e}", config_path.display());
                std::process::exit(1);
            }
        }
        return;
    }

    // Logging is not up yet, so a broken config falls back to defaults and is
    // reported once the subscriber exists.
    let (config, config_error) = match EditorConfig::load_or_default(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (EditorConfig::default(), Some(e)),
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Nodeweave v{}", env!("CARGO_PKG_VERSION"));
    match config_error {
        Some(e) => tracing::warn!("Ignoring {}: {e}", config_path.display()),
        None => tracing::debug!("Configuration: {}", config_path.display()),
    }

    if let Err(e) = EditorApp::run(config) {
        tracing::error!("Editor crashed: {e}");
        std::process::exit(1);
    }
}
