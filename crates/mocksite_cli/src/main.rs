//! The `mocksite` binary: serves the mock layout API over HTTP.
//!
//! Intentionally minimal, with no argument parsing: run `mocksite` in a
//! directory containing `mocksite.toml` (or nothing at all; every setting
//! has a default) and a `data/routes/` document store.
//!
//! Exit codes:
//! - 0: never reached in normal operation; the server runs until killed
//! - 1: startup error (unreadable config, failed to bind the port)

use std::env;
use std::process;

use tracing::info;

use mocksite_base::pal::http::HttpServerConfig;
use mocksite_base::tracing::init_tracing;
use mocksite_base::{FilePath, PalHandle, RealPal};
use mocksite_engine::{LayoutApiService, LayoutService, load_config};

fn main() {
    init_tracing().unwrap();

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });

    let pal = PalHandle::new(RealPal::new(current_dir));

    let config_path = FilePath::from("mocksite.toml");
    let config = match load_config(&pal, &config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config from mocksite.toml: {}", e);
            process::exit(1);
        }
    };

    info!(
        routes_dir = %config.routes_dir,
        endpoint = %config.endpoint,
        "configuration loaded"
    );

    let service = LayoutService::from_config(pal.clone(), &config);
    let api = LayoutApiService::new(service, config.endpoint.clone());

    let server_config = HttpServerConfig::new(config.host.clone())
        .with_port(config.port)
        .with_server_name("mocksite");

    let handle = match pal.start_http_server(Box::new(api), server_config) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: Failed to start HTTP server: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Mock layout API running at http://{}{}",
        handle.address(&config.host),
        config.endpoint
    );

    // The listener runs on its own thread; keep the handle alive and park
    // until the process is killed.
    loop {
        std::thread::park();
    }
}
