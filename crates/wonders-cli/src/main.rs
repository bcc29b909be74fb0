mod cli;
mod commands;
mod session;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command, UsersAction};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wonders_core::Config;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wonders=warn,wonders_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => load_config(path),
        None => {
            let path = Config::default_path();
            if path.exists() {
                load_config(&path)
            } else {
                Config::default()
            }
        }
    };
    if let Some(store) = args.store {
        config.store.path = store;
    }
    if args.no_color {
        config.display.color = false;
    }

    match args.command {
        Command::Users { action } => match action {
            UsersAction::List { json } => commands::users::list(&config, json),
            UsersAction::Add { name } => commands::users::add(&config, &name),
        },
        Command::Play { script } => commands::play::run(&config, script.as_deref()),
    }
}

fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(config) => {
            info!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Failed to load config {:?}: {}, using defaults", path, e);
            Config::default()
        }
    }
}
