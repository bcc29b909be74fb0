//! `play` command: an interactive or scripted scoring session.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use wonders_core::Config;

use super::open_store;
use crate::session::Session;

pub fn run(config: &Config, script: Option<&Path>) -> Result<()> {
    let store = open_store(config);
    let mut session = Session::new(
        store,
        config.display.color,
        config.session.load_timeout(),
    );
    let stdout = io::stdout();

    match script {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            info!("Running session script {:?}", path);
            session.run(BufReader::new(file), stdout.lock(), false)
        }
        None => {
            println!("Type `help` for commands, `quit` to leave.");
            session.run(io::stdin().lock(), stdout.lock(), true)
        }
    }
}
