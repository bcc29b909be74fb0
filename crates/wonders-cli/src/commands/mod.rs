//! CLI command implementations.

pub mod play;
pub mod users;

use wonders_core::{Config, FileBackend, UserStore};

/// Open the user store named by the config.
pub fn open_store(config: &Config) -> UserStore<FileBackend> {
    UserStore::with_key(FileBackend::new(&config.store.path), &config.store.key)
}
