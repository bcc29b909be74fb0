//! `users` subcommands.

use anyhow::Result;
use wonders_core::grid::input::validate_name;
use wonders_core::{Config, User};

use super::open_store;

/// Print every known player.
pub fn list(config: &Config, json: bool) -> Result<()> {
    let mut store = open_store(config);
    let users = store.load_users();

    if json {
        let names: Vec<&str> = users.iter().map(|user| user.name.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users in {}", config.store.path.display());
    }
    for user in &users {
        println!("{}", user);
    }
    Ok(())
}

/// Add a player to the store.
pub fn add(config: &Config, name: &str) -> Result<()> {
    let name = validate_name(name)?;
    let mut store = open_store(config);
    // Merge what is already stored so the write keeps existing players
    store.load_users();

    if store.add_user(User::new(name))? {
        println!("Added {}", name);
    } else {
        println!("{} is already known", name);
    }
    Ok(())
}
