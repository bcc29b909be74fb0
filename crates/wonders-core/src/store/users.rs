use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::{USERS_KEY, User, UserBackend};
use crate::error::{Error, Result};

/// User store shared between the grid thread and a load worker.
pub type SharedUserStore<B> = Arc<Mutex<UserStore<B>>>;

/// Deduplicated cache of players, mirrored to a backend key.
#[derive(Debug)]
pub struct UserStore<B> {
    backend: B,
    key: String,
    users: Vec<User>,
    selected: Vec<User>,
}

impl<B: UserBackend> UserStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, USERS_KEY)
    }

    /// Create a store reading and writing a custom document key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            users: Vec::new(),
            selected: Vec::new(),
        }
    }

    /// Wrap the store for use from a load worker.
    pub fn into_shared(self) -> SharedUserStore<B> {
        Arc::new(Mutex::new(self))
    }

    /// Merge the backend's name list into the cache and return the cache.
    ///
    /// Backend errors, a missing key, or a value that is not a list of
    /// strings are logged and reported as no users.
    pub fn load_users(&mut self) -> Vec<User> {
        let value = match self.backend.get(&self.key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                info!("No users stored under {:?}", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Failed to load users: {}", e);
                return Vec::new();
            }
        };

        let names: Vec<String> = match serde_json::from_value(value) {
            Ok(names) => names,
            Err(e) => {
                warn!("Users under {:?} have the wrong shape: {}", self.key, e);
                return Vec::new();
            }
        };

        for name in names {
            if !self.contains(&name) {
                self.users.push(User::new(name));
            }
        }
        debug!("Loaded {} users", self.users.len());
        self.users.clone()
    }

    /// Append a user unless one with the same name is cached, then persist
    /// the whole cache. Returns whether the user was new.
    ///
    /// The write replaces whatever the backend held; concurrent writers
    /// overwrite each other.
    pub fn add_user(&mut self, user: User) -> Result<bool> {
        if user.name.is_empty() {
            return Err(Error::EmptyName);
        }
        let added = !self.contains(&user.name);
        if added {
            self.users.push(user);
        }
        self.persist()?;
        Ok(added)
    }

    /// Cached users in insertion order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.iter().any(|user| user.name == name)
    }

    /// Record which cached users take part in the current game, in order.
    /// Unknown names are skipped and repeats collapse.
    pub fn select_users<I, S>(&mut self, names: I) -> Vec<User>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<User> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if selected.iter().any(|user| user.name == name) {
                continue;
            }
            match self.users.iter().find(|user| user.name == name) {
                Some(user) => selected.push(user.clone()),
                None => debug!("Skipping unknown user {:?}", name),
            }
        }
        self.selected = selected.clone();
        selected
    }

    /// Users chosen by the last `select_users` call.
    pub fn selected_users(&self) -> &[User] {
        &self.selected
    }

    fn persist(&mut self) -> Result<()> {
        let names: Vec<Value> = self
            .users
            .iter()
            .map(|user| Value::String(user.name.clone()))
            .collect();
        self.backend.set(&self.key, Value::Array(names))
    }
}
