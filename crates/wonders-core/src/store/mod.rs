//! Player list persistence.
//!
//! `UserStore` keeps a deduplicated cache of known players and mirrors it to
//! a key-value `UserBackend` as an ordered list of names.

mod backend;
mod user;
mod users;

pub use backend::*;
pub use user::*;
pub use users::*;

/// Document key holding the list of player names.
pub const USERS_KEY: &str = "users";
