pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod grid;
pub mod store;

pub use config::Config;
pub use dispatch::{Dispatcher, LoadSequence, MainQueue, load_then_assign, spawn_load};
pub use error::{Error, Result};
pub use export::{Standing, Standings, format_grid_console, format_standings_console};
pub use grid::{Cell, CellKind, CellRole, GridEdit, InputKind, ScoreGrid, ScoreType};
pub use store::{
    FileBackend, MemoryBackend, SharedUserStore, USERS_KEY, User, UserBackend, UserStore,
};
