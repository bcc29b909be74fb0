//! Scoring grid model.
//!
//! The grid is a flat sequence of 72 cells laid out as 9 category rows of 8
//! columns. Column 0 of every row holds the category icon; columns 1..7 are
//! player slots 0..6.

mod cell;
pub mod input;
mod model;
mod score_type;

pub use cell::*;
pub use model::*;
pub use score_type::*;

/// Number of grid columns (icon column plus player slots).
pub const COLUMNS: usize = 8;

/// Number of grid rows (one per `ScoreType`).
pub const ROWS: usize = 9;

/// Total number of cells in the grid.
pub const CELL_COUNT: usize = COLUMNS * ROWS;

/// Number of player slots (every column except the icon column).
pub const PLAYER_SLOTS: usize = COLUMNS - 1;
