//! Standings computation and output formatting.

mod console;
mod standings;

pub use console::*;
pub use standings::*;
