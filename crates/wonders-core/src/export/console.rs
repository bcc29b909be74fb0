//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

use super::Standings;
use crate::grid::{CellRole, PLAYER_SLOTS, ScoreGrid, ScoreType};

/// Width of one grid column in characters.
const CELL_WIDTH: usize = 9;

/// Format the grid as a table, one line per category row.
///
/// With `color` set, the icon column is painted in the category color and
/// names and totals are bold.
pub fn format_grid_console(grid: &ScoreGrid, color: bool) -> String {
    let mut output = String::new();

    let _ = write!(output, "{:<width$}", "", width = CELL_WIDTH);
    for player in 1..=PLAYER_SLOTS {
        let _ = write!(output, "{:>width$}", format!("#{}", player), width = CELL_WIDTH);
    }
    output.push('\n');

    for category in ScoreType::iter() {
        for cell in grid.row(category) {
            let text = match cell.role() {
                CellRole::Image { category } => {
                    let label = format!("{:<width$}", category.label(), width = CELL_WIDTH);
                    if color {
                        let (r, g, b) = category.rgb();
                        label.black().on_truecolor(r, g, b).to_string()
                    } else {
                        label
                    }
                }
                CellRole::Name { text } | CellRole::Total { text } => {
                    let text = format!("{:>width$}", fit(text), width = CELL_WIDTH);
                    if color { text.bold().to_string() } else { text }
                }
                CellRole::Score { text } => {
                    let shown = format!("{:>width$}", fit(text), width = CELL_WIDTH);
                    if color && !text.is_empty() && cell.score().is_none() {
                        shown.red().to_string()
                    } else {
                        shown
                    }
                }
            };
            output.push_str(&text);
        }
        output.push('\n');
    }

    output
}

/// Format standings as a ranked list.
pub fn format_standings_console(standings: &Standings, color: bool) -> String {
    let mut output = String::new();

    if standings.is_empty() {
        output.push_str("No scores entered yet\n");
        return output;
    }

    let border: String = "━".repeat(32);
    let border = if color {
        border.dimmed().to_string()
    } else {
        border
    };

    let _ = writeln!(output, "{}", border);
    for entry in &standings.entries {
        let rank = format!("{:>2}.", entry.rank);
        let rank = if color && entry.rank == 1 {
            rank.yellow().bold().to_string()
        } else {
            rank
        };
        let _ = writeln!(output, "  {} {:<18} {:>6}", rank, fit(&entry.name), entry.total);
    }
    let _ = writeln!(output, "{}", border);

    output
}

/// Truncate text to fit a grid column, leaving one space of padding.
fn fit(text: &str) -> String {
    let limit = CELL_WIDTH - 1;
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(limit - 1).collect();
        short.push('…');
        short
    }
}
