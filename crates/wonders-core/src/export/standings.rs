use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::grid::{ScoreGrid, ScoreType};

/// One player's line in the standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    /// Competition rank, equal totals share a rank
    pub rank: usize,
    /// Player slot on the grid
    pub player: usize,
    pub name: String,
    /// Score per scoring category, `None` where nothing numeric was entered
    pub scores: BTreeMap<ScoreType, Option<i64>>,
    pub total: i64,
}

/// Ranked summary of every player slot in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub entries: Vec<Standing>,
}

impl Standings {
    /// Rank every slot that has a name or at least one entered score.
    pub fn from_grid(grid: &ScoreGrid) -> Self {
        let mut entries = Vec::new();

        for (player, name) in grid.players() {
            let mut scores = BTreeMap::new();
            let mut touched = !name.is_empty();

            for category in ScoreType::scoring() {
                let Ok(index) = grid.index_of(category, player) else {
                    continue;
                };
                let Ok(cell) = grid.cell(index) else {
                    continue;
                };
                touched |= cell.text().is_some_and(|text| !text.is_empty());
                scores.insert(category, cell.score());
            }

            if !touched {
                continue;
            }

            let total = scores
                .values()
                .flatten()
                .fold(0i64, |sum, score| sum.saturating_add(*score));
            let name = if name.is_empty() {
                format!("Player {}", player + 1)
            } else {
                name.to_string()
            };

            entries.push(Standing {
                rank: 0,
                player,
                name,
                scores,
                total,
            });
        }

        // Stable sort keeps slot order among equal totals
        entries.sort_by(|a, b| b.total.cmp(&a.total));
        let totals: Vec<i64> = entries.iter().map(|entry| entry.total).collect();
        for entry in &mut entries {
            entry.rank = 1 + totals.iter().filter(|&&total| total > entry.total).count();
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Players sharing first place.
    pub fn leaders(&self) -> impl Iterator<Item = &Standing> {
        self.entries.iter().filter(|entry| entry.rank == 1)
    }

    /// JSON export stamped with the current local time.
    pub fn to_json(&self) -> Result<String> {
        self.to_json_at(Local::now())
    }

    /// JSON export stamped with `generated_at`.
    pub fn to_json_at(&self, generated_at: DateTime<Local>) -> Result<String> {
        let document = json!({
            "generated_at": generated_at.to_rfc3339(),
            "standings": self.entries,
        });
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Tab-separated export with a header row. Absent scores are blank.
    pub fn to_tsv(&self) -> String {
        let mut output = String::from("rank\tname");
        for category in ScoreType::scoring() {
            let _ = write!(output, "\t{}", category.name());
        }
        output.push_str("\ttotal\n");

        for entry in &self.entries {
            let _ = write!(output, "{}\t{}", entry.rank, entry.name);
            for category in ScoreType::scoring() {
                let value = entry
                    .scores
                    .get(&category)
                    .copied()
                    .flatten()
                    .map(|score| score.to_string())
                    .unwrap_or_default();
                let _ = write!(output, "\t{}", value);
            }
            let _ = writeln!(output, "\t{}", entry.total);
        }

        output
    }
}
