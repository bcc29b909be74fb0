use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CELL_COUNT, COLUMNS, Cell, CellKind, CellRole, PLAYER_SLOTS, ScoreType};
use crate::error::{Error, Result};
use crate::store::{User, UserBackend, UserStore};

/// Edit event coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEdit {
    /// Commit of a score cell editor.
    Score { index: usize, text: String },
    /// Commit of a name cell editor.
    Name { index: usize, text: String },
    /// Confirmation of the user selection list.
    SelectUsers(Vec<User>),
}

/// The scoring grid: 9 category rows by 8 columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreGrid {
    cells: Vec<Cell>,
}

impl Default for ScoreGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreGrid {
    /// Build a blank grid.
    pub fn new() -> Self {
        let cells = (0..CELL_COUNT)
            .map(|index| {
                let category = ScoreType::from_index(index);
                let column = index % COLUMNS;
                let role = if column == 0 {
                    CellRole::Image { category }
                } else if category == ScoreType::People {
                    CellRole::Name {
                        text: String::new(),
                    }
                } else if category == ScoreType::Sum {
                    CellRole::Total {
                        text: String::new(),
                    }
                } else {
                    CellRole::Score {
                        text: String::new(),
                    }
                };
                Cell::new(role, category, column)
            })
            .collect();

        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells.get(index).ok_or(Error::IndexOutOfRange(index))
    }

    /// Grid index of a player's cell in a category row.
    pub fn index_of(&self, category: ScoreType, player: usize) -> Result<usize> {
        if player >= PLAYER_SLOTS {
            return Err(Error::PlayerOutOfRange(player));
        }
        Ok(category.offset() + player + 1)
    }

    /// Cells of one category row, icon first.
    pub fn row(&self, category: ScoreType) -> &[Cell] {
        let start = category.offset();
        &self.cells[start..start + COLUMNS]
    }

    /// Apply an edit event, routing it to the matching operation.
    pub fn apply<B: UserBackend>(
        &mut self,
        edit: GridEdit,
        store: &mut UserStore<B>,
    ) -> Result<()> {
        match edit {
            GridEdit::Score { index, text } => self.set_score(index, &text),
            GridEdit::Name { index, text } => self.set_name(index, &text, store),
            GridEdit::SelectUsers(users) => {
                self.assign_users(&users);
                Ok(())
            }
        }
    }

    /// Store raw score text. Text that does not parse as an integer is kept
    /// for display and counts as 0 in the column total.
    pub fn set_score(&mut self, index: usize, raw_text: &str) -> Result<()> {
        let cell = self.cell_of_kind_mut(index, CellKind::Score)?;
        let score = raw_text.parse::<i64>().ok();
        if score.is_none() {
            debug!("Score text {:?} at cell {} is not a number", raw_text, index);
        }
        cell.set_score(score);
        cell.set_text(raw_text.to_string());
        let column = cell.column();
        self.recompute_column_total(column)
    }

    /// Store an already validated score.
    pub fn apply_score(&mut self, index: usize, value: i64) -> Result<()> {
        let cell = self.cell_of_kind_mut(index, CellKind::Score)?;
        cell.set_score(Some(value));
        cell.set_text(value.to_string());
        let column = cell.column();
        self.recompute_column_total(column)
    }

    /// Set a player name. A non-empty name unknown to the store is added to
    /// it; store failures are logged and otherwise ignored.
    pub fn set_name<B: UserBackend>(
        &mut self,
        index: usize,
        text: &str,
        store: &mut UserStore<B>,
    ) -> Result<()> {
        let cell = self.cell_of_kind_mut(index, CellKind::Name)?;
        cell.set_text(text.to_string());

        if !text.is_empty()
            && !store.contains(text)
            && let Err(e) = store.add_user(User::new(text))
        {
            warn!("Failed to add user {:?}: {}", text, e);
        }
        Ok(())
    }

    /// Fill name cells in column order from `users`. Slots past the end of
    /// the list keep their current names.
    pub fn assign_users(&mut self, users: &[User]) {
        let names = self
            .cells
            .iter_mut()
            .filter(|cell| cell.kind() == CellKind::Name);
        for (cell, user) in names.zip(users) {
            cell.set_text(user.name.clone());
        }
    }

    /// Rewrite the total cell of a grid column from the column's scores.
    pub fn recompute_column_total(&mut self, column: usize) -> Result<()> {
        if column >= COLUMNS {
            return Err(Error::ColumnOutOfRange(column));
        }
        let sum = self.column_sum(column);
        if let Some(total) = self
            .cells
            .iter_mut()
            .find(|cell| cell.column() == column && cell.kind() == CellKind::Total)
        {
            total.set_text(sum.to_string());
        }
        Ok(())
    }

    /// Recompute every column total.
    pub fn recompute_all(&mut self) {
        for column in 1..COLUMNS {
            let sum = self.column_sum(column);
            self.cells[ScoreType::Sum.offset() + column].set_text(sum.to_string());
        }
    }

    /// Sum of a player's scores.
    pub fn total(&self, player: usize) -> Result<i64> {
        let index = self.index_of(ScoreType::Sum, player)?;
        Ok(self.column_sum(self.cells[index].column()))
    }

    /// Text of a player's total cell, blank until a score is entered.
    pub fn total_text(&self, player: usize) -> Result<&str> {
        let index = self.index_of(ScoreType::Sum, player)?;
        Ok(self.cells[index].text().unwrap_or_default())
    }

    /// Player slot and name text for every slot, in column order.
    pub fn players(&self) -> impl Iterator<Item = (usize, &str)> {
        self.row(ScoreType::People)
            .iter()
            .filter_map(|cell| Some((cell.player()?, cell.text()?)))
    }

    fn column_sum(&self, column: usize) -> i64 {
        self.cells
            .iter()
            .filter(|cell| cell.column() == column && cell.kind() == CellKind::Score)
            .filter_map(Cell::score)
            .fold(0i64, i64::saturating_add)
    }

    fn cell_of_kind_mut(&mut self, index: usize, expected: CellKind) -> Result<&mut Cell> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange(index))?;
        let actual = cell.kind();
        if actual != expected {
            return Err(Error::WrongCellKind {
                index,
                expected,
                actual,
            });
        }
        Ok(cell)
    }
}
