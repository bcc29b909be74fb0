use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use super::{COLUMNS, ScoreType};

/// Discriminant of a `CellRole`, used for error reporting and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum CellKind {
    Image,
    Name,
    Score,
    Total,
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

/// Keyboard a front end should offer when editing a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    None,
    Numeric,
    Name,
}

/// What a cell shows and how it can be edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum CellRole {
    /// Category icon, column 0 of every row.
    Image { category: ScoreType },
    /// Player name, row 0.
    Name { text: String },
    /// Score entry. The parsed value is kept on the owning `Cell`.
    Score { text: String },
    /// Column total, last row.
    Total { text: String },
}

impl CellRole {
    pub fn kind(&self) -> CellKind {
        match self {
            Self::Image { .. } => CellKind::Image,
            Self::Name { .. } => CellKind::Name,
            Self::Score { .. } => CellKind::Score,
            Self::Total { .. } => CellKind::Total,
        }
    }

    /// Display text. Image cells have none.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Image { .. } => None,
            Self::Name { text } | Self::Score { text } | Self::Total { text } => Some(text),
        }
    }

    /// Prompt shown when the user opens the cell for editing.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Score { .. } => "Enter your score",
            Self::Name { .. } => "Enter your name",
            Self::Total { .. } => "Enter your total",
            Self::Image { .. } => "",
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::Score { .. } | Self::Total { .. } => InputKind::Numeric,
            Self::Name { .. } => InputKind::Name,
            Self::Image { .. } => InputKind::None,
        }
    }

    /// Whether selecting the cell opens an editor.
    pub fn is_editable(&self) -> bool {
        match self {
            Self::Name { .. } | Self::Score { .. } => true,
            Self::Image { .. } | Self::Total { .. } => false,
        }
    }
}

/// One slot of the scoring grid. Position never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    role: CellRole,
    category: ScoreType,
    column: usize,
    score: Option<i64>,
}

impl Cell {
    pub(crate) fn new(role: CellRole, category: ScoreType, column: usize) -> Self {
        Self {
            role,
            category,
            column,
            score: None,
        }
    }

    pub fn role(&self) -> &CellRole {
        &self.role
    }

    pub fn kind(&self) -> CellKind {
        self.role.kind()
    }

    pub fn category(&self) -> ScoreType {
        self.category
    }

    /// Grid column, 0..8. Column 0 is the icon column.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.category.row()
    }

    pub fn index(&self) -> usize {
        self.row() * COLUMNS + self.column
    }

    /// Player slot of this cell, `None` for the icon column.
    pub fn player(&self) -> Option<usize> {
        self.column.checked_sub(1)
    }

    /// Parsed score. Absent for non-score cells and unparsable entries.
    pub fn score(&self) -> Option<i64> {
        self.score
    }

    pub fn text(&self) -> Option<&str> {
        self.role.text()
    }

    pub(crate) fn set_text(&mut self, value: String) {
        match &mut self.role {
            CellRole::Name { text } | CellRole::Score { text } | CellRole::Total { text } => {
                *text = value
            }
            CellRole::Image { .. } => {}
        }
    }

    pub(crate) fn set_score(&mut self, score: Option<i64>) {
        self.score = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_prompts() {
        let score = CellRole::Score {
            text: String::new(),
        };
        let image = CellRole::Image {
            category: ScoreType::Coins,
        };
        assert_eq!(score.prompt(), "Enter your score");
        assert_eq!(image.prompt(), "");
        assert_eq!(score.input_kind(), InputKind::Numeric);
        assert_eq!(image.input_kind(), InputKind::None);
    }

    #[test]
    fn test_editable_roles() {
        assert!(CellRole::Name { text: "a".into() }.is_editable());
        assert!(CellRole::Score { text: "1".into() }.is_editable());
        assert!(!CellRole::Total { text: "1".into() }.is_editable());
        assert!(
            !CellRole::Image {
                category: ScoreType::Sum
            }
            .is_editable()
        );
    }

    #[test]
    fn test_set_text_ignores_image() {
        let mut cell = Cell::new(
            CellRole::Image {
                category: ScoreType::Army,
            },
            ScoreType::Army,
            0,
        );
        cell.set_text("x".to_string());
        assert_eq!(cell.text(), None);
        assert_eq!(cell.player(), None);
        assert_eq!(cell.index(), 8);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CellKind::Total.to_string(), "total");
    }
}
