use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, FromRepr, IntoEnumIterator, IntoStaticStr};

use super::COLUMNS;
use crate::error::{Error, Result};

/// Scoring category. The discriminant is the grid index where the
/// category's row band starts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum ScoreType {
    People = 0,
    Army = 8,
    Coins = 16,
    Wonders = 24,
    Blue = 32,
    Yellow = 40,
    Purple = 48,
    Green = 56,
    Sum = 64,
}

impl ScoreType {
    /// Category band of a grid index. Indexes past the grid fall back to `Army`.
    pub fn from_index(index: usize) -> Self {
        u8::try_from((index / COLUMNS) * COLUMNS)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or(Self::Army)
    }

    /// Parse a category name as typed by a user (case-insensitive).
    pub fn parse(name: &str) -> Result<Self> {
        name.trim()
            .parse()
            .map_err(|_| Error::UnknownCategory(name.to_string()))
    }

    /// Grid index of the first cell in this category's band.
    pub fn offset(&self) -> usize {
        *self as usize
    }

    /// Row number of this category's band.
    pub fn row(&self) -> usize {
        self.offset() / COLUMNS
    }

    /// Whether players enter scores in this category.
    pub fn is_scoring(&self) -> bool {
        !matches!(self, Self::People | Self::Sum)
    }

    /// Categories that hold player scores, in row order.
    pub fn scoring() -> impl Iterator<Item = Self> {
        Self::iter().filter(Self::is_scoring)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::People => "Players",
            Self::Army => "Military",
            Self::Coins => "Coins",
            Self::Wonders => "Wonders",
            Self::Blue => "Civilian",
            Self::Yellow => "Commercial",
            Self::Purple => "Guilds",
            Self::Green => "Science",
            Self::Sum => "Total",
        }
    }

    /// Three-letter label used in table headers.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::People => "PLR",
            Self::Army => "MIL",
            Self::Coins => "COI",
            Self::Wonders => "WON",
            Self::Blue => "BLU",
            Self::Yellow => "YEL",
            Self::Purple => "PUR",
            Self::Green => "GRN",
            Self::Sum => "SUM",
        }
    }

    /// Background color of the category's icon cell.
    pub fn color_code(&self) -> &'static str {
        match self {
            Self::People => "#B3FFB3",
            Self::Army => "#FFB3B3",
            Self::Coins => "#FFDDB3",
            Self::Wonders => "#D4C2B3",
            Self::Blue => "#B3B3FF",
            Self::Yellow => "#FFFFB3",
            Self::Purple => "#DDB3DD",
            Self::Green => "#B3FFB3",
            Self::Sum => "#D6D6D8",
        }
    }

    /// RGB triple of `color_code`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.color_code()[1..];
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    /// Icon asset shown in the category's header cell, if any.
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Self::People => Some("people"),
            Self::Coins => Some("coin"),
            Self::Wonders => Some("wonder"),
            Self::Sum => Some("add"),
            Self::Army | Self::Blue | Self::Yellow | Self::Purple | Self::Green => None,
        }
    }
}

impl std::fmt::Display for ScoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_bands() {
        assert_eq!(ScoreType::from_index(0), ScoreType::People);
        assert_eq!(ScoreType::from_index(7), ScoreType::People);
        assert_eq!(ScoreType::from_index(8), ScoreType::Army);
        assert_eq!(ScoreType::from_index(63), ScoreType::Green);
        assert_eq!(ScoreType::from_index(71), ScoreType::Sum);
    }

    #[test]
    fn test_from_index_out_of_range_falls_back_to_army() {
        assert_eq!(ScoreType::from_index(72), ScoreType::Army);
        assert_eq!(ScoreType::from_index(10_000), ScoreType::Army);
    }

    #[test]
    fn test_offsets_and_rows() {
        let offsets: Vec<usize> = ScoreType::iter().map(|t| t.offset()).collect();
        assert_eq!(offsets, vec![0, 8, 16, 24, 32, 40, 48, 56, 64]);
        assert_eq!(ScoreType::Sum.row(), 8);
    }

    #[test]
    fn test_scoring_categories() {
        let scoring: Vec<ScoreType> = ScoreType::scoring().collect();
        assert_eq!(scoring.len(), 7);
        assert_eq!(scoring.first(), Some(&ScoreType::Army));
        assert_eq!(scoring.last(), Some(&ScoreType::Green));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(ScoreType::parse("coins").unwrap(), ScoreType::Coins);
        assert_eq!(ScoreType::parse("Wonders").unwrap(), ScoreType::Wonders);
        assert!(matches!(
            ScoreType::parse("gold"),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_rgb() {
        assert_eq!(ScoreType::Army.rgb(), (0xFF, 0xB3, 0xB3));
    }

    #[test]
    fn test_icons() {
        assert_eq!(ScoreType::Coins.icon(), Some("coin"));
        assert_eq!(ScoreType::Army.icon(), None);
    }
}
