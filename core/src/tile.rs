use core::fmt;

use serde::{Deserialize, Serialize};

/// Internal state of a single cell, mines included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Hidden,
    Mine,
    Revealed(u8),
    Exploded,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::Exploded)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Revealed(u8),
    Exploded,
}

impl CellView {
    /// Single character marker: blank, digit or `X`.
    pub const fn marker(self) -> char {
        match self {
            Self::Hidden => ' ',
            Self::Revealed(count) => (b'0' + count) as char,
            Self::Exploded => 'X',
        }
    }
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}
