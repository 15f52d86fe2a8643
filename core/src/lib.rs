use core::fmt;
use core::ops::Index;
use core::str::FromStr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use board::*;
pub use error::*;
pub use generator::*;
pub use registry::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod board;
mod error;
mod generator;
mod registry;
mod tile;
mod types;
mod view;

/// Largest accepted board width or height.
pub const MAX_SIDE: Coord = 30;

/// Opaque identifier of a game session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(Uuid);

impl GameId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Board dimensions and mine count, `size` is `(height, width)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the parameters of a new game, at least one cell must stay safe.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidParameters("board must have at least one cell"));
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(GameError::InvalidParameters("board side exceeds 30 cells"));
        }
        if mines >= mult(width, height) {
            return Err(GameError::InvalidParameters("too many mines for board size"));
        }
        Ok(Self::new_unchecked((height, width), mines))
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Mine positions of a board before play starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// `size` is `(height, width)`, duplicate coordinates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    /// `(height, width)`, masks wider or taller than `Coord::MAX` are rejected.
    pub fn size(&self) -> Result<Coord2> {
        let (rows, cols) = self.mine_mask.dim();
        match (Coord::try_from(rows), Coord::try_from(cols)) {
            (Ok(rows), Ok(cols)) => Ok((rows, cols)),
            _ => Err(GameError::InvalidParameters("mine layout exceeds board coordinates")),
        }
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already revealed.
    NoChange,
    Revealed,
    HitMine,
    Won,
}
