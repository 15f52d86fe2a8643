use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-facing snapshot of a board, never exposes hidden mines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    pub width: Coord,
    pub height: Coord,
    pub mine_count: CellCount,
    pub opened_count: CellCount,
    pub status: GameStatus,
    /// `height` rows of `width` cells
    pub grid: Array2<CellView>,
}

impl GameView {
    pub fn completed(&self) -> bool {
        self.status.is_finished()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.grid.get(coords.to_nd_index()).copied()
    }

    /// Grid as rows of single character markers.
    pub fn marker_rows(&self) -> Vec<Vec<char>> {
        self.grid
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.marker()).collect())
            .collect()
    }

    pub fn count_cells(&self, view: CellView) -> usize {
        self.grid.iter().filter(|&&cell| cell == view).count()
    }
}
