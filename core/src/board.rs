use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game from creation to completion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    id: GameId,
    config: GameConfig,
    grid: Array2<Cell>,
    opened_count: CellCount,
    status: GameStatus,
}

impl Board {
    /// Builds a board from a finished mine layout.
    pub fn new(id: GameId, layout: MineLayout) -> Result<Self> {
        let (height, width) = layout.size()?;
        let config = GameConfig::new(width, height, layout.mine_count())?;
        let grid = Array2::from_shape_fn(config.size.to_nd_index(), |(row, col)| {
            if layout.contains_mine((row as Coord, col as Coord)) {
                Cell::Mine
            } else {
                Cell::Hidden
            }
        });

        Ok(Self {
            id,
            config,
            grid,
            opened_count: 0,
            status: Default::default(),
        })
    }

    /// Builds a board for `config`, rejecting generators that ignore it.
    pub fn create(id: GameId, config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let board = Self::new(id, generator.generate(config))?;
        if board.config != config {
            log::warn!(
                "Generated board {:?} does not match requested {:?}",
                board.config,
                config
            );
            return Err(GameError::InvalidParameters("mine layout does not match game config"));
        }
        log::debug!(
            "Created game {} ({}x{}, {} mines)",
            id,
            board.width(),
            board.height(),
            board.mine_count()
        );
        Ok(board)
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.config.size;
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Number of mines among the in-bounds neighbors of a cell.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.adjacent_mine_count(coords))
    }

    /// Reveals a cell, flood-filling from it when it has no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_in_progress()?;
        let coords = self.validate_coords(coords)?;

        Ok(match self.grid[coords.to_nd_index()] {
            Cell::Mine => {
                log::debug!("Game {} hit mine at {:?}", self.id, coords);
                self.reveal_all();
                self.status = GameStatus::Lost;
                RevealOutcome::HitMine
            }
            Cell::Hidden => {
                let opened = self.flood_fill(coords);
                log::debug!("Game {} opened {} cells from {:?}", self.id, opened, coords);

                if self.opened_count + self.config.mines == self.config.total_cells() {
                    self.status = GameStatus::Won;
                    log::debug!("Game {} won", self.id);
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
            Cell::Revealed(_) => {
                let count = self.adjacent_mine_count(coords);
                self.grid[coords.to_nd_index()] = Cell::Revealed(count);
                RevealOutcome::NoChange
            }
            // only present on lost boards, which never get here
            Cell::Exploded => RevealOutcome::NoChange,
        })
    }

    pub fn public_view(&self) -> GameView {
        // mines only turn into `Exploded` on a loss, a won board keeps them hidden
        let grid = self.grid.mapv(|cell| match cell {
            Cell::Hidden | Cell::Mine => CellView::Hidden,
            Cell::Revealed(count) => CellView::Revealed(count),
            Cell::Exploded => CellView::Exploded,
        });

        GameView {
            id: self.id,
            width: self.width(),
            height: self.height(),
            mine_count: self.mine_count(),
            opened_count: self.opened_count,
            status: self.status,
            grid,
        }
    }

    /// Worklist traversal, returns how many cells it opened.
    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            if !matches!(self.grid[visit_coords.to_nd_index()], Cell::Hidden) {
                continue;
            }

            let count = self.adjacent_mine_count(visit_coords);
            self.grid[visit_coords.to_nd_index()] = Cell::Revealed(count);
            self.opened_count += 1;
            opened += 1;
            log::trace!("Flood opened cell at {:?}, mine count: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(self.grid.iter_neighbors(visit_coords));
            }
        }

        opened
    }

    /// Turns every mine into `Exploded` and every other cell into its count.
    fn reveal_all(&mut self) {
        for cell in self.grid.iter_mut() {
            if *cell == Cell::Mine {
                *cell = Cell::Exploded;
            }
        }

        let (rows, cols) = self.config.size;
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !self.grid[coords.to_nd_index()].is_mine() {
                    self.grid[coords.to_nd_index()] =
                        Cell::Revealed(self.adjacent_mine_count(coords));
                }
            }
        }
    }

    fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| self.grid[pos.to_nd_index()].is_mine())
            .count() as u8
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::GameAlreadyCompleted)
        } else {
            Ok(())
        }
    }
}
