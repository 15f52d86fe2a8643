use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement: pick a cell, retry if it already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        let (rows, cols) = config.size;
        let mut mines = config.mines;

        // rejection sampling never terminates on a full board
        if mines >= config.total_cells() {
            log::warn!(
                "Requested {} mines but only {} cells fit, keeping one cell safe",
                mines,
                config.total_cells()
            );
            mines = config.total_cells().saturating_sub(1);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut attempts: u32 = 0;

        while mines_placed < mines {
            attempts += 1;
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let tile = &mut mine_mask[coords.to_nd_index()];
            if !*tile {
                *tile = true;
                mines_placed += 1;
            }
        }

        log::trace!(
            "Placed {} mines on {}x{} in {} attempts",
            mines_placed,
            config.width(),
            config.height(),
            attempts
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
