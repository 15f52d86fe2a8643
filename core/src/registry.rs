use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use hashbrown::HashMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Derive every board's mine layout from this seed instead of OS entropy.
    pub seed: Option<u64>,
}

type BoardHandle = Arc<Mutex<Board>>;

/// Owns every game session, keyed by id.
///
/// The map lock is only held to find or insert a board, moves run under the
/// board's own lock so independent games never wait on each other.
#[derive(Debug)]
pub struct Registry {
    games: RwLock<HashMap<GameId, BoardHandle>>,
    seeds: Mutex<SmallRng>,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        let seeds = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        log::debug!("Registry created, seeded: {}", config.seed.is_some());
        Self {
            games: RwLock::new(HashMap::new()),
            seeds: Mutex::new(seeds),
        }
    }

    /// Starts a new game and returns its initial view.
    pub fn new_game(&self, width: Coord, height: Coord, mines: CellCount) -> Result<GameView> {
        let config = GameConfig::new(width, height, mines).inspect_err(|err| {
            log::debug!("Rejected new game {}x{} with {} mines: {}", width, height, mines, err);
        })?;
        let generator = RandomMineGenerator::new(self.next_seed());

        let mut games = self.games.write().unwrap_or_else(PoisonError::into_inner);
        let id = loop {
            let id = GameId::random();
            if !games.contains_key(&id) {
                break id;
            }
        };
        let board = Board::create(id, config, generator)?;
        let view = board.public_view();
        games.insert(id, Arc::new(Mutex::new(board)));

        log::info!("Game {} started, {} active games", id, games.len());
        Ok(view)
    }

    /// Reveals a cell in a running game and returns the updated view.
    pub fn make_move(&self, id: GameId, coords: Coord2) -> Result<GameView> {
        let handle = self.board(id)?;
        let mut board = lock(&handle);

        let outcome = board.reveal(coords).inspect_err(|err| {
            log::debug!("Rejected move {:?} in game {}: {}", coords, id, err);
        })?;
        log::debug!("Move {:?} in game {}: {:?}", coords, id, outcome);
        if board.is_finished() {
            log::info!("Game {} finished: {:?}", id, board.status());
        }

        Ok(board.public_view())
    }

    /// Current view of a game without touching it.
    pub fn view(&self, id: GameId) -> Result<GameView> {
        let handle = self.board(id)?;
        let board = lock(&handle);
        Ok(board.public_view())
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn board(&self, id: GameId) -> Result<BoardHandle> {
        let games = self.games.read().unwrap_or_else(PoisonError::into_inner);
        games.get(&id).cloned().ok_or_else(|| {
            log::debug!("Game {} not found", id);
            GameError::GameNotFound(id)
        })
    }

    fn next_seed(&self) -> u64 {
        lock(&self.seeds).random()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

/// Board mutation never panics halfway, so a poisoned lock still guards a consistent value.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
