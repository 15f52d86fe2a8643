use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// Uses a prebuilt layout as is, the board built from it is checked against `config`.
impl MineGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> MineLayout {
        if self.size() != Ok(config.size) || self.mine_count() != config.mines {
            log::warn!(
                "Prebuilt layout {:?} with {} mines does not match requested {:?}",
                self.size(),
                self.mine_count(),
                config
            );
        }
        self
    }
}
