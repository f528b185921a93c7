use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: &GameConfig) -> Result<Board>;
}

/// Validates the requested dimensions and generates a fresh board from `seed`.
pub fn new_game(rows: usize, cols: usize, mines: usize, seed: u64) -> Result<Board> {
    let config = GameConfig::new(rows, cols, mines)?;
    RandomBoardGenerator::new(seed).generate(&config)
}
