use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random mine placement: the first `mines` cells are mined and the
/// whole sequence is then shuffled.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Board> {
        config.validate()?;
        let total_cells = config.total_cells()?;

        let mut cells: Vec<Cell> = (0..total_cells)
            .map(|index| {
                if index < config.mines {
                    Cell::mine()
                } else {
                    Cell::safe()
                }
            })
            .collect();
        // Fisher-Yates
        cells.shuffle(rng);

        let board = Board::from_cells(config.rows, config.cols, cells)?
            .with_flag_policy(config.flag_policy);

        // double check mine count
        if board.mine_count() != config.mines {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} board with {} mines",
            config.rows,
            config.cols,
            board.mine_count()
        );

        Ok(board)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: &GameConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        Self::generate_with_rng(config, &mut rng)
    }
}
