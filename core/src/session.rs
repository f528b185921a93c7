use crate::*;

/// Everything a presentation layer needs to run one game after another: the
/// active configuration, an optional pending one and the current snapshot.
///
/// Configuration changes are staged and only take effect on the next
/// [`GameSession::reset`].
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    config: GameConfig,
    pending: Option<GameConfig>,
    board: Board,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let board = RandomBoardGenerator::new(seed).generate(&config)?;
        Ok(Self {
            config,
            pending: None,
            board,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.board.state()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn pending_config(&self) -> Option<&GameConfig> {
        self.pending.as_ref()
    }

    /// Stages new dimensions for the next reset.
    pub fn configure(&mut self, rows: usize, cols: usize, mines: usize) -> Result<()> {
        let flag_policy = self.next_config().flag_policy;
        let config = GameConfig::new(rows, cols, mines)?.with_flag_policy(flag_policy);
        self.pending = Some(config);
        Ok(())
    }

    pub fn set_flag_policy(&mut self, flag_policy: FlagPolicy) {
        self.pending = Some(self.next_config().with_flag_policy(flag_policy));
    }

    /// Starts over with a freshly generated board, applying any staged
    /// configuration.
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        let config = self.next_config();
        self.board = RandomBoardGenerator::new(seed).generate(&config)?;
        self.config = config;
        self.pending = None;
        log::debug!("Session reset with {:?}", self.config);
        Ok(())
    }

    pub fn reveal(&mut self, index: CellIndex) -> GameState {
        let previous = self.state();
        let (board, state) = crate::reveal(&self.board, index);
        self.board = board;

        if state != previous {
            log::debug!("Reveal at {} moved game from {:?} to {:?}", index, previous, state);
        }
        state
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> MarkOutcome {
        let mut board = self.board.clone();
        let outcome = board.toggle_flag_in_place(index);
        if outcome.has_update() {
            self.board = board;
        }
        outcome
    }

    fn next_config(&self) -> GameConfig {
        self.pending.unwrap_or(self.config)
    }
}
