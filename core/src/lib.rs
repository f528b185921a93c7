#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod types;

/// Largest accepted row or column count.
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Whether a flagged cell can be revealed before it is unflagged.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagPolicy {
    /// Flags are markers only: revealing a flagged cell opens it and clears the
    /// flag, and a cascade opens flagged safe cells too.
    Permissive,
    /// Flagged cells refuse to open and stop a cascade.
    Protective,
}

impl Default for FlagPolicy {
    fn default() -> Self {
        Self::Permissive
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    #[serde(default)]
    pub flag_policy: FlagPolicy,
}

impl GameConfig {
    pub const fn new_unchecked(rows: usize, cols: usize, mines: usize) -> Self {
        Self {
            rows,
            cols,
            mines,
            flag_policy: FlagPolicy::Permissive,
        }
    }

    /// Builds a configuration, rejecting empty boards and mine counts that do
    /// not fit.
    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// Forces raw user input into range instead of rejecting it.
    pub fn clamped(rows: usize, cols: usize, mines: usize) -> Self {
        let rows = rows.clamp(1, MAX_DIMENSION);
        let cols = cols.clamp(1, MAX_DIMENSION);
        let mines = mines.min(rows * cols);
        Self::new_unchecked(rows, cols, mines)
    }

    pub const fn with_flag_policy(mut self, flag_policy: FlagPolicy) -> Self {
        self.flag_policy = flag_policy;
        self
    }

    pub fn total_cells(&self) -> Result<usize> {
        self.rows
            .checked_mul(self.cols)
            .ok_or(GameError::BoardTooLarge)
    }

    /// Re-checks a configuration that did not go through [`GameConfig::new`],
    /// e.g. one deserialized from the presentation layer.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.rows > MAX_DIMENSION || self.cols > MAX_DIMENSION {
            return Err(GameError::BoardTooLarge);
        }

        let cells = self.total_cells()?;
        if self.mines > cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
