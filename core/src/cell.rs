use serde::{Deserialize, Serialize};

/// One grid position. `is_mine` is fixed when the board is generated; only the
/// revealed and flagged bits change during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
}

impl Cell {
    pub const fn safe() -> Self {
        Self {
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
        }
    }

    pub const fn mine() -> Self {
        Self {
            is_mine: true,
            is_revealed: false,
            is_flagged: false,
        }
    }
}

/// What the presentation layer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    /// Revealed safe cell with its neighbour mine count.
    Revealed(u8),
    /// Mine uncovered after the game was lost.
    Mine,
    /// The mine whose reveal lost the game.
    Exploded,
}

impl CellView {
    // whether the cell is visually closed
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
