use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells. Shape and mine layout are fixed for the lifetime
/// of the board; only the revealed and flagged bits of each cell change.
///
/// Deserialization goes through `BoardRepr`, so the cached counters are
/// always recomputed from the cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: usize,
    revealed_safe: usize,
    flagged: usize,
    detonated: Option<CellIndex>,
    flag_policy: FlagPolicy,
}

/// Serialized form of a [`Board`]; counter fields are ignored on input.
#[derive(Deserialize)]
struct BoardRepr {
    cells: Array2<Cell>,
    detonated: Option<CellIndex>,
    #[serde(default)]
    flag_policy: FlagPolicy,
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        Ok(Self::from_grid(repr.cells, repr.detonated)?.with_flag_policy(repr.flag_policy))
    }
}

impl Board {
    /// Wraps row-major `cells` into a `rows` x `cols` board. Cells must come
    /// from a game still in play: no revealed mines, no flag on a revealed cell.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let cells = Array2::from_shape_vec((rows, cols), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_grid(cells, None)
    }

    /// Counts mines, revealed safe cells and flags, checking that the grid is
    /// consistent with `detonated`: a lost board has every mine revealed, any
    /// other board has none.
    fn from_grid(cells: Array2<Cell>, detonated: Option<CellIndex>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        if let Some(index) = detonated {
            let is_revealed_mine = cells
                .get(split_index(index, cols).to_nd_index())
                .is_some_and(|cell| cell.is_mine && cell.is_revealed);
            if !is_revealed_mine {
                return Err(GameError::InvalidBoardShape);
            }
        }

        let mut mine_count = 0;
        let mut revealed_safe = 0;
        let mut flagged = 0;
        for cell in cells.iter() {
            if cell.is_flagged {
                flagged += 1;
            }
            match (cell.is_mine, cell.is_revealed) {
                (true, revealed) if revealed != detonated.is_some() => {
                    return Err(GameError::InvalidBoardShape);
                }
                (true, _) => mine_count += 1,
                (false, true) if cell.is_flagged => return Err(GameError::InvalidBoardShape),
                (false, true) => revealed_safe += 1,
                (false, false) => {}
            }
        }

        Ok(Self {
            cells,
            mine_count,
            revealed_safe,
            flagged,
            detonated,
            flag_policy: FlagPolicy::default(),
        })
    }

    /// Builds an unplayed board with mines at the given linear indices.
    pub fn from_mine_indices(rows: usize, cols: usize, mines: &[CellIndex]) -> Result<Self> {
        let total = rows.checked_mul(cols).ok_or(GameError::BoardTooLarge)?;
        let mut cells = alloc::vec![Cell::safe(); total];

        for &index in mines {
            cells
                .get_mut(index)
                .ok_or(GameError::InvalidIndex)?
                .is_mine = true;
        }

        Self::from_cells(rows, cols, cells)
    }

    pub fn with_flag_policy(mut self, flag_policy: FlagPolicy) -> Self {
        self.flag_policy = flag_policy;
        self
    }

    pub fn flag_policy(&self) -> FlagPolicy {
        self.flag_policy
    }

    pub fn rows(&self) -> usize {
        self.cells.dim().0
    }

    pub fn cols(&self) -> usize {
        self.cells.dim().1
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> usize {
        self.total_cells().saturating_sub(self.mine_count)
    }

    /// Number of revealed cells that are not mines.
    pub fn revealed_count(&self) -> usize {
        self.revealed_safe
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged
    }

    /// Mines minus flags. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn detonated(&self) -> Option<CellIndex> {
        self.detonated
    }

    pub fn coords_of(&self, index: CellIndex) -> Option<Coord2> {
        if index < self.total_cells() {
            Some(split_index(index, self.cols()))
        } else {
            None
        }
    }

    /// Linear index of `(row, col)`, or `None` when either lies off the board.
    pub fn index_of(&self, row: isize, col: isize) -> Option<CellIndex> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if row < self.rows() && col < self.cols() {
            Some(row * self.cols() + col)
        } else {
            None
        }
    }

    pub fn cell_at(&self, index: CellIndex) -> Option<Cell> {
        self.coords_of(index)
            .map(|coords| self.cells[coords.to_nd_index()])
    }

    pub fn has_mine_at(&self, index: CellIndex) -> bool {
        self.cell_at(index).is_some_and(|cell| cell.is_mine)
    }

    /// Mines among the up-to-8 neighbours of `index`, or 0 off the board.
    pub fn neighbor_mine_count(&self, index: CellIndex) -> u8 {
        let Some(coords) = self.coords_of(index) else {
            return 0;
        };

        self.cells
            .iter_neighbor_cells(coords)
            .filter(|cell| cell.is_mine)
            .count() as u8
    }

    /// Cells in row-major order, matching linear indices.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn view_at(&self, index: CellIndex) -> Option<CellView> {
        let cell = self.cell_at(index)?;

        Some(match cell {
            Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } if self.detonated == Some(index) => CellView::Exploded,
            Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } => CellView::Mine,
            Cell {
                is_revealed: true, ..
            } => CellView::Revealed(self.neighbor_mine_count(index)),
            Cell {
                is_flagged: true, ..
            } => CellView::Flagged,
            _ => CellView::Hidden,
        })
    }

    pub(crate) fn cell_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        let coords = self.coords_of(index)?;
        self.cells.get_mut(coords.to_nd_index())
    }

    pub(crate) fn note_revealed_safe(&mut self) {
        self.revealed_safe += 1;
    }

    pub(crate) fn note_flag_change(&mut self, flagged: bool) {
        if flagged {
            self.flagged += 1;
        } else {
            self.flagged = self.flagged.saturating_sub(1);
        }
    }

    pub(crate) fn set_detonated(&mut self, index: CellIndex) {
        self.detonated = Some(index);
    }

    pub(crate) fn mine_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_mine)
            .map(|(index, _)| index)
    }
}

/// Read-only query used to label a revealed safe cell.
pub fn neighbor_mine_count(board: &Board, index: CellIndex) -> u8 {
    board.neighbor_mine_count(index)
}
