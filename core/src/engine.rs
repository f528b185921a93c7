use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

impl Board {
    /// Derives the game state from the board contents.
    pub fn state(&self) -> GameState {
        if self.detonated().is_some() {
            GameState::Lost
        } else if self.revealed_count() == self.safe_cell_count() {
            GameState::Won
        } else {
            GameState::Playing
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn toggle_flag_in_place(&mut self, index: CellIndex) -> MarkOutcome {
        if self.is_finished() {
            return MarkOutcome::NoChange;
        }

        let Some(cell) = self.cell_mut(index) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        let flagged = cell.is_flagged;
        self.note_flag_change(flagged);
        MarkOutcome::Changed
    }

    pub fn reveal_in_place(&mut self, index: CellIndex) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoChange;
        }

        let Some(cell) = self.cell_at(index) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_revealed || (cell.is_flagged && self.blocks_on_flag()) {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine {
            self.detonate(index);
            return RevealOutcome::HitMine;
        }

        let processed = self.flood_fill(index);
        log::trace!("flood fill from {} opened {} cells", index, processed);

        if self.state() == GameState::Won {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Uncovers every mine. Safe cells are left as they were.
    fn detonate(&mut self, index: CellIndex) {
        let mines: Vec<_> = self.mine_indices().collect();
        for mine in mines {
            if let Some(cell) = self.cell_mut(mine) {
                cell.is_revealed = true;
            }
        }
        self.set_detonated(index);
    }

    /// Opens `start` and, through zero-count cells, the orthogonally connected
    /// region around it. Returns the number of cells opened; each cell is
    /// opened at most once.
    fn flood_fill(&mut self, start: CellIndex) -> usize {
        let cols = self.cols();
        let mut to_visit = alloc::vec![start];
        let mut processed = 0;

        while let Some(index) = to_visit.pop() {
            let Some(cell) = self.cell_at(index) else {
                continue;
            };
            if cell.is_revealed || cell.is_mine || (cell.is_flagged && self.blocks_on_flag()) {
                continue;
            }

            if let Some(cell) = self.cell_mut(index) {
                cell.is_revealed = true;
                if cell.is_flagged {
                    cell.is_flagged = false;
                    self.note_flag_change(false);
                }
            }
            self.note_revealed_safe();
            processed += 1;

            if self.neighbor_mine_count(index) != 0 {
                continue;
            }

            if index >= cols {
                to_visit.push(index - cols);
            }
            to_visit.push(index + cols);
            if index % cols != cols - 1 {
                to_visit.push(index + 1);
            }
            if index % cols != 0 {
                to_visit.push(index - 1);
            }
        }

        processed
    }

    fn blocks_on_flag(&self) -> bool {
        matches!(self.flag_policy(), FlagPolicy::Protective)
    }
}

/// Reveals `index` on a copy of `board`, leaving the original snapshot intact.
pub fn reveal(board: &Board, index: CellIndex) -> (Board, GameState) {
    let mut next = board.clone();
    next.reveal_in_place(index);
    let state = next.state();
    (next, state)
}

/// Toggles the flag on `index` on a copy of `board`.
pub fn toggle_flag(board: &Board, index: CellIndex) -> Board {
    let mut next = board.clone();
    next.toggle_flag_in_place(index);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, cols: usize, mines: &[CellIndex]) -> Board {
        Board::from_mine_indices(rows, cols, mines).unwrap()
    }

    fn revealed(board: &Board) -> Vec<bool> {
        board.cells().map(|cell| cell.is_revealed).collect()
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let start = board(3, 3, &[8]);

        let (next, state) = reveal(&start, 0);

        for index in 0..8 {
            assert!(next.cell_at(index).unwrap().is_revealed, "cell {}", index);
        }
        assert!(!next.cell_at(8).unwrap().is_revealed);
        assert_eq!(next.view_at(0), Some(CellView::Revealed(0)));
        assert_eq!(next.view_at(4), Some(CellView::Revealed(1)));
        assert_eq!(state, GameState::Won);
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let start = board(3, 3, &[8]);

        let (next, state) = reveal(&start, 4);

        assert_eq!(next.revealed_count(), 1);
        assert!(next.cell_at(4).unwrap().is_revealed);
        assert_eq!(state, GameState::Playing);
    }

    #[test]
    fn cascade_is_orthogonal_and_stops_at_numbers() {
        // . . 1 M
        // . . 1 1
        // . . . .
        let start = board(3, 4, &[3]);

        let (next, state) = reveal(&start, 0);

        assert_eq!(state, GameState::Won);
        assert!(!next.cell_at(3).unwrap().is_revealed);

        // mines in the middle keep the far column closed
        let start = board(3, 5, &[2, 7, 12]);
        let (next, state) = reveal(&start, 0);

        assert_eq!(state, GameState::Playing);
        for index in [0, 1, 5, 6, 10, 11] {
            assert!(next.cell_at(index).unwrap().is_revealed, "cell {}", index);
        }
        for index in [3, 4, 8, 9, 13, 14] {
            assert!(!next.cell_at(index).unwrap().is_revealed, "cell {}", index);
        }
    }

    #[test]
    fn flood_fill_opens_each_cell_at_most_once() {
        let mut empty = board(40, 25, &[]);

        let processed = empty.flood_fill(517);

        assert_eq!(processed, empty.total_cells());
        assert_eq!(empty.revealed_count(), empty.total_cells());
        assert_eq!(empty.state(), GameState::Won);
    }

    #[test]
    fn flood_fill_handles_large_boards_without_recursion() {
        let mut empty = board(1000, 1000, &[]);

        assert_eq!(empty.reveal_in_place(0), RevealOutcome::Won);
        assert_eq!(empty.revealed_count(), 1_000_000);
    }

    #[test]
    fn flood_fill_ignores_out_of_range_start() {
        let mut start = board(2, 2, &[]);

        assert_eq!(start.flood_fill(4), 0);
        assert_eq!(start.reveal_in_place(usize::MAX), RevealOutcome::NoChange);
        assert_eq!(start.revealed_count(), 0);
    }

    #[test]
    fn reveal_hits_mine_and_uncovers_all_mines() {
        let mut start = board(3, 3, &[0, 5, 8]);
        start.reveal_in_place(2);
        let before = revealed(&start);

        let (next, state) = reveal(&start, 5);

        assert_eq!(state, GameState::Lost);
        assert_eq!(next.detonated(), Some(5));
        for (index, cell) in next.cells().enumerate() {
            if cell.is_mine {
                assert!(cell.is_revealed, "mine {}", index);
            } else {
                assert_eq!(cell.is_revealed, before[index], "cell {}", index);
            }
        }
        assert_eq!(next.view_at(5), Some(CellView::Exploded));
        assert_eq!(next.view_at(0), Some(CellView::Mine));
    }

    #[test]
    fn reveal_leaves_prior_snapshot_unchanged() {
        let start = board(3, 3, &[8]);
        let copy = start.clone();

        let (next, _) = reveal(&start, 0);
        let flagged = toggle_flag(&start, 8);

        assert_eq!(start, copy);
        assert_ne!(next, start);
        assert_ne!(flagged, start);
    }

    #[test]
    fn win_detected_in_any_reveal_order() {
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for order in orders {
            // mine in the last cell, every safe cell is numbered
            let mut current = board(2, 2, &[3]);
            for (step, &index) in order.iter().enumerate() {
                let (next, state) = reveal(&current, index);
                if step == order.len() - 1 {
                    assert_eq!(state, GameState::Won, "order {:?}", order);
                } else {
                    assert_eq!(state, GameState::Playing, "order {:?}", order);
                }
                current = next;
            }
        }
    }

    #[test]
    fn terminal_board_ignores_reveals_and_flags() {
        let (lost, state) = reveal(&board(2, 2, &[3]), 3);
        assert_eq!(state, GameState::Lost);

        let (after, state) = reveal(&lost, 0);
        assert_eq!(after, lost);
        assert_eq!(state, GameState::Lost);
        assert_eq!(toggle_flag(&lost, 0), lost);
    }

    #[test]
    fn revealing_revealed_cell_is_no_change() {
        let mut start = board(2, 2, &[3]);

        assert_eq!(start.reveal_in_place(0), RevealOutcome::Revealed);
        assert_eq!(start.reveal_in_place(0), RevealOutcome::NoChange);
        assert_eq!(start.revealed_count(), 1);
    }

    #[test]
    fn toggle_flag_twice_restores_cell() {
        let start = board(2, 2, &[3]);

        let once = toggle_flag(&start, 1);
        let twice = toggle_flag(&once, 1);

        assert!(once.cell_at(1).unwrap().is_flagged);
        assert_eq!(once.flagged_count(), 1);
        assert_eq!(once.mines_left(), 0);
        assert_eq!(once.view_at(1), Some(CellView::Flagged));
        assert_eq!(twice, start);
        assert_eq!(once.state(), GameState::Playing);
    }

    #[test]
    fn toggle_flag_ignores_revealed_and_out_of_range_cells() {
        let mut start = board(2, 2, &[3]);
        start.reveal_in_place(0);

        assert_eq!(start.toggle_flag_in_place(0), MarkOutcome::NoChange);
        assert_eq!(start.toggle_flag_in_place(4), MarkOutcome::NoChange);
        assert_eq!(start.flagged_count(), 0);
    }

    #[test]
    fn permissive_policy_reveals_flagged_cells() {
        let mut start = board(3, 3, &[8]);
        start.toggle_flag_in_place(0);
        start.toggle_flag_in_place(2);

        assert_eq!(start.reveal_in_place(0), RevealOutcome::Won);
        assert_eq!(start.flagged_count(), 0);
        assert!(start.cells().all(|cell| !(cell.is_flagged && cell.is_revealed)));
    }

    #[test]
    fn permissive_policy_detonates_flagged_mine() {
        let mut start = board(3, 3, &[2, 6]);
        start.toggle_flag_in_place(2);
        start.reveal_in_place(4);
        let before = revealed(&start);

        let (next, state) = reveal(&start, 2);

        assert_eq!(state, GameState::Lost);
        assert_eq!(next.detonated(), Some(2));
        assert_eq!(next.view_at(2), Some(CellView::Exploded));
        assert_eq!(next.view_at(6), Some(CellView::Mine));
        for (index, cell) in next.cells().enumerate() {
            if cell.is_mine {
                assert!(cell.is_revealed, "mine {}", index);
            } else {
                assert_eq!(cell.is_revealed, before[index], "cell {}", index);
            }
        }
    }

    #[test]
    fn protective_policy_keeps_flagged_mine_closed() {
        let mut start = board(3, 3, &[2, 6]).with_flag_policy(FlagPolicy::Protective);
        start.toggle_flag_in_place(2);

        assert_eq!(start.reveal_in_place(2), RevealOutcome::NoChange);
        assert_eq!(start.state(), GameState::Playing);
    }

    #[test]
    fn protective_policy_keeps_flagged_cells_closed() {
        let mut start = board(3, 3, &[8]).with_flag_policy(FlagPolicy::Protective);
        start.toggle_flag_in_place(0);
        start.toggle_flag_in_place(2);

        assert_eq!(start.reveal_in_place(0), RevealOutcome::NoChange);
        assert_eq!(start.reveal_in_place(3), RevealOutcome::Revealed);
        assert!(!start.cell_at(0).unwrap().is_revealed);
        assert!(!start.cell_at(2).unwrap().is_revealed);
        assert_eq!(start.flagged_count(), 2);
    }

    #[test]
    fn fully_mined_board_is_already_won() {
        let full = board(2, 2, &[0, 1, 2, 3]);

        assert_eq!(full.state(), GameState::Won);
    }

    #[test]
    fn mine_free_board_is_won_by_first_reveal() {
        let (next, state) = reveal(&board(4, 4, &[]), 5);

        assert_eq!(state, GameState::Won);
        assert_eq!(next.revealed_count(), 16);
    }
}
