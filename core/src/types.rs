use ndarray::Array2;

/// Linear, row-major position of a cell on the board.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (usize, usize);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0, self.1]
    }
}

/// Maps a linear index onto `(row, col)` for a board with `cols` columns.
pub const fn split_index(index: CellIndex, cols: usize) -> Coord2 {
    (index / cols, index % cols)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.dim())
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells(&self, coords: Coord2) -> impl Iterator<Item = T>;
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells(&self, coords: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbors(coords)
            .filter_map(|pos| self.get(pos.to_nd_index()).copied())
    }
}

/// Walks the 3x3 window around a cell, clipped to the board in both axes and
/// skipping the cell itself. Row and column are clipped independently, so the
/// last cell of one row never sees the first cell of the next.
///
/// An off-board center has no neighbours.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    row_end: usize,
    col_start: usize,
    col_end: usize,
    cursor: Coord2,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;

        let on_board = row < rows && col < cols;
        let row_start = row.saturating_sub(1);
        let row_end = if on_board {
            row.saturating_add(2).min(rows)
        } else {
            row_start
        };
        let col_start = col.saturating_sub(1);
        let col_end = col.saturating_add(2).min(cols);

        Self {
            center,
            row_end,
            col_start,
            col_end,
            cursor: (row_start, col_start),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (row, col) = self.cursor;
            if row >= self.row_end {
                return None;
            }
            if col >= self.col_end {
                self.cursor = (row + 1, self.col_start);
                continue;
            }

            self.cursor = (row, col + 1);
            if (row, col) != self.center {
                return Some((row, col));
            }
        }
    }
}
