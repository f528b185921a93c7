use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("Board dimensions overflow the addressable cell count")]
    BoardTooLarge,
    #[error("Too many mines: requested {mines} but the board only has {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("Cell index outside of the board")]
    InvalidIndex,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
