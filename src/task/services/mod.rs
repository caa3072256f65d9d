//! Application services coordinating the board.

mod board;

pub use board::{
    BoardError, BoardOperation, BoardResult, BoardService, BoardView, MoveOutcome,
};
