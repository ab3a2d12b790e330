pub mod burndown;
pub mod columns;
pub mod drag;
pub mod effects;

pub use columns::{derive_board, Board, Column, DEFAULT_COLUMNS};
pub use drag::{apply_drag, DragOp, DragOutcome, DragTarget, StatusChange};
