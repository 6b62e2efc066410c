// Game error types: startup faults and rejected roster changes

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameError {
    #[error("Rendering surface missing or empty ({width}x{height})")]
    MissingSurface { width: u32, height: u32 },
    #[error("Snake limit of {max} reached")]
    RosterFull { max: usize },
    #[error("At least {min} snake must stay on the grid")]
    RosterMinimum { min: usize },
    #[error("No free cell left on the grid")]
    BoardFull,
}
