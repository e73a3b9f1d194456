use std::io;

use thiserror::Error;

/// Fatal failures that end a run.
///
/// A collision is not an error; it surfaces as [`crate::game::Outcome::Lost`].
#[derive(Debug, Error)]
pub enum GameError {
    /// Food placement gave up; the board may simply be full.
    #[error("failed to find a free cell to place food at (maybe you won the game?)")]
    NoFreeCell,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
