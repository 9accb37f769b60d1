use thiserror::Error;

/// Everything that can go wrong while driving a game session.
///
/// None of these are fatal: the session stays usable and its state is
/// left exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: String, to: String },
    #[error("Piece was not dropped on a square")]
    MissingTarget,
    #[error("Invalid square: {0}")]
    InvalidSquare(String),
    #[error("Invalid FEN: {0}")]
    InvalidPosition(String),
    #[error("Waiting for the opponent to reply")]
    ReplyPending,
    #[error("The game is over")]
    GameOver,
}

/// Start-up configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },
}
