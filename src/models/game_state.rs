use chess::Color;

use crate::game::utils::color_label;
use crate::session::move_log::MoveLog;

/// One ply as it was played. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    ply: usize,
    mover: Color,
    san: String,
    position_after: String,
}

impl MoveRecord {
    pub(crate) fn new(ply: usize, mover: Color, san: String, position_after: String) -> Self {
        Self { ply, mover, san, position_after }
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn mover(&self) -> Color {
        self.mover
    }

    pub fn san(&self) -> &str {
        &self.san
    }

    pub fn position_after(&self) -> &str {
        &self.position_after
    }

    /// Full move number this ply belongs to, counted from the start of the log.
    pub fn move_number(&self) -> usize {
        self.ply / 2 + 1
    }

    /// Log line as shown next to the board, e.g. `1. White: e4`.
    pub fn display_line(&self) -> String {
        format!("{}. {}: {}", self.move_number(), color_label(self.mover), self.san)
    }
}

/// Game state for the session
///
/// Owned by `GameSession`; everything except the log is re-read from the
/// rules engine after each change.
#[derive(Debug, Clone)]
pub struct GameState {
    pub position: String,
    pub turn: Color,
    pub log: MoveLog,
    pub game_over: bool,
}

/// Read-only view of a session handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub position: String,
    pub turn: Color,
    pub status: &'static str,
    pub game_over: bool,
    pub awaiting_reply: bool,
    pub move_log: Vec<String>,
}
