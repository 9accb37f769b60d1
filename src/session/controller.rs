use chess::{Piece, Square};
use log::{debug, info, warn};
use std::str::FromStr;

use crate::error::ChessError;
use crate::game::{ChessRules, RulesEngine, START_FEN};
use crate::models::{GameState, MoveRecord, SessionSnapshot};
use crate::session::loader::{self, LoadOutcome};
use crate::session::move_log::MoveLog;
use crate::session::scheduler::{OpponentScheduler, ReplyTicket};

/// One human-vs-random game.
///
/// Owns the rules engine, the game state mirrored from it and the
/// opponent scheduler. Every entry point either completes fully or leaves
/// the state as it was.
#[derive(Debug)]
pub struct GameSession<R: RulesEngine = ChessRules> {
    engine: R,
    state: GameState,
    opponent: OpponentScheduler,
}

impl GameSession<ChessRules> {
    pub fn new(opponent: OpponentScheduler) -> Self {
        Self::with_engine(ChessRules::new(), opponent)
    }
}

impl<R: RulesEngine> GameSession<R> {
    pub fn with_engine(engine: R, opponent: OpponentScheduler) -> Self {
        let state = GameState {
            position: engine.fen(),
            turn: engine.turn(),
            log: MoveLog::new(),
            game_over: engine.is_game_over(),
        };
        Self { engine, state, opponent }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn engine(&self) -> &R {
        &self.engine
    }

    /// The opponent reply waiting to be played, if any.
    pub fn pending_reply(&self) -> Option<ReplyTicket> {
        self.opponent.pending()
    }

    /// Play a piece drop from the board. Returns whether it was accepted.
    pub fn apply_human_move(&mut self, from: &str, to: Option<&str>) -> bool {
        match self.try_human_move(from, to) {
            Ok(_) => true,
            Err(e) => {
                debug!("Rejected move {} -> {:?}: {}", from, to, e);
                false
            }
        }
    }

    /// Play a human move, promoting to a queen when a promotion is needed,
    /// and schedule the opponent's reply unless the game just ended.
    pub fn try_human_move(&mut self, from: &str, to: Option<&str>) -> Result<&MoveRecord, ChessError> {
        let to = to.ok_or(ChessError::MissingTarget)?;
        let from_square = parse_square(from)?;
        let to_square = parse_square(to)?;

        if self.state.game_over {
            return Err(ChessError::GameOver);
        }
        if self.opponent.pending().is_some() {
            return Err(ChessError::ReplyPending);
        }

        let mover = self.engine.turn();
        let san = self.engine.play(from_square, to_square, Some(Piece::Queen))?;
        self.commit(mover, san);

        if self.state.game_over {
            info!("Game over after human move: {}", self.engine.status());
        } else {
            let ticket = self.opponent.schedule();
            debug!("Opponent reply scheduled in {:?}", ticket.delay());
        }

        Ok(self.last_record())
    }

    /// Play the opponent's random reply for `ticket`.
    ///
    /// Returns `None` without touching anything if the ticket was cancelled
    /// or superseded, or if the game is already over.
    pub fn play_opponent_reply(&mut self, ticket: ReplyTicket) -> Option<&MoveRecord> {
        if !self.opponent.claim(ticket) {
            debug!("Ignoring stale opponent reply");
            return None;
        }
        if self.engine.is_game_over() {
            return None;
        }

        let moves = self.engine.legal_moves();
        let choice = self.opponent.choose(&moves)?;
        let mover = self.engine.turn();
        let san = match self
            .engine
            .play(choice.get_source(), choice.get_dest(), choice.get_promotion())
        {
            Ok(san) => san,
            Err(e) => {
                warn!("Engine refused its own legal move {}: {}", choice, e);
                return None;
            }
        };
        self.commit(mover, san);
        Some(self.last_record())
    }

    /// Load a position typed by the user. Returns whether it was accepted.
    pub fn load_position(&mut self, fen: &str) -> bool {
        match self.try_load_position(fen) {
            Ok(_) => true,
            Err(e) => {
                warn!("Rejected position {:?}: {}", fen, e);
                false
            }
        }
    }

    /// Replace the position. The move log survives only if the position
    /// did not actually change. Any pending opponent reply is dropped.
    pub fn try_load_position(&mut self, fen: &str) -> Result<LoadOutcome, ChessError> {
        let outcome = loader::load_position(&mut self.engine, fen)?;

        self.opponent.cancel();
        if outcome == LoadOutcome::Replaced {
            self.state.log.clear();
        }
        self.sync();

        info!("Position loaded ({:?}): {}", outcome, self.state.position);
        Ok(outcome)
    }

    /// Back to the initial position with an empty log.
    pub fn reset(&mut self) {
        self.opponent.cancel();
        if let Err(e) = self.engine.load(START_FEN) {
            // START_FEN is a constant, a failure here means a broken engine
            warn!("Engine rejected the start position: {}", e);
        }
        self.state.log.clear();
        self.sync();
        info!("Session reset");
    }

    /// Destination squares reachable from `from` in the current position.
    pub fn legal_targets(&self, from: &str) -> Result<Vec<String>, ChessError> {
        let from = parse_square(from)?;
        Ok(self
            .engine
            .legal_moves()
            .into_iter()
            .filter(|m| m.get_source() == from)
            .map(|m| m.get_dest().to_string())
            .fold(Vec::new(), |mut targets, dest| {
                // under-promotions share a destination
                if !targets.contains(&dest) {
                    targets.push(dest);
                }
                targets
            }))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            position: self.state.position.clone(),
            turn: self.state.turn,
            status: self.engine.status(),
            game_over: self.state.game_over,
            awaiting_reply: self.opponent.pending().is_some(),
            move_log: self.state.log.lines(),
        }
    }

    fn commit(&mut self, mover: chess::Color, san: String) {
        self.sync();
        self.state.log.append(mover, san, self.state.position.clone());
    }

    fn sync(&mut self) {
        self.state.position = self.engine.fen();
        self.state.turn = self.engine.turn();
        self.state.game_over = self.engine.is_game_over();
    }

    fn last_record(&self) -> &MoveRecord {
        // only called right after an append
        &self.state.log.records()[self.state.log.len() - 1]
    }
}

fn parse_square(s: &str) -> Result<Square, ChessError> {
    Square::from_str(&s.trim().to_lowercase()).map_err(|_| ChessError::InvalidSquare(s.to_string()))
}
