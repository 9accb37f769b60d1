use chess::{Board, ChessMove, Color, MoveGen, Piece, Square};
use std::str::FromStr;

use crate::error::ChessError;
use crate::game::san::move_to_san;
use crate::game::utils::{get_game_status, has_insufficient_material};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The legality oracle a game session is played against.
///
/// Implementations own the authoritative position; the session only ever
/// mirrors what `fen()` reports.
pub trait RulesEngine {
    /// Play `from -> to` if it is legal, returning the move in SAN.
    fn play(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> Result<String, ChessError>;

    /// Legal moves for the side to move.
    fn legal_moves(&self) -> Vec<ChessMove>;

    fn fen(&self) -> String;

    /// Replace the position. Leaves the engine untouched on error.
    fn load(&mut self, fen: &str) -> Result<(), ChessError>;

    fn is_game_over(&self) -> bool;

    fn turn(&self) -> Color;

    fn status(&self) -> &'static str;
}

/// `RulesEngine` backed by the `chess` crate.
///
/// `chess::Board` carries no move counters and no history, so the clocks
/// and the hashes needed for repetition detection are tracked here.
#[derive(Debug, Clone)]
pub struct ChessRules {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    // hashes of every position since the last pawn move or capture
    repetitions: Vec<u64>,
}

impl Default for ChessRules {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessRules {
    pub fn new() -> Self {
        let board = Board::default();
        Self {
            board,
            halfmove_clock: 0,
            fullmove_number: 1,
            repetitions: vec![board.get_hash()],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(ChessError::InvalidPosition(format!(
                "expected 6 fields, found {} in {:?}",
                fields.len(),
                fen
            )));
        }

        let halfmove_clock = fields[4].parse::<u32>().map_err(|_| {
            ChessError::InvalidPosition(format!("bad halfmove clock {:?}", fields[4]))
        })?;
        let fullmove_number = match fields[5].parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(ChessError::InvalidPosition(format!(
                    "bad fullmove number {:?}",
                    fields[5]
                )))
            }
        };

        let board = Board::from_str(&fields[..4].join(" "))
            .map_err(|e| ChessError::InvalidPosition(e.to_string()))?;

        Ok(Self {
            board,
            halfmove_clock,
            fullmove_number,
            repetitions: vec![board.get_hash()],
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn apply(&mut self, mv: ChessMove) -> String {
        let san = move_to_san(&self.board, mv);

        let irreversible = self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || self.board.piece_on(mv.get_dest()).is_some();
        if self.board.side_to_move() == Color::Black {
            self.fullmove_number += 1;
        }

        self.board = self.board.make_move_new(mv);

        if irreversible {
            self.halfmove_clock = 0;
            self.repetitions.clear();
        } else {
            self.halfmove_clock += 1;
        }
        self.repetitions.push(self.board.get_hash());

        san
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = self.board.get_hash();
        self.repetitions.iter().filter(|&&h| h == current).count() >= 3
    }

    fn is_drawn(&self) -> bool {
        self.halfmove_clock >= 100 || self.is_threefold_repetition() || has_insufficient_material(&self.board)
    }
}

impl RulesEngine for ChessRules {
    fn play(&mut self, from: Square, to: Square, promotion: Option<Piece>) -> Result<String, ChessError> {
        let plain = ChessMove::new(from, to, None);
        let mv = if self.board.legal(plain) {
            plain
        } else {
            // promotion only matters when the plain move is not legal on its own
            ChessMove::new(from, to, promotion)
        };

        if !self.board.legal(mv) {
            return Err(ChessError::IllegalMove {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        Ok(self.apply(mv))
    }

    fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    fn fen(&self) -> String {
        // the crate prints "0 1" for the counters and the capturable pawn's square
        // as the en passant field, so only placement, side and castling are kept
        let board_fen = self.board.to_string();
        let head: Vec<&str> = board_fen.split_whitespace().take(3).collect();
        let en_passant = match self.board.en_passant() {
            Some(pawn) => pawn.uforward(self.board.side_to_move()).to_string(),
            None => "-".to_string(),
        };
        format!(
            "{} {} {} {}",
            head.join(" "),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn load(&mut self, fen: &str) -> Result<(), ChessError> {
        *self = Self::from_fen(fen)?;
        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty() || self.is_drawn()
    }

    fn turn(&self) -> Color {
        self.board.side_to_move()
    }

    fn status(&self) -> &'static str {
        get_game_status(&self.board, self.is_drawn())
    }
}
