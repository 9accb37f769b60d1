//! Standard algebraic notation for moves played on a `chess::Board`.

use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece, Square};

/// Render `mv` in SAN as seen from `board` (the position before the move).
///
/// `mv` must be legal on `board`.
pub fn move_to_san(board: &Board, mv: ChessMove) -> String {
    let from = mv.get_source();
    let to = mv.get_dest();
    let piece = match board.piece_on(from) {
        Some(piece) => piece,
        None => return mv.to_string(),
    };

    let mut san = String::with_capacity(8);
    let file_delta = to.get_file().to_index() as i32 - from.get_file().to_index() as i32;

    if piece == Piece::King && file_delta.abs() == 2 {
        san.push_str(if file_delta > 0 { "O-O" } else { "O-O-O" });
    } else {
        let capture = board.piece_on(to).is_some() || (piece == Piece::Pawn && file_delta != 0);

        if piece == Piece::Pawn {
            if capture {
                san.push(file_char(from));
            }
        } else {
            san.push(piece_letter(piece));
            push_disambiguation(&mut san, board, piece, from, to);
        }

        if capture {
            san.push('x');
        }
        san.push_str(&to.to_string());

        if let Some(promotion) = mv.get_promotion() {
            san.push('=');
            san.push(piece_letter(promotion));
        }
    }

    let after = board.make_move_new(mv);
    if after.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if after.checkers().popcnt() > 0 {
        san.push('+');
    }

    san
}

fn push_disambiguation(san: &mut String, board: &Board, piece: Piece, from: Square, to: Square) {
    let rivals: Vec<Square> = MoveGen::new_legal(board)
        .filter(|m| m.get_dest() == to && m.get_source() != from)
        .map(|m| m.get_source())
        .filter(|sq| board.piece_on(*sq) == Some(piece))
        .collect();

    if rivals.is_empty() {
        return;
    }

    let shares_file = rivals.iter().any(|sq| sq.get_file() == from.get_file());
    let shares_rank = rivals.iter().any(|sq| sq.get_rank() == from.get_rank());

    if !shares_file {
        san.push(file_char(from));
    } else if !shares_rank {
        san.push(rank_char(from));
    } else {
        san.push(file_char(from));
        san.push(rank_char(from));
    }
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn file_char(square: Square) -> char {
    (b'a' + square.get_file().to_index() as u8) as char
}

fn rank_char(square: Square) -> char {
    (b'1' + square.get_rank().to_index() as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn san(fen: &str, from: &str, to: &str, promotion: Option<Piece>) -> String {
        let board = Board::from_str(fen).unwrap();
        let mv = ChessMove::new(
            Square::from_str(from).unwrap(),
            Square::from_str(to).unwrap(),
            promotion,
        );
        assert!(board.legal(mv), "{from}{to} should be legal");
        move_to_san(&board, mv)
    }

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn quiet_pawn_and_piece_moves() {
        assert_eq!(san(START, "e2", "e4", None), "e4");
        assert_eq!(san(START, "g1", "f3", None), "Nf3");
    }

    #[test]
    fn captures() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
        assert_eq!(san(fen, "e4", "d5", None), "exd5");
        let fen = "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2";
        assert_eq!(san(fen, "d8", "d5", None), "Qxd5");
    }

    #[test]
    fn en_passant_is_a_capture() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        assert_eq!(san(fen, "e5", "f6", None), "exf6");
    }

    #[test]
    fn castling() {
        let fen = "r3k2r/pppqbppp/2np1n2/4p3/4P3/2NP1N2/PPPQBPPP/R3K2R w KQkq - 0 1";
        assert_eq!(san(fen, "e1", "g1", None), "O-O");
        assert_eq!(san(fen, "e1", "c1", None), "O-O-O");
    }

    #[test]
    fn knights_disambiguate_by_file() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/5N2/PPP1PPPP/RNBQKB1R w KQkq - 0 1";
        assert_eq!(san(fen, "b1", "d2", None), "Nbd2");
    }

    #[test]
    fn rooks_on_same_file_disambiguate_by_rank() {
        let fen = "4k3/8/8/R7/8/8/8/R3K3 w - - 0 1";
        assert_eq!(san(fen, "a1", "a3", None), "R1a3");
    }

    #[test]
    fn promotion_with_check() {
        let fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(san(fen, "a7", "a8", Some(Piece::Queen)), "a8=Q+");
    }

    #[test]
    fn mate_suffix() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        assert_eq!(san(fen, "h5", "f7", None), "Qxf7#");
    }
}
