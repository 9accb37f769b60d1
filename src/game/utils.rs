use chess::{BitBoard, Board, BoardStatus, Color, Piece, Square};

/// Convert a chess color to a string
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::White => "white".to_string(),
        Color::Black => "black".to_string(),
    }
}

/// Capitalised side name used in the move log
pub fn color_label(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

/// Get the game status as a string.
///
/// `drawn` covers the draws the board alone cannot see (fifty-move rule,
/// repetition) as well as insufficient material.
pub fn get_game_status(board: &Board, drawn: bool) -> &'static str {
    match board.status() {
        BoardStatus::Checkmate => match board.side_to_move() {
            Color::White => "black_wins",
            Color::Black => "white_wins",
        },
        BoardStatus::Stalemate => "stalemate",
        _ if drawn => "draw",
        BoardStatus::Ongoing if board.checkers().popcnt() > 0 => "check",
        BoardStatus::Ongoing => match board.side_to_move() {
            Color::White => "white_turn",
            Color::Black => "black_turn",
        },
    }
}

/// Check if neither side has enough material left to deliver mate.
///
/// Covers K vs K, a single minor piece against a bare king, and any number
/// of bishops that all stand on squares of one shade.
pub fn has_insufficient_material(board: &Board) -> bool {
    let heavy = *board.pieces(Piece::Pawn) | *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    if heavy.popcnt() > 0 {
        return false;
    }

    let knights = board.pieces(Piece::Knight).popcnt();
    let bishops: BitBoard = *board.pieces(Piece::Bishop);

    match (knights, bishops.popcnt()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (0, _) => {
            let mut shades = bishops.map(square_shade);
            let first = shades.next();
            shades.all(|shade| Some(shade) == first)
        }
        _ => false,
    }
}

fn square_shade(square: Square) -> usize {
    (square.get_rank().to_index() + square.get_file().to_index()) % 2
}
