use chess::{Board, Color, MoveGen};

use chess_vs_random::game::{RulesEngine, START_FEN};
use chess_vs_random::session::{GameSession, LoadOutcome, OpponentScheduler, DEFAULT_REPLY_DELAY};
use chess_vs_random::ChessError;

const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
const SCHOLARS_SETUP: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";

fn session(seed: u64) -> GameSession {
    GameSession::new(OpponentScheduler::seeded(DEFAULT_REPLY_DELAY, seed))
}

fn fire_reply(session: &mut GameSession) -> bool {
    match session.pending_reply() {
        Some(ticket) => session.play_opponent_reply(ticket).is_some(),
        None => false,
    }
}

#[test]
fn e4_then_automated_reply() {
    let mut s = session(1);
    assert!(s.apply_human_move("e2", Some("e4")));
    assert!(s.state().position.starts_with(AFTER_E4));
    assert_eq!(s.state().log.len(), 1);

    assert!(fire_reply(&mut s));
    assert_eq!(s.state().log.len(), 2);
    assert_eq!(s.state().turn, Color::White);
}

#[test]
fn illegal_move_changes_nothing() {
    let mut s = session(1);
    let before = s.state().clone();

    assert!(!s.apply_human_move("e2", Some("e5")));
    assert!(!s.apply_human_move("e2", None));
    assert!(!s.apply_human_move("e7", Some("e5")));

    assert_eq!(s.state().position, before.position);
    assert_eq!(s.state().turn, before.turn);
    assert_eq!(s.state().game_over, before.game_over);
    assert_eq!(s.state().log.len(), 0);
    assert!(s.pending_reply().is_none());
}

#[test]
fn every_legal_opening_move_is_accepted() {
    let board = Board::default();
    for mv in MoveGen::new_legal(&board) {
        let mut s = session(3);
        let from = mv.get_source().to_string();
        let to = mv.get_dest().to_string();
        assert!(s.apply_human_move(&from, Some(&to)), "{from}{to} rejected");
        assert_eq!(s.state().position, s.engine().fen());
        assert_eq!(s.state().turn, Color::Black);
    }
}

#[test]
fn log_grows_by_two_per_full_move() {
    let mut s = session(11);
    for round in 0..6 {
        let mv = MoveGen::new_legal(s.engine().board())
            .next()
            .expect("game ended before the human could move");
        let from = mv.get_source().to_string();
        let to = mv.get_dest().to_string();
        assert!(s.apply_human_move(&from, Some(&to)));

        if s.state().game_over {
            assert_eq!(s.state().log.len(), 2 * round + 1);
            return;
        }
        assert!(fire_reply(&mut s));
        assert_eq!(s.state().log.len(), 2 * (round + 1));
        if s.state().game_over {
            return;
        }
    }
}

#[test]
fn log_names_the_side_that_moved() {
    // The log attributes each ply to the side that just moved, not the
    // side that is to move afterwards.
    let mut s = session(5);
    s.apply_human_move("e2", Some("e4"));
    fire_reply(&mut s);

    let records = s.state().log.records();
    assert_eq!(records[0].mover(), Color::White);
    assert_eq!(records[1].mover(), Color::Black);
    assert_eq!(s.state().log.lines()[0], "1. White: e4");
    assert!(s.state().log.lines()[1].starts_with("1. Black: "));
}

#[test]
fn same_seed_same_game() {
    let mut a = session(2024);
    let mut b = session(2024);
    for (from, to) in [("e2", "e4"), ("d2", "d3"), ("g1", "f3")] {
        let ok_a = a.apply_human_move(from, Some(to)) && fire_reply(&mut a);
        let ok_b = b.apply_human_move(from, Some(to)) && fire_reply(&mut b);
        assert_eq!(ok_a, ok_b);
    }
    assert_eq!(a.state().log.lines(), b.state().log.lines());
}

#[test]
fn reloading_current_position_keeps_log() {
    let mut s = session(1);
    s.apply_human_move("e2", Some("e4"));
    fire_reply(&mut s);
    let current = s.state().position.clone();

    assert_eq!(s.try_load_position(&current), Ok(LoadOutcome::Unchanged));
    assert_eq!(s.state().log.len(), 2);
    assert_eq!(s.state().position, current);
}

#[test]
fn loading_different_position_clears_log() {
    let mut s = session(1);
    s.apply_human_move("e2", Some("e4"));
    fire_reply(&mut s);

    assert!(s.load_position(SCHOLARS_SETUP));
    assert_eq!(s.state().position, SCHOLARS_SETUP);
    assert_eq!(s.state().turn, Color::White);
    assert!(s.state().log.is_empty());
}

#[test]
fn malformed_position_is_a_no_op() {
    let mut s = session(1);
    s.apply_human_move("e2", Some("e4"));
    let before = s.state().position.clone();
    let pending = s.pending_reply();

    assert!(!s.load_position("invalidfen"));
    assert!(matches!(
        s.try_load_position("invalidfen"),
        Err(ChessError::InvalidPosition(_))
    ));
    assert_eq!(s.state().position, before);
    assert_eq!(s.state().log.len(), 1);
    assert_eq!(s.pending_reply(), pending);
}

#[test]
fn load_cancels_pending_reply() {
    let mut s = session(1);
    s.apply_human_move("e2", Some("e4"));
    let stale = s.pending_reply().unwrap();

    assert!(s.load_position(SCHOLARS_SETUP));
    assert!(s.pending_reply().is_none());
    assert!(s.play_opponent_reply(stale).is_none());
    assert_eq!(s.state().position, SCHOLARS_SETUP);
}

#[test]
fn reset_restores_start_and_cancels_reply() {
    let mut s = session(1);
    s.apply_human_move("e2", Some("e4"));
    let stale = s.pending_reply().unwrap();

    s.reset();
    assert_eq!(s.state().position, START_FEN);
    assert!(s.state().log.is_empty());
    assert!(s.play_opponent_reply(stale).is_none());
    assert!(s.state().log.is_empty());
}

#[test]
fn no_reply_after_mate() {
    let mut s = session(1);
    assert!(s.load_position(SCHOLARS_SETUP));
    assert!(s.apply_human_move("h5", Some("f7")));

    assert!(s.state().game_over);
    assert_eq!(s.state().log.lines(), vec!["1. White: Qxf7#"]);
    assert!(s.pending_reply().is_none());

    assert!(!s.apply_human_move("e8", Some("e7")));
    assert!(s.pending_reply().is_none());
    assert_eq!(s.snapshot().status, "white_wins");
}

#[test]
fn drawn_positions_accept_no_moves() {
    for (drawn, from, to) in [
        // fifty-move rule, legal moves remain
        ("4k3/8/8/8/8/8/4P3/R3K3 w - - 100 80", "e1", "d1"),
        // bare kings
        ("8/8/4k3/8/8/3K4/8/8 w - - 0 1", "d3", "d4"),
    ] {
        let mut s = session(1);
        assert!(s.load_position(drawn));
        assert!(s.state().game_over, "{drawn} should be over");

        assert!(matches!(s.try_human_move(from, Some(to)), Err(ChessError::GameOver)));
        assert!(s.state().game_over);
        assert!(s.state().log.is_empty());
        assert!(s.pending_reply().is_none());
        assert_eq!(s.state().position, drawn);
    }
}

#[test]
fn move_reaching_fifty_move_draw_gets_no_reply() {
    let mut s = session(1);
    assert!(s.load_position("4k3/8/8/8/8/8/4P3/R3K3 w - - 99 80"));
    assert!(!s.state().game_over);

    assert!(s.apply_human_move("a1", Some("a2")));
    assert!(s.state().game_over);
    assert_eq!(s.snapshot().status, "draw");
    assert!(s.pending_reply().is_none());
    assert!(!s.apply_human_move("a2", Some("a1")));
    assert_eq!(s.state().log.len(), 1);
}

#[test]
fn repetition_ends_the_game() {
    // the black king can only step between a8 and a7
    let mut s = session(1);
    assert!(s.load_position("k7/8/2K5/2N5/8/8/8/1R6 w - - 0 1"));

    for (i, (from, to)) in [("b1", "b2"), ("b2", "b1"), ("b1", "b2"), ("b2", "b1")]
        .into_iter()
        .enumerate()
    {
        assert!(!s.state().game_over, "over too early at round {i}");
        assert!(s.apply_human_move(from, Some(to)));
        assert!(fire_reply(&mut s));
    }

    assert!(s.state().game_over);
    assert_eq!(s.snapshot().status, "draw");
    assert!(s.pending_reply().is_none());
    assert!(matches!(s.try_human_move("b1", Some("b2")), Err(ChessError::GameOver)));
    assert_eq!(s.state().log.len(), 8);
}

#[test]
fn en_passant_square_in_logged_position() {
    let mut s = session(1);
    assert!(s.load_position("rnbqkbnr/pppp1ppp/8/8/4p3/8/PPPPPPPP/RNBQKBNR w KQkq - 0 2"));
    assert!(s.apply_human_move("d2", Some("d4")));

    let expected = "rnbqkbnr/pppp1ppp/8/8/3Pp3/8/PPP1PPPP/RNBQKBNR b KQkq d3 0 2";
    assert_eq!(s.state().position, expected);
    assert_eq!(s.state().log.records()[0].position_after(), expected);
    assert_eq!(s.snapshot().position, expected);
}

#[test]
fn stalemate_position_accepts_no_moves() {
    let mut s = session(1);
    assert!(s.load_position("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1"));
    assert!(s.state().game_over);
    assert!(!s.apply_human_move("a8", Some("a7")));
    assert!(s.pending_reply().is_none());
}

#[test]
fn promotion_defaults_to_queen() {
    let mut s = session(1);
    assert!(s.load_position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1"));
    assert!(s.apply_human_move("a7", Some("a8")));
    assert_eq!(s.state().log.lines(), vec!["1. White: a8=Q+"]);
    assert!(s.state().position.starts_with("Q3k3/"));
}
