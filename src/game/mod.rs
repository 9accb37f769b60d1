pub mod rules;
pub mod san;
pub mod utils;

pub use rules::{ChessRules, RulesEngine, START_FEN};
