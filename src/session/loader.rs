use crate::error::ChessError;
use crate::game::RulesEngine;

/// What a successful load did to the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The engine now holds a different position.
    Replaced,
    /// The string described the position that was already current.
    Unchanged,
}

/// Apply a FEN to the engine, comparing against a snapshot taken before
/// the engine is touched.
pub(crate) fn load_position<R: RulesEngine>(engine: &mut R, fen: &str) -> Result<LoadOutcome, ChessError> {
    let before = engine.fen();
    engine.load(fen)?;

    if engine.fen() == before {
        Ok(LoadOutcome::Unchanged)
    } else {
        Ok(LoadOutcome::Replaced)
    }
}
