pub mod actor;
pub mod controller;
pub mod loader;
pub mod move_log;
pub mod scheduler;

pub use actor::{
    EndSession, GetLegalTargets, GetSnapshot, LoadPosition, PieceDropped, ResetGame, SessionActor,
    SessionUpdate,
};
pub use controller::GameSession;
pub use loader::LoadOutcome;
pub use move_log::MoveLog;
pub use scheduler::{OpponentScheduler, ReplyTicket, DEFAULT_REPLY_DELAY};
