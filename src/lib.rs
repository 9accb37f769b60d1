//! Play chess against an opponent that picks uniformly random legal moves.
//!
//! `session` holds the game logic, `websocket` and `routes` expose it over
//! HTTP for a board widget.

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod session;
pub mod websocket;

pub use config::Config;
pub use error::{ChessError, ConfigError};
pub use session::GameSession;
