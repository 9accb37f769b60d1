use serde::{Deserialize, Serialize};

use crate::game::utils::color_to_string;
use crate::models::SessionSnapshot;

/// Message sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientMessage {
    pub message_type: String,
    pub move_from: Option<String>,
    pub move_to: Option<String>,
    pub fen: Option<String>,
    pub square: Option<String>,
}

/// Message sent from server to client
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ServerMessage {
    pub message_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awaiting_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_log: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerMessage {
    pub fn state(snapshot: &SessionSnapshot) -> Self {
        Self {
            message_type: "state".to_string(),
            fen: Some(snapshot.position.clone()),
            turn: Some(color_to_string(snapshot.turn)),
            game_status: Some(snapshot.status.to_string()),
            game_over: Some(snapshot.game_over),
            awaiting_reply: Some(snapshot.awaiting_reply),
            move_log: Some(snapshot.move_log.clone()),
            ..Default::default()
        }
    }

    pub fn error(message_type: &str, error: impl ToString) -> Self {
        Self {
            message_type: message_type.to_string(),
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
