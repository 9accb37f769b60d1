use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{ClientMessage, ServerMessage};
use crate::session::{
    EndSession, GameSession, GetLegalTargets, GetSnapshot, LoadPosition, PieceDropped, ResetGame,
    SessionActor, SessionUpdate,
};

/// WebSocket handler for one player's game
///
/// Each connection gets its own `SessionActor`; nothing is shared between
/// connections.
pub struct ChessWebSocket {
    pub id: String,
    pub config: web::Data<Config>,
    pub session: Option<Addr<SessionActor>>,
}

impl ChessWebSocket {
    pub fn new(config: web::Data<Config>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            config,
            session: None,
        }
    }
}

impl Actor for ChessWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let session = GameSession::new(self.config.opponent());
        let subscriber = ctx.address().recipient();
        self.session = Some(SessionActor::new(session, Some(subscriber)).start());

        info!("WebSocket connection started: {}", self.id);
        send_json(
            ctx,
            &ServerMessage {
                message_type: "session_started".to_string(),
                session_id: Some(self.id.clone()),
                ..Default::default()
            },
        );
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let Some(session) = self.session.take() {
            session.do_send(EndSession);
        }
        info!("WebSocket connection closed: {}", self.id);
        Running::Stop
    }
}

impl Handler<SessionUpdate> for ChessWebSocket {
    type Result = ();

    fn handle(&mut self, update: SessionUpdate, ctx: &mut Self::Context) {
        let message = match update {
            SessionUpdate::State(snapshot) => ServerMessage::state(&snapshot),
            SessionUpdate::MoveRejected(e) => ServerMessage::error("move_rejected", e),
            SessionUpdate::PositionRejected(e) => ServerMessage::error("position_rejected", e),
        };
        send_json(ctx, &message);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChessWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientMessage>(text.as_ref()) {
                    Ok(client_msg) => self.handle_message(client_msg, ctx),
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        send_json(ctx, &ServerMessage::error("error", format!("Invalid message format: {}", e)));
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                send_json(ctx, &ServerMessage::error("error", "Binary messages are not supported"));
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}

impl ChessWebSocket {
    pub fn handle_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let session = match &self.session {
            Some(session) => session.clone(),
            None => {
                warn!("Message for {} arrived without a session", self.id);
                return;
            }
        };

        match msg.message_type.as_str() {
            "move" => match msg.move_from {
                Some(from) => session.do_send(PieceDropped { from, to: msg.move_to }),
                None => send_json(ctx, &ServerMessage::error("move_rejected", "Move requires a from square")),
            },
            "load_position" => match msg.fen {
                Some(fen) => session.do_send(LoadPosition(fen)),
                None => send_json(ctx, &ServerMessage::error("position_rejected", "No FEN provided")),
            },
            "reset" => session.do_send(ResetGame),
            "get_moves" => match msg.square {
                Some(square) => self.handle_get_moves(&session, square, ctx),
                None => send_json(ctx, &ServerMessage::error("error", "No square provided")),
            },
            "state" => self.handle_state(&session, ctx),
            other => {
                warn!("Unknown message type: {}", other);
                send_json(ctx, &ServerMessage::error("error", format!("Unknown message type: {}", other)));
            }
        }
    }

    fn handle_get_moves(&self, session: &Addr<SessionActor>, square: String, ctx: &mut ws::WebsocketContext<Self>) {
        let request = session.send(GetLegalTargets(square));
        ctx.spawn(request.into_actor(self).map(|res, _act, ctx| {
            let message = match res {
                Ok(Ok(targets)) => ServerMessage {
                    message_type: "available_moves".to_string(),
                    available_moves: Some(targets),
                    ..Default::default()
                },
                Ok(Err(e)) => ServerMessage::error("error", e),
                Err(e) => ServerMessage::error("error", e),
            };
            send_json(ctx, &message);
        }));
    }

    fn handle_state(&self, session: &Addr<SessionActor>, ctx: &mut ws::WebsocketContext<Self>) {
        let request = session.send(GetSnapshot);
        ctx.spawn(request.into_actor(self).map(|res, _act, ctx| {
            let message = match res {
                Ok(snapshot) => ServerMessage::state(&snapshot),
                Err(e) => ServerMessage::error("error", e),
            };
            send_json(ctx, &message);
        }));
    }
}

fn send_json(ctx: &mut ws::WebsocketContext<ChessWebSocket>, message: &ServerMessage) {
    match serde_json::to_string(message) {
        Ok(text) => ctx.text(text),
        Err(e) => warn!("Error serializing message: {}", e),
    }
}

/// WebSocket connection handler
pub async fn ws_index(req: HttpRequest, stream: web::Payload, config: web::Data<Config>) -> Result<HttpResponse, Error> {
    let ws = ChessWebSocket::new(config);
    info!("New WebSocket connection: {}", ws.id);
    ws::start(ws, &req, stream)
}
