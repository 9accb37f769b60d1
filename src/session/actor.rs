use actix::prelude::*;
use log::{debug, info, warn};

use crate::error::ChessError;
use crate::models::SessionSnapshot;
use crate::session::controller::GameSession;
use crate::session::scheduler::ReplyTicket;

/// Pushed to the subscriber whenever the session changes or refuses input.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub enum SessionUpdate {
    State(SessionSnapshot),
    MoveRejected(ChessError),
    PositionRejected(ChessError),
}

/// A piece dropped on the board. `to` is `None` when dropped off the board.
#[derive(Message, Debug, Clone)]
#[rtype(result = "bool")]
pub struct PieceDropped {
    pub from: String,
    pub to: Option<String>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "bool")]
pub struct LoadPosition(pub String);

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct ResetGame;

#[derive(Message, Debug, Clone)]
#[rtype(result = "SessionSnapshot")]
pub struct GetSnapshot;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Vec<String>, ChessError>")]
pub struct GetLegalTargets(pub String);

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct EndSession;

/// Hosts one `GameSession` and runs its opponent replies on timers.
///
/// All session access goes through this actor's mailbox, so entry points
/// and timer callbacks never interleave.
pub struct SessionActor {
    session: GameSession,
    reply_timer: Option<SpawnHandle>,
    subscriber: Option<Recipient<SessionUpdate>>,
}

impl SessionActor {
    pub fn new(session: GameSession, subscriber: Option<Recipient<SessionUpdate>>) -> Self {
        Self {
            session,
            reply_timer: None,
            subscriber,
        }
    }

    fn notify(&self, update: SessionUpdate) {
        if let Some(subscriber) = &self.subscriber {
            subscriber.do_send(update);
        }
    }

    fn publish_state(&self) {
        self.notify(SessionUpdate::State(self.session.snapshot()));
    }

    fn arm_reply_timer(&mut self, ctx: &mut Context<Self>) {
        let ticket = match self.session.pending_reply() {
            Some(ticket) => ticket,
            None => return,
        };
        self.disarm_reply_timer(ctx);
        let handle = ctx.run_later(ticket.delay(), move |act, _ctx| act.reply_due(ticket));
        self.reply_timer = Some(handle);
    }

    fn disarm_reply_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.reply_timer.take() {
            debug!("Cancelling pending opponent reply");
            ctx.cancel_future(handle);
        }
    }

    fn reply_due(&mut self, ticket: ReplyTicket) {
        self.reply_timer = None;
        let played = self
            .session
            .play_opponent_reply(ticket)
            .map(|record| record.san().to_string());
        if let Some(san) = played {
            info!("Opponent played {}", san);
            self.publish_state();
        }
    }
}

impl Actor for SessionActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("Game session started at {}", self.session.state().position);
        self.publish_state();
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("Game session ended after {} plies", self.session.state().log.len());
    }
}

impl Handler<PieceDropped> for SessionActor {
    type Result = MessageResult<PieceDropped>;

    fn handle(&mut self, msg: PieceDropped, ctx: &mut Self::Context) -> Self::Result {
        let played = self
            .session
            .try_human_move(&msg.from, msg.to.as_deref())
            .map(|record| record.san().to_string());
        let accepted = match played {
            Ok(san) => {
                info!("Human played {}", san);
                self.arm_reply_timer(ctx);
                self.publish_state();
                true
            }
            Err(e) => {
                debug!("Rejected move {} -> {:?}: {}", msg.from, msg.to, e);
                self.notify(SessionUpdate::MoveRejected(e));
                false
            }
        };
        MessageResult(accepted)
    }
}

impl Handler<LoadPosition> for SessionActor {
    type Result = MessageResult<LoadPosition>;

    fn handle(&mut self, msg: LoadPosition, ctx: &mut Self::Context) -> Self::Result {
        let accepted = match self.session.try_load_position(&msg.0) {
            Ok(_) => {
                self.disarm_reply_timer(ctx);
                self.publish_state();
                true
            }
            Err(e) => {
                warn!("Invalid FEN string {:?}: {}", msg.0, e);
                self.notify(SessionUpdate::PositionRejected(e));
                false
            }
        };
        MessageResult(accepted)
    }
}

impl Handler<ResetGame> for SessionActor {
    type Result = ();

    fn handle(&mut self, _msg: ResetGame, ctx: &mut Self::Context) {
        self.disarm_reply_timer(ctx);
        self.session.reset();
        self.publish_state();
    }
}

impl Handler<GetSnapshot> for SessionActor {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.snapshot())
    }
}

impl Handler<GetLegalTargets> for SessionActor {
    type Result = MessageResult<GetLegalTargets>;

    fn handle(&mut self, msg: GetLegalTargets, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.legal_targets(&msg.0))
    }
}

impl Handler<EndSession> for SessionActor {
    type Result = ();

    fn handle(&mut self, _msg: EndSession, ctx: &mut Self::Context) {
        self.disarm_reply_timer(ctx);
        ctx.stop();
    }
}
