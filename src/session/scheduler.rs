use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Handle for one scheduled opponent reply.
///
/// Only the most recently issued ticket can be claimed; cancelling or
/// issuing a new one makes older tickets inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
    generation: u64,
    delay: Duration,
}

impl ReplyTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Decides when the random opponent answers and which move it picks.
#[derive(Debug, Clone)]
pub struct OpponentScheduler {
    delay: Duration,
    rng: StdRng,
    generation: u64,
    pending: Option<ReplyTicket>,
}

impl OpponentScheduler {
    pub fn new(delay: Duration, rng: StdRng) -> Self {
        Self {
            delay,
            rng,
            generation: 0,
            pending: None,
        }
    }

    /// Reproducible move choices for a given seed.
    pub fn seeded(delay: Duration, seed: u64) -> Self {
        Self::new(delay, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(delay: Duration) -> Self {
        Self::new(delay, StdRng::from_entropy())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pending(&self) -> Option<ReplyTicket> {
        self.pending
    }

    pub(crate) fn schedule(&mut self) -> ReplyTicket {
        self.generation += 1;
        let ticket = ReplyTicket {
            generation: self.generation,
            delay: self.delay,
        };
        self.pending = Some(ticket);
        ticket
    }

    pub(crate) fn cancel(&mut self) -> Option<ReplyTicket> {
        self.pending.take()
    }

    /// Consume the pending ticket if `ticket` is it.
    pub(crate) fn claim(&mut self, ticket: ReplyTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn choose<T: Copy>(&mut self, candidates: &[T]) -> Option<T> {
        candidates.choose(&mut self.rng).copied()
    }
}

impl Default for OpponentScheduler {
    fn default() -> Self {
        Self::from_entropy(DEFAULT_REPLY_DELAY)
    }
}
