use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::session::{OpponentScheduler, DEFAULT_REPLY_DELAY};

pub const BIND_ADDR_VAR: &str = "CHESS_BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "CHESS_STATIC_DIR";
pub const REPLY_DELAY_VAR: &str = "CHESS_REPLY_DELAY_MS";
pub const REPLY_SEED_VAR: &str = "CHESS_REPLY_SEED";
pub const LOG_VAR: &str = "CHESS_LOG";

/// Server settings, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub reply_delay: Duration,
    /// Fixed seed for the opponent; every session replays the same choices.
    pub reply_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            static_dir: PathBuf::from("./static"),
            reply_delay: DEFAULT_REPLY_DELAY,
            reply_seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = addr;
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(ms) = lookup(REPLY_DELAY_VAR) {
            config.reply_delay = Duration::from_millis(parse_u64(REPLY_DELAY_VAR, &ms)?);
        }
        if let Some(seed) = lookup(REPLY_SEED_VAR) {
            config.reply_seed = Some(parse_u64(REPLY_SEED_VAR, &seed)?);
        }

        Ok(config)
    }

    /// Opponent scheduler for a new session.
    pub fn opponent(&self) -> OpponentScheduler {
        match self.reply_seed {
            Some(seed) => OpponentScheduler::seeded(self.reply_delay, seed),
            None => OpponentScheduler::from_entropy(self.reply_delay),
        }
    }
}

fn parse_u64(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: value.to_string(),
    })
}
