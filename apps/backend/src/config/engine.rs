use std::env;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::rules::{DECK_SIZE, DEFAULT_HAND_SIZE, PLAYERS};
use crate::error::AppError;
use crate::telemetry::LogFormat;

pub const DEFAULT_MAX_SESSIONS: usize = 1024;

/// Engine settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Cards dealt to each player per round.
    pub hand_size: u8,
    /// Upper bound on concurrently registered games.
    pub max_sessions: usize,
    pub log_format: LogFormat,
    /// Base seed for games created without one.
    pub default_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            max_sessions: DEFAULT_MAX_SESSIONS,
            log_format: LogFormat::Json,
            default_seed: None,
        }
    }
}

impl EngineConfig {
    /// Build the config from `CASINO_*` environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable source; unset variables take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            hand_size: parse_var(&lookup, "CASINO_HAND_SIZE")?.unwrap_or(defaults.hand_size),
            max_sessions: parse_var(&lookup, "CASINO_MAX_SESSIONS")?
                .unwrap_or(defaults.max_sessions),
            log_format: parse_var(&lookup, "CASINO_LOG_FORMAT")?.unwrap_or(defaults.log_format),
            default_seed: parse_var(&lookup, "CASINO_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Hand size must deal the deck out in whole rounds.
    pub fn validate(&self) -> Result<(), AppError> {
        let per_round = self.hand_size as usize * PLAYERS;
        if self.hand_size == 0 || DECK_SIZE % per_round != 0 {
            return Err(AppError::config(format!(
                "CASINO_HAND_SIZE={} does not deal {DECK_SIZE} cards to {PLAYERS} players in whole rounds",
                self.hand_size
            )));
        }
        if self.max_sessions == 0 {
            return Err(AppError::config("CASINO_MAX_SESSIONS must be at least 1"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            AppError::config(format!("Environment variable '{name}' is invalid: {e}"))
        }),
    }
}
