use serde::Serialize;
use tracing::info;

use super::GameFlowService;
use crate::domain::derive_dealing_seed;
use crate::domain::round::{advance_round, RoundProgress};
use crate::domain::scoring::{score_captures, winner, ScoreBreakdown};
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::state::app_state::AppState;
use crate::state::session_registry::{GameId, GameSession};

/// Score sheet for a game, final once `complete` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_id: GameId,
    pub complete: bool,
    pub scores: [ScoreBreakdown; 2],
    pub winner: Option<PlayerId>,
}

impl GameFlowService {
    /// Shuffle, deal the first round and register the game at version 0.
    ///
    /// Without an explicit seed the configured default is used, and failing
    /// that a random one.
    pub fn create_game(
        &self,
        app: &AppState,
        game_id: GameId,
        seed: Option<u64>,
    ) -> Result<GameSession, AppError> {
        let game_seed = seed
            .or(app.config.default_seed)
            .unwrap_or_else(rand::random::<u64>);
        let dealing_seed = derive_dealing_seed(game_seed, game_id);
        info!(game_id, hand_size = app.config.hand_size, "Creating game");

        let state = GameState::new_game(game_id, dealing_seed, app.config.hand_size)?;
        let session = app.sessions.insert(game_id, state)?;
        let snapshot = session.lock().clone();
        Ok(snapshot)
    }

    pub fn snapshot(&self, app: &AppState, game_id: GameId) -> Result<GameSession, AppError> {
        app.sessions.snapshot(game_id)
    }

    /// Current scores from the capture piles.
    pub fn summary(&self, app: &AppState, game_id: GameId) -> Result<GameSummary, AppError> {
        let session = app.sessions.snapshot(game_id)?;
        let scores = score_captures(&session.state.player_captures);
        Ok(GameSummary {
            game_id,
            complete: session.state.phase == Phase::Complete,
            winner: winner(&scores).map(|p| p as PlayerId),
            scores,
        })
    }

    /// Drop a game from the registry, returning its last state.
    pub fn close_game(&self, app: &AppState, game_id: GameId) -> Result<GameSession, AppError> {
        let closed = app.sessions.remove(game_id).ok_or_else(|| {
            AppError::from(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {game_id} not found"),
            ))
        })?;
        info!(game_id, version = closed.version, "Closed game");
        Ok(closed)
    }

    /// Deal the next round or end the game once both hands are empty.
    pub(super) fn progress_round(
        &self,
        game_id: GameId,
        state: &mut GameState,
    ) -> Result<RoundProgress, AppError> {
        let progress = advance_round(state)?;
        match progress {
            RoundProgress::Continue => {}
            RoundProgress::NextRound { round } => info!(game_id, round, "Dealt next round"),
            RoundProgress::GameOver { swept_to, swept } => {
                info!(game_id, ?swept_to, swept, "Game over")
            }
        }
        Ok(progress)
    }
}
