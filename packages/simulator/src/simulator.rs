//! Random self-play through the game flow service.
//!
//! Each game gets its own session and is driven to completion by a seeded
//! random policy that only picks from what the engine offers. Every accepted
//! action is checked for card conservation.

use std::collections::BTreeMap;

use casino_backend::domain::build_calc::candidate_build_values;
use casino_backend::domain::rules::{DECK_SIZE, PLAYERS};
use casino_backend::domain::state::{opponent, GameState, Phase, PlayerId, TableItem};
use casino_backend::domain::{Action, DraggedItem, StackResolution, TargetInfo};
use casino_backend::{AppError, AppState, ErrorCode, GameFlowService, GameId, GameSummary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Staging and cancelling keep the turn, so a game needs an upper bound.
const MAX_ACTIONS_PER_GAME: usize = 5_000;

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub game_id: GameId,
    pub seed: u64,
    pub summary: GameSummary,
    pub rounds_played: u8,
    /// Accepted actions, including staging moves.
    pub actions: usize,
    /// Offered actions the engine refused on submission.
    pub rejected: u32,
    pub action_counts: BTreeMap<&'static str, u32>,
    /// Cards taken by each player's own captures (the final sweep excluded).
    pub captured: [usize; PLAYERS],
}

/// Errors that can occur during simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Engine error: {0}")]
    Engine(#[from] AppError),
    #[error("Player {player} has no playable action at version {version}")]
    Stalled { player: PlayerId, version: u64 },
    #[error("Card count is {found} after {action}")]
    CardsLost { action: &'static str, found: usize },
    #[error("Game {game_id} did not finish within {actions} actions")]
    TooLong { game_id: GameId, actions: usize },
}

pub struct Simulator<'a> {
    app: &'a AppState,
    service: GameFlowService,
    rng: StdRng,
}

impl<'a> Simulator<'a> {
    pub fn new(app: &'a AppState, policy_seed: u64) -> Self {
        Self {
            app,
            service: GameFlowService,
            rng: StdRng::seed_from_u64(policy_seed),
        }
    }

    /// Play one game from deal to final score. The session is closed
    /// whether or not the game completes.
    pub fn simulate_game(
        &mut self,
        game_id: GameId,
        seed: u64,
    ) -> Result<GameResult, SimulatorError> {
        let session = self.service.create_game(self.app, game_id, Some(seed))?;
        let result = self.play_out(game_id, seed, session.state, session.version);
        let closed = self.service.close_game(self.app, game_id);
        let result = result?;
        closed?;
        Ok(result)
    }

    fn play_out(
        &mut self,
        game_id: GameId,
        seed: u64,
        mut state: GameState,
        mut version: u64,
    ) -> Result<GameResult, SimulatorError> {
        let mut actions = 0usize;
        let mut rejected = 0u32;
        let mut action_counts: BTreeMap<&'static str, u32> = BTreeMap::new();
        let mut captured = [0usize; PLAYERS];

        while state.phase != Phase::Complete {
            if actions >= MAX_ACTIONS_PER_GAME {
                return Err(SimulatorError::TooLong { game_id, actions });
            }
            let player = state.current_player;
            let mut options = self.playable_actions(game_id, &state)?;

            loop {
                if options.is_empty() {
                    return Err(SimulatorError::Stalled { player, version });
                }
                let pick = self.rng.random_range(0..options.len());
                let action = options.swap_remove(pick);
                let kind = action.kind().as_str();

                match self
                    .service
                    .submit_action(self.app, game_id, player, action, Some(version))
                {
                    Ok(done) => {
                        let found = done.state.total_cards();
                        if found != DECK_SIZE {
                            return Err(SimulatorError::CardsLost { action: kind, found });
                        }
                        *action_counts.entry(kind).or_insert(0) += 1;
                        captured[player as usize] += done.outcome.captured;
                        actions += 1;
                        version = done.version;
                        state = done.state;
                        break;
                    }
                    Err(err)
                        if matches!(
                            err.code(),
                            ErrorCode::OptimisticLock | ErrorCode::ConcurrentAction
                        ) =>
                    {
                        return Err(err.into());
                    }
                    Err(err) => {
                        rejected += 1;
                        debug!(game_id, player, action = kind, code = %err.code(), "Option refused");
                    }
                }
            }
        }

        let summary = self.service.summary(self.app, game_id)?;
        Ok(GameResult {
            game_id,
            seed,
            summary,
            rounds_played: state.round,
            actions,
            rejected,
            action_counts,
            captured,
        })
    }

    /// Everything determination offers the current player, plus the stack
    /// resolutions that are only reachable through explicit finalize/cancel.
    fn playable_actions(
        &self,
        game_id: GameId,
        state: &GameState,
    ) -> Result<Vec<Action>, SimulatorError> {
        let player = state.current_player;
        let mut out: Vec<Action> = Vec::new();

        for dragged in dragged_items(state, player) {
            for target in targets(state) {
                let decision = self
                    .service
                    .determine_actions(self.app, game_id, &dragged, &target)?;
                for action in decision.actions {
                    if !out.contains(&action) {
                        out.push(action);
                    }
                }
            }
        }

        if let Some(stack) = state.stack_owned_by(player) {
            out.push(Action::CancelStagingStack {
                stack_id: stack.stack_id,
            });
            for build_value in candidate_build_values(&stack.placed_values()) {
                let finalize = Action::FinalizeStagingStack {
                    stack_id: stack.stack_id,
                    build_value,
                    resolution: StackResolution::Build,
                };
                if !out.contains(&finalize) {
                    out.push(finalize);
                }
            }
        }
        Ok(out)
    }
}

fn dragged_items(state: &GameState, player: PlayerId) -> Vec<DraggedItem> {
    let mut dragged: Vec<DraggedItem> = state
        .hand(player)
        .iter()
        .map(|c| DraggedItem::from_hand(*c, player))
        .collect();
    dragged.extend(state.loose_cards().map(|c| DraggedItem::from_table(c, player)));
    if let Some(top) = state.top_capture(opponent(player)) {
        dragged.push(DraggedItem::from_captures(top, player));
    }
    dragged
}

fn targets(state: &GameState) -> Vec<TargetInfo> {
    let mut targets = vec![TargetInfo::Table];
    for (index, item) in state.table_cards.iter().enumerate() {
        targets.push(match item {
            TableItem::Loose { card } => TargetInfo::Loose {
                card: *card,
                index: Some(index),
            },
            TableItem::Build(build) => TargetInfo::Build {
                build_id: build.build_id,
            },
            TableItem::Staging(stack) => TargetInfo::TemporaryStack {
                stack_id: stack.stack_id,
            },
        });
    }
    targets
}
