use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::play::ApplyOutcome;
use crate::domain::state::GameState;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::services::game_flow::GameFlowService;
use crate::state::app_state::AppState;
use crate::state::session_registry::{lock_for_mutation, GameId};

#[derive(Debug, Clone)]
pub struct GameFlowMutationResult {
    /// State after the mutation was committed.
    pub state: GameState,
    pub old_version: u64,
    pub version: u64,
    pub outcome: ApplyOutcome,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowService {
    /// Run `mutation` against a copy of the game's state and commit it.
    ///
    /// Rejected with `ConcurrentAction` if another mutation holds the session
    /// and with `OptimisticLock` if `expected_version` is stale. Nothing is
    /// committed when the mutation fails.
    pub(super) fn run_mutation<F>(
        &self,
        app: &AppState,
        game_id: GameId,
        expected_version: Option<u64>,
        mutation: F,
    ) -> Result<GameFlowMutationResult, AppError>
    where
        F: FnOnce(&mut GameState) -> Result<ApplyOutcome, AppError>,
    {
        let session = app.sessions.get(game_id)?;
        let mut guard = lock_for_mutation(&session, game_id)?;
        let old_version = guard.version;

        if let Some(expected) = expected_version {
            if expected != old_version {
                return Err(DomainError::conflict(
                    ConflictKind::OptimisticLock,
                    format!(
                        "Game {game_id} was modified concurrently (expected version {expected}, actual version {old_version}). Please refresh and retry."
                    ),
                )
                .into());
            }
        }

        let before = GameLifecycleView::of(&guard.state, old_version);
        let mut next = guard.state.clone();
        let outcome = mutation(&mut next)?;

        let version = old_version + 1;
        let after = GameLifecycleView::of(&next, version);
        let transitions = derive_game_transitions(&before, &after);

        guard.state = next;
        guard.version = version;

        Ok(GameFlowMutationResult {
            state: guard.state.clone(),
            old_version,
            version,
            outcome,
            transitions,
        })
    }
}
