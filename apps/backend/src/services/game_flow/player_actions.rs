use tracing::{debug, warn};

use super::{GameFlowMutationResult, GameFlowService};
use crate::domain::actions::{Action, DraggedItem, StackResolution, TargetInfo};
use crate::domain::determination::{determine_actions_with, ActionDecision};
use crate::domain::play::apply_action;
use crate::domain::state::{CardSource, GameState, PlayerId, StackId};
use crate::domain::Card;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::session_registry::GameId;

impl GameFlowService {
    /// Work out what a drag means without changing anything.
    ///
    /// Rule-level rejections come back inside the decision; only a missing
    /// game is an `Err`.
    pub fn determine_actions(
        &self,
        app: &AppState,
        game_id: GameId,
        dragged: &DraggedItem,
        target: &TargetInfo,
    ) -> Result<ActionDecision, AppError> {
        let session = app.sessions.get(game_id)?;
        let guard = session.lock();
        let decision = determine_actions_with(&app.rules, dragged, target, &guard.state);
        debug!(
            game_id,
            player = dragged.player,
            card = %dragged.card,
            actions = decision.actions.len(),
            requires_modal = decision.requires_modal,
            error = ?decision.error_code(),
            "Determined actions"
        );
        Ok(decision)
    }

    /// Apply one action for `player`, then deal or close the game if the
    /// hands ran out.
    ///
    /// # Parameters
    /// - `expected_version`: when given, must equal the session's current
    ///   version or the action is rejected with `OptimisticLock`.
    pub fn submit_action(
        &self,
        app: &AppState,
        game_id: GameId,
        player: PlayerId,
        action: Action,
        expected_version: Option<u64>,
    ) -> Result<GameFlowMutationResult, AppError> {
        debug!(game_id, player, action = action.kind().as_str(), "Submitting action");

        let result = self.run_mutation(app, game_id, expected_version, |state| {
            let outcome = apply_action(state, player, &action)?;
            if outcome.turn_advanced {
                self.progress_round(game_id, state)?;
            }
            Ok(outcome)
        });

        match &result {
            Ok(done) => debug!(
                game_id,
                player,
                version = done.version,
                captured = done.outcome.captured,
                turn_advanced = done.outcome.turn_advanced,
                "Action applied"
            ),
            Err(err) => warn!(
                game_id,
                player,
                action = action.kind().as_str(),
                code = %err.code(),
                detail = %err.detail(),
                "Action rejected"
            ),
        }
        result
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_staging_stack(
        &self,
        app: &AppState,
        game_id: GameId,
        player: PlayerId,
        card: Card,
        source: CardSource,
        target_card: Card,
        expected_version: Option<u64>,
    ) -> Result<GameState, AppError> {
        let action = Action::CreateStagingStack {
            card,
            source,
            target_card,
        };
        self.submit_action(app, game_id, player, action, expected_version)
            .map(|done| done.state)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn add_to_staging_stack(
        &self,
        app: &AppState,
        game_id: GameId,
        player: PlayerId,
        stack_id: StackId,
        card: Card,
        source: CardSource,
        expected_version: Option<u64>,
    ) -> Result<GameState, AppError> {
        let action = Action::AddToStagingStack {
            card,
            source,
            stack_id,
        };
        self.submit_action(app, game_id, player, action, expected_version)
            .map(|done| done.state)
    }

    /// Commit the player's stack as a build of `build_value`.
    ///
    /// Capturing a stack goes through `submit_action` with
    /// `StackResolution::Capture`.
    pub fn finalize_staging_stack(
        &self,
        app: &AppState,
        game_id: GameId,
        player: PlayerId,
        stack_id: StackId,
        build_value: u8,
        expected_version: Option<u64>,
    ) -> Result<GameState, AppError> {
        let action = Action::FinalizeStagingStack {
            stack_id,
            build_value,
            resolution: StackResolution::Build,
        };
        self.submit_action(app, game_id, player, action, expected_version)
            .map(|done| done.state)
    }

    pub fn cancel_staging_stack(
        &self,
        app: &AppState,
        game_id: GameId,
        player: PlayerId,
        stack_id: StackId,
        expected_version: Option<u64>,
    ) -> Result<GameState, AppError> {
        let action = Action::CancelStagingStack { stack_id };
        self.submit_action(app, game_id, player, action, expected_version)
            .map(|done| done.state)
    }
}
