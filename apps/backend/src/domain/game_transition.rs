// apps/backend/src/domain/game_transition.rs

use serde::Serialize;

use crate::domain::state::{GameState, Phase, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub version: u64,
    pub turn: PlayerId,
    pub round: u8,
    pub phase: Phase,
}

impl GameLifecycleView {
    pub fn of(state: &GameState, version: u64) -> Self {
        Self {
            version,
            turn: state.current_player,
            round: state.round,
            phase: state.phase,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: a new round was dealt.
    RoundStarted { round: u8 },

    /// Edge-triggered: Game moved from InProgress -> Complete
    GameEnded,
}

/// Derive domain transitions from before/after lifecycle state.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Turn change (a finished game has no turn)
    if after.phase == Phase::InProgress && before.turn != after.turn {
        transitions.push(GameTransition::TurnBecame {
            player_id: after.turn,
        });
    }

    // 2. Round change
    if after.round > before.round {
        transitions.push(GameTransition::RoundStarted { round: after.round });
    }

    // 3. Game End (!Complete -> Complete)
    if before.phase != Phase::Complete && after.phase == Phase::Complete {
        transitions.push(GameTransition::GameEnded);
    }

    transitions
}
