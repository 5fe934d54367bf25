//! Property tests for whole-game play (pure, deterministic).
//!
//! Properties tested:
//! - Card conservation: every card of the deck stays in exactly one place
//! - Every action offered by determination applies cleanly
//! - Games driven by offered actions never leave the deck size

use proptest::prelude::*;

use crate::domain::actions::Action;
use crate::domain::determination::determine_actions;
use crate::domain::play::apply_action;
use crate::domain::round::{advance_round, RoundProgress};
use crate::domain::rules::{DECK_SIZE, DEFAULT_HAND_SIZE};
use crate::domain::state::{GameState, Phase};
use crate::domain::{test_gens, test_prelude};

const MAX_STEPS: usize = 100;

fn offered_actions(state: &GameState) -> Vec<Action> {
    let mut out: Vec<Action> = Vec::new();
    for (dragged, target) in test_gens::candidate_interactions(state) {
        let decision = determine_actions(&dragged, &target, state);
        for action in decision.actions {
            if !out.contains(&action) {
                out.push(action);
            }
        }
    }
    out
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_random_play_conserves_cards(
        seed in test_gens::game_seed(),
        choices in prop::collection::vec(any::<u32>(), MAX_STEPS),
    ) {
        let mut state = GameState::new_game(1, seed, DEFAULT_HAND_SIZE).unwrap();
        prop_assert_eq!(state.total_cards(), DECK_SIZE);

        for choice in choices {
            let player = state.current_player;
            let offered = offered_actions(&state);
            for action in &offered {
                let mut probe = state.clone();
                let applied = apply_action(&mut probe, player, action);
                prop_assert!(applied.is_ok(), "offered {:?} failed: {:?}", action, applied);
                prop_assert_eq!(probe.total_cards(), DECK_SIZE);
            }

            let mut options = offered;
            if let Some(stack) = state.stack_owned_by(player) {
                options.push(Action::CancelStagingStack { stack_id: stack.stack_id });
            }
            if options.is_empty() {
                break;
            }
            let action = options[choice as usize % options.len()];
            prop_assert!(apply_action(&mut state, player, &action).is_ok());
            prop_assert_eq!(state.total_cards(), DECK_SIZE);

            let progress = advance_round(&mut state).unwrap();
            prop_assert_eq!(state.total_cards(), DECK_SIZE);
            if let RoundProgress::GameOver { .. } = progress {
                prop_assert_eq!(state.phase, Phase::Complete);
                break;
            }
        }
    }
}
