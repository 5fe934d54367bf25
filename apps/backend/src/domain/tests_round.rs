use crate::domain::rules::DECK_SIZE;
use crate::domain::round::{advance_round, RoundProgress};
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::StateBuilder;

#[test]
fn round_continues_while_cards_remain_in_hand() {
    let mut state = StateBuilder::new().hand(1, &["2S"]).finish();
    assert_eq!(advance_round(&mut state).unwrap(), RoundProgress::Continue);
    assert_eq!(state.round, 1);
}

#[test]
fn empty_hands_deal_the_next_round() {
    let mut state = StateBuilder::new()
        .loose(&["3C", "9D"])
        .captures(0, &["7H", "7S"])
        .finish();
    let stock_before = state.deck.len();

    assert_eq!(
        advance_round(&mut state).unwrap(),
        RoundProgress::NextRound { round: 2 }
    );
    assert_eq!(state.hand(0).len(), 10);
    assert_eq!(state.hand(1).len(), 10);
    assert_eq!(state.deck.len(), stock_before - 20);
    // Table and piles carry over untouched.
    assert_eq!(state.table_cards.len(), 2);
    assert_eq!(state.player_captures[0].len(), 2);
    assert_eq!(state.total_cards(), DECK_SIZE);
}

#[test]
fn new_game_plays_out_two_rounds_of_ten() {
    let mut state = GameState::new_game(9, 42, 10).unwrap();
    assert_eq!(state.deck.len(), 20);
    state.player_hands = [Vec::new(), Vec::new()];
    assert_eq!(
        advance_round(&mut state).unwrap(),
        RoundProgress::NextRound { round: 2 }
    );
    assert!(state.deck.is_empty());
}

#[test]
fn exhausted_stock_sweeps_table_to_last_capturer() {
    let mut state = StateBuilder::new()
        .loose(&["3C", "9D"])
        .build(5, 0, &["2H", "4S"], 6)
        .last_capturer(1)
        .empty_stock()
        .finish();
    assert_eq!(
        advance_round(&mut state).unwrap(),
        RoundProgress::GameOver {
            swept_to: Some(1),
            swept: 4
        }
    );
    assert_eq!(state.phase, Phase::Complete);
    assert!(state.table_cards.is_empty());
    assert_eq!(state.player_captures[1].len(), 4);
}

#[test]
fn table_stays_when_nobody_captured() {
    let mut state = StateBuilder::new().loose(&["3C"]).empty_stock().finish();
    assert_eq!(
        advance_round(&mut state).unwrap(),
        RoundProgress::GameOver {
            swept_to: None,
            swept: 0
        }
    );
    assert_eq!(state.phase, Phase::Complete);
    assert_eq!(state.table_cards.len(), 1);
}

#[test]
fn completed_game_does_not_advance() {
    let mut state = StateBuilder::new().empty_stock().finish();
    state.phase = Phase::Complete;
    assert_eq!(advance_round(&mut state).unwrap(), RoundProgress::Continue);
}
