use crate::domain::actions::{Action, CaptureTarget, DraggedItem, TargetInfo};
use crate::domain::determination::determine_actions;
use crate::domain::state::CardSource;
use crate::domain::test_state_helpers::{card, StateBuilder};
use crate::errors::ErrorCode;

#[test]
fn duplicate_rank_blocks_auto_capture() {
    let state = StateBuilder::new()
        .hand(0, &["7H", "2S"])
        .loose(&["7C", "7D"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("7H"), 0),
        &TargetInfo::loose(card("7C")),
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::AmbiguousCapture));
    assert!(decision.actions.is_empty());
    assert!(!decision.requires_modal);
}

#[test]
fn lone_match_auto_captures() {
    let state = StateBuilder::new()
        .hand(0, &["7H", "2S"])
        .loose(&["7C", "3D"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("7H"), 0),
        &TargetInfo::loose(card("7C")),
        &state,
    );
    assert_eq!(
        decision.auto_action(),
        Some(Action::Capture {
            card: card("7H"),
            source: CardSource::Hand,
            target: CaptureTarget::Loose { card: card("7C") },
            value: 7,
        })
    );
}

#[test]
fn several_interpretations_require_a_choice() {
    let state = StateBuilder::new()
        .hand(0, &["5H", "5D", "9S"])
        .loose(&["5C"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("5H"), 0),
        &TargetInfo::loose(card("5C")),
        &state,
    );
    assert!(decision.error.is_none());
    assert!(decision.requires_modal);
    assert_eq!(decision.actions.len(), 3);
    assert_eq!(decision.auto_action(), None);
}

#[test]
fn round_one_trail_is_blocked_by_own_build() {
    let state = StateBuilder::new()
        .round(1)
        .hand(0, &["7H", "2S"])
        .build(3, 0, &["3C", "4D"], 7)
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::Table,
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::NoValidAction));
    assert!(decision.actions.is_empty());
}

#[test]
fn later_round_trail_needs_confirmation() {
    let state = StateBuilder::new()
        .round(2)
        .hand(0, &["7H", "2S"])
        .build(3, 0, &["3C", "4D"], 7)
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::Table,
        &state,
    );
    assert!(decision.requires_modal);
    assert_eq!(decision.actions, vec![Action::Trail { card: card("2S") }]);
}

#[test]
fn trail_blocked_while_same_rank_is_loose() {
    let state = StateBuilder::new()
        .round(2)
        .hand(0, &["2S"])
        .loose(&["2C"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::Table,
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::NoValidAction));
}

#[test]
fn second_stack_is_rejected() {
    let state = StateBuilder::new()
        .hand(0, &["2S", "9C"])
        .stack(4, 0, &["3C", "4D"])
        .loose(&["5H", "8D"])
        .finish();
    let from_hand = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::loose(card("5H")),
        &state,
    );
    assert_eq!(from_hand.error_code(), Some(ErrorCode::StackLimitExceeded));

    let from_table = determine_actions(
        &DraggedItem::from_table(card("5H"), 0),
        &TargetInfo::loose(card("8D")),
        &state,
    );
    assert_eq!(from_table.error_code(), Some(ErrorCode::StackLimitExceeded));
}

#[test]
fn open_stack_blocks_ending_the_turn_elsewhere() {
    let state = StateBuilder::new()
        .round(2)
        .hand(0, &["2S", "9C"])
        .stack(4, 0, &["3C", "4D"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::Table,
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::NoValidAction));
}

#[test]
fn opponent_stack_is_off_limits() {
    let state = StateBuilder::new()
        .hand(0, &["2S"])
        .stack(4, 1, &["3C", "4D"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::TemporaryStack { stack_id: 4 },
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::OwnershipViolation));
}

#[test]
fn overflowed_stack_reports_overflow() {
    let state = StateBuilder::new()
        .hand(0, &["AS"])
        .stack(4, 0, &["3C", "4D", "5H", "2S", "9C"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("AS"), 0),
        &TargetInfo::TemporaryStack { stack_id: 4 },
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::InvalidBuildOverflow));
}

#[test]
fn wrong_player_is_out_of_turn() {
    let state = StateBuilder::new()
        .turn(0)
        .hand(1, &["2S"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 1),
        &TargetInfo::Table,
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::OutOfTurn));
}

#[test]
fn unknown_ids_are_malformed() {
    let state = StateBuilder::new().hand(0, &["2S"]).finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("2S"), 0),
        &TargetInfo::Build { build_id: 999 },
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::MalformedTarget));

    // Card not actually in hand.
    let decision = determine_actions(
        &DraggedItem::from_hand(card("9H"), 0),
        &TargetInfo::Table,
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::MalformedTarget));
}

#[test]
fn opponent_build_of_same_value_auto_captures() {
    let state = StateBuilder::new()
        .hand(0, &["7H"])
        .build(3, 1, &["3C", "4D"], 7)
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_hand(card("7H"), 0),
        &TargetInfo::Build { build_id: 3 },
        &state,
    );
    assert_eq!(
        decision.auto_action(),
        Some(Action::Capture {
            card: card("7H"),
            source: CardSource::Hand,
            target: CaptureTarget::Build { build_id: 3 },
            value: 7,
        })
    );
}

#[test]
fn table_to_table_staging_is_unconditional() {
    let state = StateBuilder::new()
        .hand(0, &["2S"])
        .loose(&["3C", "9D"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_table(card("9D"), 0),
        &TargetInfo::loose(card("3C")),
        &state,
    );
    assert_eq!(
        decision.auto_action(),
        Some(Action::CreateStagingStack {
            card: card("9D"),
            source: CardSource::Table,
            target_card: card("3C"),
        })
    );
}

#[test]
fn table_card_cannot_be_dropped_on_empty_table() {
    let state = StateBuilder::new().loose(&["3C"]).hand(0, &["2S"]).finish();
    let decision = determine_actions(
        &DraggedItem::from_table(card("3C"), 0),
        &TargetInfo::Table,
        &state,
    );
    assert_eq!(decision.error_code(), Some(ErrorCode::NoValidAction));
}

#[test]
fn opponent_capture_pile_top_can_be_staged() {
    let state = StateBuilder::new()
        .hand(0, &["8H"])
        .captures(1, &["9S", "5D"])
        .loose(&["3C"])
        .finish();
    let decision = determine_actions(
        &DraggedItem::from_captures(card("5D"), 0),
        &TargetInfo::loose(card("3C")),
        &state,
    );
    assert_eq!(
        decision.auto_action(),
        Some(Action::CreateStagingStack {
            card: card("5D"),
            source: CardSource::Captured,
            target_card: card("3C"),
        })
    );

    // Only the top card is reachable.
    let buried = determine_actions(
        &DraggedItem::from_captures(card("9S"), 0),
        &TargetInfo::loose(card("3C")),
        &state,
    );
    assert_eq!(buried.error_code(), Some(ErrorCode::MalformedTarget));
}
