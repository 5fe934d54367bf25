use crate::domain::actions::{Action, CaptureTarget, DraggedItem, StackResolution, TargetInfo};
use crate::domain::determination::resolve_target;
use crate::domain::rule_registry::{Evaluation, Rule, RuleCategory, RuleContext, RuleRegistry};
use crate::domain::rules::priority;
use crate::domain::state::{CardSource, GameState};
use crate::domain::test_state_helpers::{card, StateBuilder};

fn evaluate(state: &GameState, dragged: DraggedItem, target: TargetInfo) -> Evaluation {
    let resolved = resolve_target(state, &target).expect("target exists");
    let ctx = RuleContext {
        dragged: &dragged,
        target: resolved,
        state,
    };
    RuleRegistry::standard().evaluate(&ctx)
}

fn rule_ids(evaluation: &Evaluation) -> Vec<&'static str> {
    evaluation.matches.iter().map(|m| m.rule_id).collect()
}

#[test]
fn auto_capture_suppresses_every_other_rule() {
    let state = StateBuilder::new()
        .hand(0, &["7H", "2S"])
        .loose(&["7C", "3D"])
        .finish();
    let eval = evaluate(
        &state,
        DraggedItem::from_hand(card("7H"), 0),
        TargetInfo::loose(card("7C")),
    );
    assert!(eval.exclusive);
    assert_eq!(rule_ids(&eval), vec!["same_value_auto_capture"]);
    assert_eq!(
        eval.actions(),
        vec![Action::Capture {
            card: card("7H"),
            source: CardSource::Hand,
            target: CaptureTarget::Loose { card: card("7C") },
            value: 7,
        }]
    );
}

#[test]
fn spare_matching_card_turns_capture_into_a_choice() {
    let state = StateBuilder::new()
        .hand(0, &["5H", "5D", "9S"])
        .loose(&["5C"])
        .finish();
    let eval = evaluate(
        &state,
        DraggedItem::from_hand(card("5H"), 0),
        TargetInfo::loose(card("5C")),
    );
    assert!(!eval.exclusive);
    // Strategic options and single capture describe the same capture.
    assert_eq!(
        rule_ids(&eval),
        vec![
            "loose_card_strategic_options",
            "universal_staging_creation",
            "create_same_value_build"
        ]
    );
    assert!(eval.matches[0].requires_modal);
    assert!(eval.requires_modal());
    assert!(eval.actions().contains(&Action::BuildCreate {
        card: card("5H"),
        target_card: card("5C"),
        value: 5,
    }));
}

#[test]
fn sum_build_needs_a_capturing_card() {
    let with_ten = StateBuilder::new()
        .hand(0, &["6H", "TD"])
        .loose(&["4C"])
        .finish();
    let eval = evaluate(
        &with_ten,
        DraggedItem::from_hand(card("6H"), 0),
        TargetInfo::loose(card("4C")),
    );
    assert!(rule_ids(&eval).contains(&"create_own_build"));

    let without = StateBuilder::new()
        .hand(0, &["6H", "9D"])
        .loose(&["4C"])
        .finish();
    let eval = evaluate(
        &without,
        DraggedItem::from_hand(card("6H"), 0),
        TargetInfo::loose(card("4C")),
    );
    assert_eq!(rule_ids(&eval), vec!["universal_staging_creation"]);
}

#[test]
fn opponent_build_can_be_extended_or_captured() {
    let state = StateBuilder::new()
        .hand(0, &["2H", "9S"])
        .build(7, 1, &["3C", "4D"], 7)
        .finish();
    let eval = evaluate(
        &state,
        DraggedItem::from_hand(card("2H"), 0),
        TargetInfo::Build { build_id: 7 },
    );
    assert_eq!(rule_ids(&eval), vec!["extend_opponent_build"]);
    assert_eq!(
        eval.actions(),
        vec![Action::BuildExtend {
            card: card("2H"),
            build_id: 7,
            new_value: 9,
        }]
    );
}

#[test]
fn own_build_offers_capture_and_augmentation() {
    let state = StateBuilder::new()
        .round(2)
        .hand(0, &["7H", "7S"])
        .build(7, 0, &["3C", "4D"], 7)
        .finish();
    let eval = evaluate(
        &state,
        DraggedItem::from_hand(card("7H"), 0),
        TargetInfo::Build { build_id: 7 },
    );
    assert_eq!(rule_ids(&eval), vec!["build_capture", "own_build_augmentation"]);
}

#[test]
fn compound_builds_are_not_extendable() {
    let state = StateBuilder::new()
        .hand(0, &["2H", "9S"])
        .build(7, 1, &["3C", "4D", "7S"], 7)
        .finish();
    let eval = evaluate(
        &state,
        DraggedItem::from_hand(card("2H"), 0),
        TargetInfo::Build { build_id: 7 },
    );
    assert!(eval.is_empty());
}

#[test]
fn own_stack_accepts_card_or_capture() {
    let state = StateBuilder::new()
        .hand(0, &["7H", "2S"])
        .stack(5, 0, &["3C", "4D"])
        .finish();
    let eval = evaluate(
        &state,
        DraggedItem::from_hand(card("7H"), 0),
        TargetInfo::TemporaryStack { stack_id: 5 },
    );
    assert_eq!(
        rule_ids(&eval),
        vec!["temp_stack_addition", "temp_stack_capture"]
    );
    assert!(eval.actions().contains(&Action::FinalizeStagingStack {
        stack_id: 5,
        build_value: 7,
        resolution: StackResolution::Capture { card: card("7H") },
    }));
}

#[test]
fn trail_is_a_modal_fallback() {
    let state = StateBuilder::new()
        .round(2)
        .hand(0, &["2S"])
        .loose(&["9C"])
        .finish();
    let eval = evaluate(&state, DraggedItem::from_hand(card("2S"), 0), TargetInfo::Table);
    assert_eq!(rule_ids(&eval), vec!["trail"]);
    assert!(eval.requires_modal());
}

#[test]
fn lower_ranked_exclusive_rule_does_not_win() {
    let rules = vec![
        Rule {
            id: "high",
            category: RuleCategory::Trail,
            priority: 50,
            exclusive: false,
            requires_modal: false,
            condition: |_| true,
            action: |ctx| Some(Action::Trail { card: ctx.dragged.card }),
        },
        Rule {
            id: "low_exclusive",
            category: RuleCategory::Trail,
            priority: priority::TRAIL,
            exclusive: true,
            requires_modal: false,
            condition: |_| true,
            action: |ctx| Some(Action::Trail { card: ctx.dragged.card }),
        },
    ];
    let registry = RuleRegistry::new(rules);
    let state = StateBuilder::new().hand(0, &["2S"]).finish();
    let dragged = DraggedItem::from_hand(card("2S"), 0);
    let ctx = RuleContext {
        dragged: &dragged,
        target: resolve_target(&state, &TargetInfo::Table).unwrap(),
        state: &state,
    };
    let eval = registry.evaluate(&ctx);
    assert!(!eval.exclusive);
    assert_eq!(rule_ids(&eval), vec!["high"]);
}
