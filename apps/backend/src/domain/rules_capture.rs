//! Capture rules.

use crate::domain::actions::{Action, CaptureTarget, StackResolution};
use crate::domain::build_calc::candidate_build_values;
use crate::domain::rule_registry::{Rule, RuleCategory, RuleContext};
use crate::domain::rules::{priority, MAX_BUILD_VALUE};
use crate::domain::state::CardSource;

pub fn capture_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "same_value_auto_capture",
            category: RuleCategory::Capture,
            priority: priority::SAME_VALUE_AUTO_CAPTURE,
            exclusive: true,
            requires_modal: false,
            condition: |ctx| hand_matches_loose(ctx) && !build_alternative_exists(ctx),
            action: capture_loose,
        },
        Rule {
            id: "loose_card_strategic_options",
            category: RuleCategory::Capture,
            priority: priority::LOOSE_CARD_STRATEGIC_OPTIONS,
            exclusive: false,
            requires_modal: true,
            condition: |ctx| hand_matches_loose(ctx) && build_alternative_exists(ctx),
            action: capture_loose,
        },
        Rule {
            id: "single_card_capture",
            category: RuleCategory::Capture,
            priority: priority::SINGLE_CARD_CAPTURE,
            exclusive: false,
            requires_modal: false,
            condition: hand_matches_loose,
            action: capture_loose,
        },
        Rule {
            id: "captured_card_capture",
            category: RuleCategory::Capture,
            priority: priority::CAPTURED_CARD_CAPTURE,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                ctx.dragged.source == CardSource::Captured
                    && ctx
                        .target_loose()
                        .is_some_and(|c| c.value() == ctx.dragged_value())
            },
            action: capture_loose,
        },
        Rule {
            id: "build_capture",
            category: RuleCategory::Capture,
            priority: priority::BUILD_CAPTURE,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                ctx.dragged.source == CardSource::Hand
                    && ctx
                        .target_build()
                        .is_some_and(|b| b.value == ctx.dragged_value())
            },
            action: |ctx| {
                let build = ctx.target_build()?;
                Some(Action::Capture {
                    card: ctx.dragged.card,
                    source: CardSource::Hand,
                    target: CaptureTarget::Build {
                        build_id: build.build_id,
                    },
                    value: build.value,
                })
            },
        },
        Rule {
            id: "temp_stack_capture",
            category: RuleCategory::Capture,
            priority: priority::TEMP_STACK_CAPTURE,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                ctx.dragged.source == CardSource::Hand
                    && ctx.target_stack().is_some_and(|s| {
                        s.owner == ctx.player()
                            && s.calc.is_valid
                            && s.hand_card_count() == 0
                            && candidate_build_values(&s.placed_values())
                                .contains(&ctx.dragged_value())
                    })
            },
            action: |ctx| {
                let stack = ctx.target_stack()?;
                Some(Action::FinalizeStagingStack {
                    stack_id: stack.stack_id,
                    build_value: ctx.dragged_value(),
                    resolution: StackResolution::Capture {
                        card: ctx.dragged.card,
                    },
                })
            },
        },
    ]
}

fn hand_matches_loose(ctx: &RuleContext<'_>) -> bool {
    ctx.dragged.source == CardSource::Hand
        && ctx
            .target_loose()
            .is_some_and(|c| c.value() == ctx.dragged_value())
}

/// The player could also build on the loose card instead of taking it:
/// a same-value build, or a sum build, backed by a spare capturing card.
fn build_alternative_exists(ctx: &RuleContext<'_>) -> bool {
    let Some(loose) = ctx.target_loose() else {
        return false;
    };
    let v = ctx.dragged_value();
    let sum = v + loose.value();
    ctx.holds_spare(v) || (sum <= MAX_BUILD_VALUE && ctx.holds_spare(sum))
}

fn capture_loose(ctx: &RuleContext<'_>) -> Option<Action> {
    let card = ctx.target_loose()?;
    Some(Action::Capture {
        card: ctx.dragged.card,
        source: ctx.dragged.source,
        target: CaptureTarget::Loose { card },
        value: card.value(),
    })
}
