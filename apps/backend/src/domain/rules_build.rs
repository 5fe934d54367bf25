//! Build rules: creating, extending and augmenting committed builds.
//!
//! Every build action requires the player to keep a hand card that can later
//! capture the build.

use crate::domain::actions::Action;
use crate::domain::rule_registry::{Rule, RuleCategory, RuleContext};
use crate::domain::rules::{priority, MAX_BUILD_VALUE};
use crate::domain::state::{Build, CardSource};

pub fn build_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "own_build_augmentation",
            category: RuleCategory::Build,
            priority: priority::OWN_BUILD_AUGMENTATION,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                hand_onto_build(ctx).is_some_and(|b| {
                    b.owner == ctx.player()
                        && b.value == ctx.dragged_value()
                        && ctx.holds_spare(b.value)
                })
            },
            action: |ctx| {
                let build = ctx.target_build()?;
                Some(Action::BuildAugment {
                    card: ctx.dragged.card,
                    build_id: build.build_id,
                    value: build.value,
                })
            },
        },
        Rule {
            id: "create_own_build",
            category: RuleCategory::Build,
            priority: priority::CREATE_OWN_BUILD,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| sum_build_value(ctx).is_some_and(|v| ctx.holds_spare(v)),
            action: |ctx| {
                Some(Action::BuildCreate {
                    card: ctx.dragged.card,
                    target_card: ctx.target_loose()?,
                    value: sum_build_value(ctx)?,
                })
            },
        },
        Rule {
            id: "create_same_value_build",
            category: RuleCategory::Build,
            priority: priority::CREATE_OWN_BUILD,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                ctx.dragged.source == CardSource::Hand
                    && ctx
                        .target_loose()
                        .is_some_and(|c| c.value() == ctx.dragged_value())
                    && ctx.holds_spare(ctx.dragged_value())
            },
            action: |ctx| {
                Some(Action::BuildCreate {
                    card: ctx.dragged.card,
                    target_card: ctx.target_loose()?,
                    value: ctx.dragged_value(),
                })
            },
        },
        Rule {
            id: "extend_own_build",
            category: RuleCategory::Build,
            priority: priority::EXTEND_OWN_BUILD,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| extension_value(ctx, true).is_some_and(|v| ctx.holds_spare(v)),
            action: |ctx| extend_action(ctx, true),
        },
        Rule {
            id: "extend_opponent_build",
            category: RuleCategory::Build,
            priority: priority::EXTEND_OPPONENT_BUILD,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| extension_value(ctx, false).is_some_and(|v| ctx.holds_spare(v)),
            action: |ctx| extend_action(ctx, false),
        },
    ]
}

fn hand_onto_build<'a>(ctx: &RuleContext<'a>) -> Option<&'a Build> {
    if ctx.dragged.source != CardSource::Hand {
        return None;
    }
    ctx.target_build()
}

/// Value of a sum build made from the dragged hand card and a loose card.
fn sum_build_value(ctx: &RuleContext<'_>) -> Option<u8> {
    if ctx.dragged.source != CardSource::Hand {
        return None;
    }
    let loose = ctx.target_loose()?;
    let sum = ctx.dragged_value() + loose.value();
    (sum <= MAX_BUILD_VALUE).then_some(sum)
}

/// New value if the dragged card extends the targeted build.
fn extension_value(ctx: &RuleContext<'_>, own: bool) -> Option<u8> {
    let build = hand_onto_build(ctx)?;
    if (build.owner == ctx.player()) != own || !build.is_extendable {
        return None;
    }
    let new_value = build.value + ctx.dragged_value();
    (new_value <= MAX_BUILD_VALUE).then_some(new_value)
}

fn extend_action(ctx: &RuleContext<'_>, own: bool) -> Option<Action> {
    Some(Action::BuildExtend {
        card: ctx.dragged.card,
        build_id: ctx.target_build()?.build_id,
        new_value: extension_value(ctx, own)?,
    })
}
