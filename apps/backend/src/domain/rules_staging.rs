//! Staging rules for hand and capture-pile cards. Table-to-table staging is
//! handled directly by the determination pipeline.

use crate::domain::actions::Action;
use crate::domain::rule_registry::{Rule, RuleCategory, RuleContext};
use crate::domain::rules::priority;
use crate::domain::state::CardSource;

pub fn staging_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "temp_stack_addition",
            category: RuleCategory::Staging,
            priority: priority::TEMP_STACK_ADDITION,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                stageable_source(ctx)
                    && ctx.target_stack().is_some_and(|s| {
                        s.owner == ctx.player()
                            && s.calc.is_valid
                            // At most one hand card per stack.
                            && (ctx.dragged.source != CardSource::Hand
                                || s.hand_card_count() == 0)
                    })
            },
            action: |ctx| {
                Some(Action::AddToStagingStack {
                    card: ctx.dragged.card,
                    source: ctx.dragged.source,
                    stack_id: ctx.target_stack()?.stack_id,
                })
            },
        },
        Rule {
            id: "universal_staging_creation",
            category: RuleCategory::Staging,
            priority: priority::UNIVERSAL_STAGING_CREATION,
            exclusive: false,
            requires_modal: false,
            condition: |ctx| {
                stageable_source(ctx)
                    && ctx.target_loose().is_some()
                    && ctx.state.stack_owned_by(ctx.player()).is_none()
            },
            action: |ctx| {
                Some(Action::CreateStagingStack {
                    card: ctx.dragged.card,
                    source: ctx.dragged.source,
                    target_card: ctx.target_loose()?,
                })
            },
        },
    ]
}

fn stageable_source(ctx: &RuleContext<'_>) -> bool {
    matches!(ctx.dragged.source, CardSource::Hand | CardSource::Captured)
}
