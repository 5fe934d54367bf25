use crate::domain::actions::Action;
use crate::domain::rule_registry::{ResolvedTarget, Rule, RuleCategory};
use crate::domain::rules::priority;
use crate::domain::state::{CardSource, GameState, PlayerId};
use crate::domain::Card;

pub fn trail_rules() -> Vec<Rule> {
    vec![Rule {
        id: "trail",
        category: RuleCategory::Trail,
        priority: priority::TRAIL,
        exclusive: false,
        requires_modal: true,
        condition: |ctx| {
            ctx.dragged.source == CardSource::Hand
                && matches!(ctx.target, ResolvedTarget::Table)
                && trail_allowed(ctx.state, ctx.player(), ctx.dragged.card)
        },
        action: |ctx| {
            Some(Action::Trail {
                card: ctx.dragged.card,
            })
        },
    }]
}

/// Trailing fails closed: not while a loose card of the same rank could be
/// taken, and not in round 1 while the player owns a build.
pub fn trail_allowed(state: &GameState, player: PlayerId, card: Card) -> bool {
    if state.loose_count_of_rank(card.rank) > 0 {
        return false;
    }
    if state.round == 1 && state.builds_owned_by(player).next().is_some() {
        return false;
    }
    true
}
