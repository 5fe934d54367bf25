//! Ordered table of rule records and the evaluator that runs it.
//!
//! A rule is plain data: a predicate, a priority and an action builder. Rules
//! never mutate state; they describe an `Action` for `play::apply_action`.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::domain::actions::{Action, DraggedItem};
use crate::domain::rules_build::build_rules;
use crate::domain::rules_capture::capture_rules;
use crate::domain::rules_staging::staging_rules;
use crate::domain::rules_trail::trail_rules;
use crate::domain::state::{opponent, Build, CardSource, GameState, PlayerId, StagingStack};
use crate::domain::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Capture,
    Build,
    Staging,
    Trail,
}

/// Drop target after it has been looked up in the current state.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedTarget<'a> {
    Loose { card: Card, index: usize },
    Build(&'a Build),
    Stack(&'a StagingStack),
    Table,
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub dragged: &'a DraggedItem,
    pub target: ResolvedTarget<'a>,
    pub state: &'a GameState,
}

impl<'a> RuleContext<'a> {
    pub fn player(&self) -> PlayerId {
        self.dragged.player
    }

    pub fn opponent(&self) -> PlayerId {
        opponent(self.dragged.player)
    }

    pub fn hand(&self) -> &'a [Card] {
        self.state.hand(self.dragged.player)
    }

    pub fn dragged_value(&self) -> u8 {
        self.dragged.card.value()
    }

    /// Hand cards of `value` the player keeps after playing the dragged card.
    pub fn spare_count(&self, value: u8) -> usize {
        let mut skipped = self.dragged.source != CardSource::Hand;
        self.hand()
            .iter()
            .filter(|c| {
                if !skipped && **c == self.dragged.card {
                    skipped = true;
                    return false;
                }
                c.value() == value
            })
            .count()
    }

    pub fn holds_spare(&self, value: u8) -> bool {
        self.spare_count(value) > 0
    }

    pub fn target_loose(&self) -> Option<Card> {
        match self.target {
            ResolvedTarget::Loose { card, .. } => Some(card),
            _ => None,
        }
    }

    pub fn target_build(&self) -> Option<&'a Build> {
        match self.target {
            ResolvedTarget::Build(b) => Some(b),
            _ => None,
        }
    }

    pub fn target_stack(&self) -> Option<&'a StagingStack> {
        match self.target {
            ResolvedTarget::Stack(s) => Some(s),
            _ => None,
        }
    }
}

pub type Condition = fn(&RuleContext<'_>) -> bool;
pub type ActionBuilder = fn(&RuleContext<'_>) -> Option<Action>;

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub category: RuleCategory,
    pub priority: u16,
    pub exclusive: bool,
    pub requires_modal: bool,
    pub condition: Condition,
    pub action: ActionBuilder,
}

/// One fired rule and the action it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub rule_id: &'static str,
    pub category: RuleCategory,
    pub priority: u16,
    pub requires_modal: bool,
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub matches: Vec<RuleMatch>,
    /// Set when a single exclusive rule decided the outcome.
    pub exclusive: bool,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.matches.iter().map(|m| m.action).collect()
    }

    pub fn requires_modal(&self) -> bool {
        self.matches.iter().any(|m| m.requires_modal)
    }
}

#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

/// Immutable standard rule set for callers that do not carry their own.
pub static STANDARD_RULES: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::standard);

impl RuleRegistry {
    /// Rules are kept sorted by priority, highest first; equal priorities keep
    /// their given order.
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));
        Self { rules }
    }

    pub fn standard() -> Self {
        let mut rules = capture_rules();
        rules.extend(build_rules());
        rules.extend(staging_rules());
        rules.extend(trail_rules());
        Self::new(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Run every rule against `ctx`.
    ///
    /// An exclusive rule only wins when it is the highest-ranked match.
    /// Otherwise all non-exclusive matches are returned, deduplicated by
    /// action with their modal flags merged.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Evaluation {
        let matching: Vec<&Rule> = self.rules.iter().filter(|r| (r.condition)(ctx)).collect();

        if let Some(top) = matching.first().filter(|r| r.exclusive) {
            if let Some(action) = (top.action)(ctx) {
                return Evaluation {
                    matches: vec![RuleMatch::new(top, action)],
                    exclusive: true,
                };
            }
        }

        let mut matches: Vec<RuleMatch> = Vec::new();
        for rule in matching.into_iter().filter(|r| !r.exclusive) {
            let Some(action) = (rule.action)(ctx) else {
                continue;
            };
            match matches.iter_mut().find(|m| m.action == action) {
                Some(existing) => existing.requires_modal |= rule.requires_modal,
                None => matches.push(RuleMatch::new(rule, action)),
            }
        }
        Evaluation {
            matches,
            exclusive: false,
        }
    }
}

impl RuleMatch {
    fn new(rule: &Rule, action: Action) -> Self {
        Self {
            rule_id: rule.id,
            category: rule.category,
            priority: rule.priority,
            requires_modal: rule.requires_modal,
            action,
        }
    }
}
