//! Action determination: turn a drag interaction into legal actions.
//!
//! This is a pure read of the game state. Rejections come back as data on the
//! decision so callers can render feedback without aborting anything.

use serde::Serialize;

use crate::domain::actions::{Action, CaptureTarget, DraggedItem, TargetInfo};
use crate::domain::rule_registry::{
    Evaluation, ResolvedTarget, RuleContext, RuleRegistry, STANDARD_RULES,
};
use crate::domain::state::{opponent, require_in_progress, CardSource, GameState, PlayerId};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&DomainError> for DecisionError {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code(),
            message: err.detail().to_string(),
        }
    }
}

/// Outcome of a drag interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDecision {
    pub actions: Vec<Action>,
    pub requires_modal: bool,
    pub error: Option<DecisionError>,
}

impl ActionDecision {
    pub fn rejected(err: &DomainError) -> Self {
        Self {
            actions: Vec::new(),
            requires_modal: false,
            error: Some(err.into()),
        }
    }

    fn choose(actions: Vec<Action>) -> Self {
        Self {
            actions,
            requires_modal: true,
            error: None,
        }
    }

    fn auto(action: Action) -> Self {
        Self {
            actions: vec![action],
            requires_modal: false,
            error: None,
        }
    }

    /// The action to apply without asking, if the decision is unambiguous.
    pub fn auto_action(&self) -> Option<Action> {
        match (&self.error, self.requires_modal, self.actions.as_slice()) {
            (None, false, [only]) => Some(*only),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// Decide what dropping `dragged` on `target` means, using the standard rules.
pub fn determine_actions(
    dragged: &DraggedItem,
    target: &TargetInfo,
    state: &GameState,
) -> ActionDecision {
    determine_actions_with(&STANDARD_RULES, dragged, target, state)
}

pub fn determine_actions_with(
    registry: &RuleRegistry,
    dragged: &DraggedItem,
    target: &TargetInfo,
    state: &GameState,
) -> ActionDecision {
    match try_determine(registry, dragged, target, state) {
        Ok(decision) => decision,
        Err(err) => ActionDecision::rejected(&err),
    }
}

fn try_determine(
    registry: &RuleRegistry,
    dragged: &DraggedItem,
    target: &TargetInfo,
    state: &GameState,
) -> Result<ActionDecision, DomainError> {
    require_in_progress(state, "determine_actions")?;
    if dragged.player != state.current_player {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!(
                "It is player {}'s turn, not player {}'s",
                state.current_player, dragged.player
            ),
        ));
    }
    locate_dragged(state, dragged)?;
    let resolved = resolve_target(state, target)?;
    if let ResolvedTarget::Loose { card, .. } = resolved {
        if card == dragged.card {
            return Err(DomainError::malformed_target(format!(
                "{card} dropped onto itself"
            )));
        }
    }

    match dragged.source {
        CardSource::Table => table_to_table(state, dragged, resolved),
        CardSource::Hand | CardSource::Captured => {
            if let ResolvedTarget::Stack(stack) = resolved {
                if stack.owner != dragged.player {
                    return Err(DomainError::conflict(
                        ConflictKind::OwnershipViolation,
                        format!(
                            "Staging stack {} belongs to player {}",
                            stack.stack_id, stack.owner
                        ),
                    ));
                }
            }
            let ctx = RuleContext {
                dragged,
                target: resolved,
                state,
            };
            let evaluation = without_blocked(registry.evaluate(&ctx), state, dragged.player);
            if evaluation.is_empty() {
                return Err(no_match_error(state, dragged.player, resolved));
            }
            resolve(evaluation, state)
        }
    }
}

/// While a player has a staging stack open, the only way to end the turn is to
/// finalize it.
fn without_blocked(mut evaluation: Evaluation, state: &GameState, player: PlayerId) -> Evaluation {
    if let Some(stack) = state.stack_owned_by(player) {
        let stack_id = stack.stack_id;
        evaluation.matches.retain(|m| match m.action {
            Action::FinalizeStagingStack { stack_id: id, .. } => id == stack_id,
            other => !other.ends_turn(),
        });
    }
    evaluation
}

fn no_match_error(state: &GameState, player: PlayerId, target: ResolvedTarget<'_>) -> DomainError {
    match target {
        ResolvedTarget::Loose { .. } if state.stack_owned_by(player).is_some() => {
            DomainError::conflict(
                ConflictKind::StackLimitExceeded,
                format!("Player {player} already has a staging stack"),
            )
        }
        ResolvedTarget::Stack(stack) if !stack.calc.is_valid => DomainError::validation(
            ValidationKind::InvalidBuildOverflow,
            format!("Staging stack {} is invalid and must be cancelled", stack.stack_id),
        ),
        _ => DomainError::validation(ValidationKind::NoValidAction, "No valid action"),
    }
}

fn resolve(evaluation: Evaluation, state: &GameState) -> Result<ActionDecision, DomainError> {
    let requires_modal = evaluation.requires_modal();
    let mut actions = evaluation.actions();
    if actions.len() != 1 {
        return Ok(ActionDecision::choose(actions));
    }
    let action = actions.remove(0);
    match action {
        // Trailing commits the turn, so it is always confirmed.
        Action::Trail { .. } => Ok(ActionDecision::choose(vec![action])),
        Action::Capture {
            target: CaptureTarget::Loose { card },
            ..
        } if state.loose_count_of_rank(card.rank) > 1 => Err(DomainError::validation(
            ValidationKind::AmbiguousCapture,
            format!("More than one loose {:?} on the table", card.rank),
        )),
        _ if requires_modal => Ok(ActionDecision::choose(vec![action])),
        _ => Ok(ActionDecision::auto(action)),
    }
}

fn table_to_table(
    state: &GameState,
    dragged: &DraggedItem,
    target: ResolvedTarget<'_>,
) -> Result<ActionDecision, DomainError> {
    let player = dragged.player;
    match target {
        ResolvedTarget::Loose { card, .. } => {
            if state.stack_owned_by(player).is_some() {
                return Err(DomainError::conflict(
                    ConflictKind::StackLimitExceeded,
                    format!("Player {player} already has a staging stack"),
                ));
            }
            Ok(ActionDecision::auto(Action::CreateStagingStack {
                card: dragged.card,
                source: CardSource::Table,
                target_card: card,
            }))
        }
        ResolvedTarget::Stack(stack) => {
            if stack.owner != player {
                return Err(DomainError::conflict(
                    ConflictKind::OwnershipViolation,
                    format!(
                        "Staging stack {} belongs to player {}",
                        stack.stack_id, stack.owner
                    ),
                ));
            }
            if !stack.calc.is_valid {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBuildOverflow,
                    format!(
                        "Staging stack {} is invalid and must be cancelled",
                        stack.stack_id
                    ),
                ));
            }
            Ok(ActionDecision::auto(Action::AddToStagingStack {
                card: dragged.card,
                source: CardSource::Table,
                stack_id: stack.stack_id,
            }))
        }
        ResolvedTarget::Build(_) | ResolvedTarget::Table => Err(DomainError::validation(
            ValidationKind::NoValidAction,
            "Table cards can only be staged onto loose cards or stacks",
        )),
    }
}

/// The dragged card must actually be where the interaction says it is.
pub(crate) fn locate_dragged(state: &GameState, dragged: &DraggedItem) -> Result<(), DomainError> {
    let card = dragged.card;
    let present = match dragged.source {
        CardSource::Hand => state.hand(dragged.player).contains(&card),
        CardSource::Table => state.find_loose(card).is_some(),
        CardSource::Captured => state.top_capture(opponent(dragged.player)) == Some(card),
    };
    if present {
        Ok(())
    } else {
        Err(DomainError::malformed_target(format!(
            "{card} is not available from {:?}",
            dragged.source
        )))
    }
}

pub(crate) fn resolve_target<'a>(
    state: &'a GameState,
    target: &TargetInfo,
) -> Result<ResolvedTarget<'a>, DomainError> {
    match *target {
        TargetInfo::Loose { card, index } => {
            let hinted = index.filter(|i| {
                state
                    .table_cards
                    .get(*i)
                    .and_then(|item| item.as_loose())
                    == Some(card)
            });
            let index = hinted
                .or_else(|| state.find_loose(card))
                .ok_or_else(|| {
                    DomainError::malformed_target(format!("No loose {card} on the table"))
                })?;
            Ok(ResolvedTarget::Loose { card, index })
        }
        TargetInfo::Build { build_id } => state
            .find_build(build_id)
            .map(|(_, b)| ResolvedTarget::Build(b))
            .ok_or_else(|| DomainError::malformed_target(format!("No build {build_id}"))),
        TargetInfo::TemporaryStack { stack_id } => state
            .find_stack(stack_id)
            .map(|(_, s)| ResolvedTarget::Stack(s))
            .ok_or_else(|| {
                DomainError::malformed_target(format!("No staging stack {stack_id}"))
            }),
        TargetInfo::Table => Ok(ResolvedTarget::Table),
    }
}
