//! Applying actions to the game state.

use serde::Serialize;

use crate::domain::actions::{Action, CaptureTarget};
use crate::domain::build_calc::{same_value, BuildKind, PlacedValue};
use crate::domain::rules::MAX_BUILD_VALUE;
use crate::domain::rules_trail::trail_allowed;
use crate::domain::staging::{
    add_to_staging_stack, cancel_staging_stack, create_staging_stack, finalize_staging_stack,
    FinalizeOutcome,
};
use crate::domain::state::{
    next_player, opponent, require_in_progress, require_turn, take_card, Build, BuildId,
    CardSource, GameState, PlayerId, TableItem,
};
use crate::domain::Card;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    pub turn_advanced: bool,
    /// Cards moved into the player's capture pile.
    pub captured: usize,
}

/// Apply `action` for `player`, re-validating it against `state`.
///
/// On error the state may be partially modified; callers apply to a copy and
/// keep it only on success.
pub fn apply_action(
    state: &mut GameState,
    player: PlayerId,
    action: &Action,
) -> Result<ApplyOutcome, DomainError> {
    require_in_progress(state, "apply_action")?;
    require_turn(state, player, "apply_action")?;

    if action.ends_turn() {
        if let Some(stack) = state.stack_owned_by(player) {
            let finalizes_it = matches!(
                action,
                Action::FinalizeStagingStack { stack_id, .. } if *stack_id == stack.stack_id
            );
            if !finalizes_it {
                return Err(DomainError::validation(
                    ValidationKind::NoValidAction,
                    format!(
                        "Finalize or cancel staging stack {} before ending the turn",
                        stack.stack_id
                    ),
                ));
            }
        }
    }

    let captured = match *action {
        Action::Capture {
            card,
            source,
            target,
            value,
        } => capture(state, player, card, source, target, value)?,
        Action::BuildCreate {
            card,
            target_card,
            value,
        } => {
            build_create(state, player, card, target_card, value)?;
            0
        }
        Action::BuildExtend {
            card,
            build_id,
            new_value,
        } => {
            build_extend(state, player, card, build_id, new_value)?;
            0
        }
        Action::BuildAugment {
            card,
            build_id,
            value,
        } => {
            build_augment(state, player, card, build_id, value)?;
            0
        }
        Action::CreateStagingStack {
            card,
            source,
            target_card,
        } => {
            create_staging_stack(state, player, card, source, target_card)?;
            0
        }
        Action::AddToStagingStack {
            card,
            source,
            stack_id,
        } => {
            add_to_staging_stack(state, player, stack_id, card, source)?;
            0
        }
        Action::FinalizeStagingStack {
            stack_id,
            build_value,
            resolution,
        } => match finalize_staging_stack(state, player, stack_id, build_value, resolution)? {
            FinalizeOutcome::Captured { cards } => cards,
            FinalizeOutcome::Built { .. } => 0,
        },
        Action::CancelStagingStack { stack_id } => {
            cancel_staging_stack(state, player, stack_id)?;
            0
        }
        Action::Trail { card } => {
            trail(state, player, card)?;
            0
        }
    };

    let turn_advanced = action.ends_turn();
    if turn_advanced {
        state.current_player = turn_after(state, player);
    }
    Ok(ApplyOutcome {
        turn_advanced,
        captured,
    })
}

/// The opponent moves next unless their hand is empty while the player
/// still holds cards (a capture with a capture-pile card uses no hand card).
fn turn_after(state: &GameState, player: PlayerId) -> PlayerId {
    let next = next_player(player);
    if state.hand(next).is_empty() && !state.hand(player).is_empty() {
        player
    } else {
        next
    }
}

fn capture(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
    source: CardSource,
    target: CaptureTarget,
    value: u8,
) -> Result<usize, DomainError> {
    if card.value() != value {
        return Err(DomainError::validation(
            ValidationKind::InvalidBuild,
            format!("{card} cannot capture value {value}"),
        ));
    }
    let position = match target {
        CaptureTarget::Loose { card: loose } => {
            let pos = state.find_loose(loose).ok_or_else(|| {
                DomainError::malformed_target(format!("No loose {loose} on the table"))
            })?;
            if loose.value() != value {
                return Err(DomainError::validation(
                    ValidationKind::NoValidAction,
                    format!("{card} does not match {loose}"),
                ));
            }
            pos
        }
        CaptureTarget::Build { build_id } => {
            let (pos, build) = state
                .find_build(build_id)
                .ok_or_else(|| DomainError::malformed_target(format!("No build {build_id}")))?;
            if build.value != value {
                return Err(DomainError::validation(
                    ValidationKind::NoValidAction,
                    format!("{card} cannot capture build {build_id} of {}", build.value),
                ));
            }
            pos
        }
    };

    match source {
        CardSource::Hand => {
            take_card(&mut state.player_hands[player as usize], card).ok_or_else(|| {
                DomainError::malformed_target(format!("{card} is not in player {player}'s hand"))
            })?;
        }
        CardSource::Captured => {
            let pile = &mut state.player_captures[opponent(player) as usize];
            if pile.last() != Some(&card) {
                return Err(DomainError::malformed_target(format!(
                    "{card} is not on top of the opponent's captures"
                )));
            }
            pile.pop();
        }
        CardSource::Table => {
            return Err(DomainError::validation(
                ValidationKind::NoValidAction,
                "Table cards cannot capture",
            ));
        }
    }

    let taken = state.table_cards.remove(position).cards();
    let count = taken.len() + 1;
    let pile = &mut state.player_captures[player as usize];
    pile.extend(taken);
    pile.push(card);
    state.last_capturer = Some(player);
    Ok(count)
}

/// The player must keep a card that can take the build later.
fn require_capture_card(state: &GameState, player: PlayerId, value: u8) -> Result<(), DomainError> {
    if state.hand(player).iter().any(|c| c.value() == value) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::MissingCaptureCard,
            format!("Player {player} holds no {value} to capture the build with"),
        ))
    }
}

fn take_from_hand(state: &mut GameState, player: PlayerId, card: Card) -> Result<(), DomainError> {
    take_card(&mut state.player_hands[player as usize], card)
        .map(|_| ())
        .ok_or_else(|| {
            DomainError::malformed_target(format!("{card} is not in player {player}'s hand"))
        })
}

fn build_create(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
    target_card: Card,
    value: u8,
) -> Result<(), DomainError> {
    let position = state.find_loose(target_card).ok_or_else(|| {
        DomainError::malformed_target(format!("No loose {target_card} on the table"))
    })?;
    let sum = card.value() + target_card.value();
    let kind = if card.value() == target_card.value() && value == card.value() {
        BuildKind::SameValue
    } else if sum == value && sum <= MAX_BUILD_VALUE {
        BuildKind::Sum
    } else {
        return Err(DomainError::validation(
            ValidationKind::InvalidBuild,
            format!("{card} and {target_card} cannot build {value}"),
        ));
    };

    take_from_hand(state, player, card)?;
    require_capture_card(state, player, value)?;

    let build_id = state.alloc_item_id();
    let mut build = Build {
        build_id,
        cards: vec![target_card, card],
        value,
        owner: player,
        kind,
        is_extendable: false,
    };
    build.refresh_extendable();
    state.table_cards[position] = TableItem::Build(build);
    Ok(())
}

fn build_mut(state: &mut GameState, build_id: BuildId) -> Result<&mut Build, DomainError> {
    state
        .table_cards
        .iter_mut()
        .find_map(|item| match item {
            TableItem::Build(b) if b.build_id == build_id => Some(b),
            _ => None,
        })
        .ok_or_else(|| DomainError::malformed_target(format!("No build {build_id}")))
}

fn build_extend(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
    build_id: BuildId,
    new_value: u8,
) -> Result<(), DomainError> {
    {
        let (_, build) = state
            .find_build(build_id)
            .ok_or_else(|| DomainError::malformed_target(format!("No build {build_id}")))?;
        if !build.is_extendable {
            return Err(DomainError::validation(
                ValidationKind::InvalidBuild,
                format!("Build {build_id} cannot be extended"),
            ));
        }
        let expected = build.value + card.value();
        if expected != new_value || new_value > MAX_BUILD_VALUE {
            return Err(DomainError::validation(
                ValidationKind::InvalidBuild,
                format!("Adding {card} to build {build_id} does not make {new_value}"),
            ));
        }
    }

    take_from_hand(state, player, card)?;
    require_capture_card(state, player, new_value)?;

    let build = build_mut(state, build_id)?;
    build.cards.push(card);
    build.value = new_value;
    build.owner = player;
    build.kind = BuildKind::Sum;
    build.refresh_extendable();
    Ok(())
}

fn build_augment(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
    build_id: BuildId,
    value: u8,
) -> Result<(), DomainError> {
    {
        let (_, build) = state
            .find_build(build_id)
            .ok_or_else(|| DomainError::malformed_target(format!("No build {build_id}")))?;
        if build.owner != player {
            return Err(DomainError::conflict(
                ConflictKind::OwnershipViolation,
                format!("Build {build_id} belongs to player {}", build.owner),
            ));
        }
        if build.value != value || card.value() != value {
            return Err(DomainError::validation(
                ValidationKind::InvalidBuild,
                format!("{card} cannot reinforce build {build_id} of {}", build.value),
            ));
        }
    }

    take_from_hand(state, player, card)?;
    require_capture_card(state, player, value)?;

    let build = build_mut(state, build_id)?;
    build.cards.push(card);
    let placed: Vec<PlacedValue> = build
        .cards
        .iter()
        .map(|c| PlacedValue::table(c.value()))
        .collect();
    build.kind = if same_value(&placed) == Some(value) {
        BuildKind::SameValue
    } else {
        BuildKind::Segmented
    };
    build.refresh_extendable();
    Ok(())
}

fn trail(state: &mut GameState, player: PlayerId, card: Card) -> Result<(), DomainError> {
    if !state.hand(player).contains(&card) {
        return Err(DomainError::malformed_target(format!(
            "{card} is not in player {player}'s hand"
        )));
    }
    if !trail_allowed(state, player, card) {
        return Err(DomainError::validation(
            ValidationKind::NoValidAction,
            format!("{card} cannot be trailed now"),
        ));
    }
    take_from_hand(state, player, card)?;
    state.table_cards.push(TableItem::loose(card));
    Ok(())
}
