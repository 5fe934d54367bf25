//! Staging stack lifecycle: create, add, finalize, cancel.
//!
//! These operations mutate the state in place and never advance the turn;
//! `play::apply_action` owns turn handling.

use serde::Serialize;

use crate::domain::actions::StackResolution;
use crate::domain::build_calc::{validate_build_strict, BuildCalculator, BuildKind};
use crate::domain::state::{
    opponent, take_card, Build, CardSource, GameState, PlayerId, StackId, StagedCard,
    StagingStack, TableItem,
};
use crate::domain::Card;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// What finalizing a stack produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum FinalizeOutcome {
    Built { build_id: StackId, value: u8, kind: BuildKind },
    Captured { cards: usize },
}

/// Start a stack on `target_card` with `card` dropped onto it.
pub fn create_staging_stack(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
    source: CardSource,
    target_card: Card,
) -> Result<StackId, DomainError> {
    if state.stack_owned_by(player).is_some() {
        return Err(DomainError::conflict(
            ConflictKind::StackLimitExceeded,
            format!("Player {player} already has a staging stack"),
        ));
    }
    if card == target_card {
        return Err(DomainError::malformed_target(format!(
            "{card} cannot be staged onto itself"
        )));
    }
    let target_original = state.find_loose(target_card).ok_or_else(|| {
        DomainError::malformed_target(format!("No loose {target_card} on the table"))
    })?;

    let original_index = take_from_source(state, player, card, source)?;
    let target_index = state.find_loose(target_card).ok_or_else(|| {
        DomainError::malformed_target(format!("No loose {target_card} on the table"))
    })?;

    let cards = vec![
        StagedCard {
            card: target_card,
            source: CardSource::Table,
            original_index: target_original,
        },
        StagedCard {
            card,
            source,
            original_index,
        },
    ];
    let stack_id = state.alloc_item_id();
    let mut stack = StagingStack {
        stack_id,
        owner: player,
        cards,
        calc: BuildCalculator::new(),
    };
    stack.calc = BuildCalculator::from_cards(&stack.placed_values());
    state.table_cards[target_index] = TableItem::Staging(stack);
    Ok(stack_id)
}

/// Append `card` to the player's stack and feed it to the calculator.
pub fn add_to_staging_stack(
    state: &mut GameState,
    player: PlayerId,
    stack_id: StackId,
    card: Card,
    source: CardSource,
) -> Result<(), DomainError> {
    let (stack_position, staged_from_table) = {
        let stack = owned_stack(state, player, stack_id)?;
        if !stack.calc.is_valid {
            return Err(overflowed(stack_id));
        }
        if source == CardSource::Hand && stack.hand_card_count() > 0 {
            return Err(DomainError::validation(
                ValidationKind::NoValidAction,
                "A staging stack may hold only one card from hand",
            ));
        }
        let position = state
            .find_stack(stack_id)
            .map(|(i, _)| i)
            .ok_or_else(|| DomainError::malformed_target(format!("No staging stack {stack_id}")))?;
        (position, stack.table_original_indices())
    };

    let taken = take_from_source(state, player, card, source)?;
    let original_index = match source {
        CardSource::Table => index_before_stack(taken, stack_position, &staged_from_table),
        CardSource::Hand | CardSource::Captured => taken,
    };
    let stack = stack_mut(state, stack_id)?;
    stack.cards.push(StagedCard {
        card,
        source,
        original_index,
    });
    let placed = stack.placed_values();
    stack.calc.push(&placed);
    Ok(())
}

/// Commit a stack as a build or a capture after strict re-validation.
///
/// Nothing is changed when validation fails.
pub fn finalize_staging_stack(
    state: &mut GameState,
    player: PlayerId,
    stack_id: StackId,
    build_value: u8,
    resolution: StackResolution,
) -> Result<FinalizeOutcome, DomainError> {
    let (position, stack) = {
        let stack = owned_stack(state, player, stack_id)?;
        if !stack.calc.is_valid {
            return Err(overflowed(stack_id));
        }
        let position = state
            .find_stack(stack_id)
            .map(|(i, _)| i)
            .ok_or_else(|| DomainError::malformed_target(format!("No staging stack {stack_id}")))?;
        (position, stack.clone())
    };
    let kind = validate_build_strict(&stack.placed_values(), build_value)?;

    match resolution {
        StackResolution::Build => {
            if stack.hand_card_count() != 1 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBuild,
                    "A build must include exactly one card from hand",
                ));
            }
            if !state.hand(player).iter().any(|c| c.value() == build_value) {
                return Err(DomainError::validation(
                    ValidationKind::MissingCaptureCard,
                    format!("Player {player} holds no {build_value} to capture the build with"),
                ));
            }
            let mut build = Build {
                build_id: stack.stack_id,
                cards: stack.plain_cards(),
                value: build_value,
                owner: player,
                kind,
                is_extendable: false,
            };
            build.refresh_extendable();
            state.table_cards[position] = TableItem::Build(build);
            Ok(FinalizeOutcome::Built {
                build_id: stack_id,
                value: build_value,
                kind,
            })
        }
        StackResolution::Capture { card } => {
            if stack.hand_card_count() != 0 {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBuild,
                    "A stack holding a hand card cannot be captured",
                ));
            }
            if card.value() != build_value {
                return Err(DomainError::validation(
                    ValidationKind::InvalidBuild,
                    format!("{card} cannot capture a build of {build_value}"),
                ));
            }
            let hand = &mut state.player_hands[player as usize];
            take_card(hand, card).ok_or_else(|| {
                DomainError::malformed_target(format!("{card} is not in player {player}'s hand"))
            })?;
            state.table_cards.remove(position);
            let pile = &mut state.player_captures[player as usize];
            pile.extend(stack.plain_cards());
            pile.push(card);
            state.last_capturer = Some(player);
            Ok(FinalizeOutcome::Captured {
                cards: stack.cards.len() + 1,
            })
        }
    }
}

/// Dissolve a stack, returning every card to where it came from.
pub fn cancel_staging_stack(
    state: &mut GameState,
    player: PlayerId,
    stack_id: StackId,
) -> Result<(), DomainError> {
    owned_stack(state, player, stack_id)?;
    let Some((position, _)) = state.find_stack(stack_id) else {
        return Err(DomainError::malformed_target(format!(
            "No staging stack {stack_id}"
        )));
    };
    let TableItem::Staging(stack) = state.table_cards.remove(position) else {
        return Err(DomainError::malformed_target(format!(
            "No staging stack {stack_id}"
        )));
    };

    let mut table_cards: Vec<StagedCard> = Vec::new();
    // Undo in reverse so earlier indices are still meaningful.
    for staged in stack.cards.iter().rev() {
        match staged.source {
            CardSource::Hand => {
                let hand = &mut state.player_hands[player as usize];
                let at = staged.original_index.min(hand.len());
                hand.insert(at, staged.card);
            }
            CardSource::Captured => {
                state.player_captures[opponent(player) as usize].push(staged.card);
            }
            CardSource::Table => table_cards.push(*staged),
        }
    }
    // Ascending inserts land each card back on its pre-stack index.
    table_cards.sort_by_key(|s| s.original_index);
    for staged in table_cards {
        let at = staged.original_index.min(state.table_cards.len());
        state.table_cards.insert(at, TableItem::loose(staged.card));
    }
    Ok(())
}

fn owned_stack(
    state: &GameState,
    player: PlayerId,
    stack_id: StackId,
) -> Result<&StagingStack, DomainError> {
    let (_, stack) = state
        .find_stack(stack_id)
        .ok_or_else(|| DomainError::malformed_target(format!("No staging stack {stack_id}")))?;
    if stack.owner != player {
        return Err(DomainError::conflict(
            ConflictKind::OwnershipViolation,
            format!("Staging stack {stack_id} belongs to player {}", stack.owner),
        ));
    }
    Ok(stack)
}

fn stack_mut(state: &mut GameState, stack_id: StackId) -> Result<&mut StagingStack, DomainError> {
    state
        .table_cards
        .iter_mut()
        .find_map(|item| match item {
            TableItem::Staging(s) if s.stack_id == stack_id => Some(s),
            _ => None,
        })
        .ok_or_else(|| DomainError::malformed_target(format!("No staging stack {stack_id}")))
}

fn overflowed(stack_id: StackId) -> DomainError {
    DomainError::validation(
        ValidationKind::InvalidBuildOverflow,
        format!("Staging stack {stack_id} overflowed and can only be cancelled"),
    )
}

/// Map an index in the current table to the table as it was before the stack
/// existed: drop the stack's own slot, then reopen the slots of the table
/// cards it already holds (`staged` ascending).
fn index_before_stack(current: usize, stack_position: usize, staged: &[usize]) -> usize {
    let mut index = if current > stack_position {
        current - 1
    } else {
        current
    };
    for &original in staged {
        if original <= index {
            index += 1;
        }
    }
    index
}

/// Remove `card` from where `source` says it is, returning its old index.
fn take_from_source(
    state: &mut GameState,
    player: PlayerId,
    card: Card,
    source: CardSource,
) -> Result<usize, DomainError> {
    match source {
        CardSource::Hand => take_card(&mut state.player_hands[player as usize], card)
            .ok_or_else(|| {
                DomainError::malformed_target(format!("{card} is not in player {player}'s hand"))
            }),
        CardSource::Table => {
            let index = state.find_loose(card).ok_or_else(|| {
                DomainError::malformed_target(format!("No loose {card} on the table"))
            })?;
            state.table_cards.remove(index);
            Ok(index)
        }
        CardSource::Captured => {
            let pile = &mut state.player_captures[opponent(player) as usize];
            if pile.last() != Some(&card) {
                return Err(DomainError::malformed_target(format!(
                    "{card} is not on top of player {}'s captures",
                    opponent(player)
                )));
            }
            pile.pop();
            Ok(pile.len())
        }
    }
}
