//! Round progression after a turn ends.

use serde::Serialize;

use crate::domain::dealing::deal_from_stock;
use crate::domain::state::{GameState, Phase, PlayerId};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundProgress {
    /// Hands still hold cards.
    Continue,
    /// Both hands were empty and a new round was dealt.
    NextRound { round: u8 },
    /// Stock exhausted; table swept and game closed.
    GameOver { swept_to: Option<PlayerId>, swept: usize },
}

pub fn hands_exhausted(state: &GameState) -> bool {
    state.player_hands.iter().all(Vec::is_empty)
}

/// Deal the next round or finish the game once both hands are empty.
pub fn advance_round(state: &mut GameState) -> Result<RoundProgress, DomainError> {
    if state.phase != Phase::InProgress || !hands_exhausted(state) {
        return Ok(RoundProgress::Continue);
    }
    if !state.deck.is_empty() {
        state.player_hands = deal_from_stock(&mut state.deck, state.hand_size)?;
        state.round = state.round.saturating_add(1);
        return Ok(RoundProgress::NextRound { round: state.round });
    }
    let (swept_to, swept) = finish_game(state);
    Ok(RoundProgress::GameOver { swept_to, swept })
}

/// Give whatever is left on the table to the last player who captured.
///
/// If nobody ever captured the table stays as it is.
pub fn finish_game(state: &mut GameState) -> (Option<PlayerId>, usize) {
    state.phase = Phase::Complete;
    let Some(player) = state.last_capturer else {
        return (None, 0);
    };
    let remaining: Vec<_> = state
        .table_cards
        .drain(..)
        .flat_map(|item| item.cards())
        .collect();
    let swept = remaining.len();
    state.player_captures[player as usize].extend(remaining);
    (Some(player), swept)
}
