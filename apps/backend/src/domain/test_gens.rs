// Proptest generators for domain types.
// Generated values are valid by construction; tests should not need prop_assume!.

use proptest::prelude::*;

use crate::domain::actions::{DraggedItem, TargetInfo};
use crate::domain::build_calc::PlacedValue;
use crate::domain::state::{CardSource, GameState, TableItem};
use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (rank(), suit()).prop_map(|(rank, suit)| Card::new(rank, suit))
}

pub fn source() -> impl Strategy<Value = CardSource> {
    prop_oneof![
        Just(CardSource::Hand),
        Just(CardSource::Table),
        Just(CardSource::Captured),
    ]
}

/// Card values 1..=10 from any source.
pub fn placed_value() -> impl Strategy<Value = PlacedValue> {
    (1u8..=10, source()).prop_map(|(v, s)| PlacedValue::new(v, s))
}

/// Sequences of at least two cards whose total stays at or below 10.
pub fn small_total_sequence() -> impl Strategy<Value = Vec<PlacedValue>> {
    prop::collection::vec(1u8..=5, 2..=5).prop_map(|values| {
        let mut total = 0u8;
        let mut out = Vec::new();
        for v in values {
            if total + v > 10 {
                break;
            }
            total += v;
            out.push(PlacedValue::table(v));
        }
        if out.len() < 2 {
            out = vec![PlacedValue::table(1), PlacedValue::table(1)];
        }
        out
    })
}

pub fn any_sequence(max_len: usize) -> impl Strategy<Value = Vec<PlacedValue>> {
    prop::collection::vec(placed_value(), 2..=max_len)
}

/// Seed for a fresh game.
pub fn game_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Every drag the current player could attempt against `state`:
/// hand and loose cards onto every table item and the empty table area.
pub fn candidate_interactions(state: &GameState) -> Vec<(DraggedItem, TargetInfo)> {
    let player = state.current_player;
    let mut targets: Vec<TargetInfo> = vec![TargetInfo::Table];
    for (index, item) in state.table_cards.iter().enumerate() {
        targets.push(match item {
            TableItem::Loose { card } => TargetInfo::Loose {
                card: *card,
                index: Some(index),
            },
            TableItem::Build(b) => TargetInfo::Build {
                build_id: b.build_id,
            },
            TableItem::Staging(s) => TargetInfo::TemporaryStack {
                stack_id: s.stack_id,
            },
        });
    }
    let mut dragged: Vec<DraggedItem> = state
        .hand(player)
        .iter()
        .map(|c| DraggedItem::from_hand(*c, player))
        .collect();
    dragged.extend(state.loose_cards().map(|c| DraggedItem::from_table(c, player)));

    let mut out = Vec::new();
    for d in &dragged {
        for t in &targets {
            out.push((*d, *t));
        }
    }
    out
}
