use serde::{Deserialize, Serialize};

use crate::domain::build_calc::{BuildCalculator, BuildKind, PlacedValue};
use crate::domain::dealing::{deal_from_stock, shuffled_deck};
use crate::domain::rules::PLAYERS;
use crate::domain::{Card, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

pub type PlayerId = u8; // 0..=1

/// Identifier shared by builds and staging stacks; never reused within a game.
pub type ItemId = u32;
pub type BuildId = ItemId;
pub type StackId = ItemId;

/// Where a moved card came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    /// The acting player's hand.
    Hand,
    /// A loose card on the table.
    Table,
    /// The top card of the opponent's capture pile.
    Captured,
}

/// Overall game progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Complete,
}

/// A committed, owned combination of cards with a fixed capture value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub build_id: BuildId,
    pub cards: Vec<Card>,
    pub value: u8,
    pub owner: PlayerId,
    pub kind: BuildKind,
    pub is_extendable: bool,
}

impl Build {
    pub fn card_sum(&self) -> u16 {
        self.cards.iter().map(|c| c.value() as u16).sum()
    }

    /// Only single-segment builds can grow in value.
    pub fn refresh_extendable(&mut self) {
        self.is_extendable = self.card_sum() == self.value as u16;
    }
}

/// A card inside a staging stack, with enough provenance to undo the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedCard {
    pub card: Card,
    pub source: CardSource,
    pub original_index: usize,
}

/// In-progress, not yet committed accumulation of cards by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingStack {
    pub stack_id: StackId,
    pub owner: PlayerId,
    pub cards: Vec<StagedCard>,
    #[serde(flatten)]
    pub calc: BuildCalculator,
}

impl StagingStack {
    pub fn placed_values(&self) -> Vec<PlacedValue> {
        self.cards
            .iter()
            .map(|s| PlacedValue::new(s.card.value(), s.source))
            .collect()
    }

    pub fn hand_card_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|s| s.source == CardSource::Hand)
            .count()
    }

    pub fn plain_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|s| s.card).collect()
    }

    /// Pre-stack table positions of the table cards staged so far, ascending.
    pub fn table_original_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .cards
            .iter()
            .filter(|s| s.source == CardSource::Table)
            .map(|s| s.original_index)
            .collect();
        indices.sort_unstable();
        indices
    }
}

/// Anything that can sit on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableItem {
    Loose { card: Card },
    Build(Build),
    Staging(StagingStack),
}

impl TableItem {
    pub fn loose(card: Card) -> Self {
        TableItem::Loose { card }
    }

    pub fn cards(&self) -> Vec<Card> {
        match self {
            TableItem::Loose { card } => vec![*card],
            TableItem::Build(build) => build.cards.clone(),
            TableItem::Staging(stack) => stack.plain_cards(),
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            TableItem::Loose { .. } => 1,
            TableItem::Build(build) => build.cards.len(),
            TableItem::Staging(stack) => stack.cards.len(),
        }
    }

    pub fn as_loose(&self) -> Option<Card> {
        match self {
            TableItem::Loose { card } => Some(*card),
            _ => None,
        }
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: i64,
    pub phase: Phase,
    /// Round number, 1-based.
    pub round: u8,
    pub hand_size: u8,
    /// Player whose turn it is to act.
    pub current_player: PlayerId,
    pub table_cards: Vec<TableItem>,
    pub player_hands: [Vec<Card>; PLAYERS],
    pub player_captures: [Vec<Card>; PLAYERS],
    /// Undealt stock.
    pub deck: Vec<Card>,
    pub last_capturer: Option<PlayerId>,
    pub next_item_id: ItemId,
}

/// Turn order for two players.
#[inline]
pub fn next_player(p: PlayerId) -> PlayerId {
    ((p as usize + 1) % PLAYERS) as PlayerId
}

#[inline]
pub fn opponent(p: PlayerId) -> PlayerId {
    next_player(p)
}

impl GameState {
    /// Shuffle a fresh deck and deal the first round. The table starts empty.
    pub fn new_game(game_id: i64, seed: u64, hand_size: u8) -> Result<Self, DomainError> {
        let mut deck = shuffled_deck(seed);
        let player_hands = deal_from_stock(&mut deck, hand_size)?;
        Ok(Self {
            game_id,
            phase: Phase::InProgress,
            round: 1,
            hand_size,
            current_player: 0,
            table_cards: Vec::new(),
            player_hands,
            player_captures: std::array::from_fn(|_| Vec::new()),
            deck,
            last_capturer: None,
            next_item_id: 1,
        })
    }

    pub fn alloc_item_id(&mut self) -> ItemId {
        let id = self.next_item_id;
        self.next_item_id = self.next_item_id.saturating_add(1);
        id
    }

    /// Every card in the game, wherever it currently sits.
    pub fn total_cards(&self) -> usize {
        let table: usize = self.table_cards.iter().map(TableItem::card_count).sum();
        let hands: usize = self.player_hands.iter().map(Vec::len).sum();
        let captures: usize = self.player_captures.iter().map(Vec::len).sum();
        table + hands + captures + self.deck.len()
    }

    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.player_hands[player as usize]
    }

    pub fn find_loose(&self, card: Card) -> Option<usize> {
        self.table_cards
            .iter()
            .position(|item| item.as_loose() == Some(card))
    }

    pub fn loose_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.table_cards.iter().filter_map(TableItem::as_loose)
    }

    pub fn loose_count_of_rank(&self, rank: Rank) -> usize {
        self.loose_cards().filter(|c| c.rank == rank).count()
    }

    pub fn find_build(&self, build_id: BuildId) -> Option<(usize, &Build)> {
        self.table_cards
            .iter()
            .enumerate()
            .find_map(|(i, item)| match item {
                TableItem::Build(b) if b.build_id == build_id => Some((i, b)),
                _ => None,
            })
    }

    pub fn find_stack(&self, stack_id: StackId) -> Option<(usize, &StagingStack)> {
        self.table_cards
            .iter()
            .enumerate()
            .find_map(|(i, item)| match item {
                TableItem::Staging(s) if s.stack_id == stack_id => Some((i, s)),
                _ => None,
            })
    }

    pub fn stack_owned_by(&self, player: PlayerId) -> Option<&StagingStack> {
        self.table_cards.iter().find_map(|item| match item {
            TableItem::Staging(s) if s.owner == player => Some(s),
            _ => None,
        })
    }

    pub fn builds_owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Build> + '_ {
        self.table_cards.iter().filter_map(move |item| match item {
            TableItem::Build(b) if b.owner == player => Some(b),
            _ => None,
        })
    }

    /// Top card of `owner`'s capture pile.
    pub fn top_capture(&self, owner: PlayerId) -> Option<Card> {
        self.player_captures[owner as usize].last().copied()
    }
}

pub fn require_in_progress(state: &GameState, ctx: &'static str) -> Result<(), DomainError> {
    if state.phase != Phase::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Game is over ({ctx})"),
        ));
    }
    Ok(())
}

pub fn require_turn(
    state: &GameState,
    player: PlayerId,
    ctx: &'static str,
) -> Result<(), DomainError> {
    if player as usize >= PLAYERS {
        return Err(DomainError::validation_other(format!(
            "Unknown player {player} ({ctx})"
        )));
    }
    if state.current_player != player {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!(
                "Player {player} acted but it is player {}'s turn ({ctx})",
                state.current_player
            ),
        ));
    }
    Ok(())
}

/// Remove one occurrence of `card` from `cards`, returning its former index.
pub(crate) fn take_card(cards: &mut Vec<Card>, card: Card) -> Option<usize> {
    let pos = cards.iter().position(|c| *c == card)?;
    cards.remove(pos);
    Some(pos)
}
