#![allow(dead_code)]

//! Hand-arranged games installed straight into the session registry.
//!
//! Cards not placed explicitly stay in the stock, so every installed game
//! holds the full deck.

use backend_test_support::unique_helpers::unique_game_id;
use casino_backend::domain::dealing::full_deck;
use casino_backend::domain::state::{GameState, Phase, PlayerId, TableItem};
use casino_backend::domain::Card;
use casino_backend::{AppState, GameId};

pub fn card(token: &str) -> Card {
    token
        .parse()
        .unwrap_or_else(|e| panic!("bad card token {token}: {e}"))
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| card(t)).collect()
}

pub struct TableSetup {
    hands: [Vec<Card>; 2],
    table: Vec<TableItem>,
    turn: PlayerId,
}

impl TableSetup {
    pub fn new() -> Self {
        Self {
            hands: [Vec::new(), Vec::new()],
            table: Vec::new(),
            turn: 0,
        }
    }

    pub fn hand(mut self, player: PlayerId, tokens: &[&str]) -> Self {
        self.hands[player as usize] = cards(tokens);
        self
    }

    pub fn loose(mut self, tokens: &[&str]) -> Self {
        self.table
            .extend(cards(tokens).into_iter().map(TableItem::loose));
        self
    }

    pub fn turn(mut self, player: PlayerId) -> Self {
        self.turn = player;
        self
    }

    /// Register the arranged game under a fresh id at version 0.
    pub fn install(self, app: &AppState) -> GameId {
        let game_id = unique_game_id();
        let placed: Vec<Card> = self
            .hands
            .iter()
            .flatten()
            .copied()
            .chain(self.table.iter().flat_map(|item| item.cards()))
            .collect();
        let deck: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !placed.contains(c))
            .collect();

        let state = GameState {
            game_id,
            phase: Phase::InProgress,
            round: 1,
            hand_size: app.config.hand_size,
            current_player: self.turn,
            table_cards: self.table,
            player_hands: self.hands,
            player_captures: [Vec::new(), Vec::new()],
            deck,
            last_capturer: None,
            next_item_id: 1,
        };
        app.sessions
            .insert(game_id, state)
            .expect("install arranged game");
        game_id
    }
}
