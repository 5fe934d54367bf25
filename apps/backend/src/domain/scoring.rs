use serde::Serialize;

use crate::domain::rules::PLAYERS;
use crate::domain::{Card, Rank, Suit};

pub const MOST_CARDS_POINTS: u8 = 3;
pub const MOST_SPADES_POINTS: u8 = 1;
pub const ACE_POINTS: u8 = 1;
pub const BIG_CASINO_POINTS: u8 = 2; // ten of diamonds
pub const LITTLE_CASINO_POINTS: u8 = 1; // two of spades

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub cards: u8,
    pub spades: u8,
    pub most_cards: u8,
    pub most_spades: u8,
    pub aces: u8,
    pub big_casino: u8,
    pub little_casino: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.most_cards + self.most_spades + self.aces + self.big_casino + self.little_casino
    }
}

/// Score both capture piles. Ties on cards or spades award nobody.
pub fn score_captures(captures: &[Vec<Card>; PLAYERS]) -> [ScoreBreakdown; PLAYERS] {
    let mut scores: [ScoreBreakdown; PLAYERS] = [ScoreBreakdown::default(); PLAYERS];
    for (score, pile) in scores.iter_mut().zip(captures.iter()) {
        score.cards = pile.len() as u8;
        score.spades = pile.iter().filter(|c| c.suit == Suit::Spades).count() as u8;
        score.aces = pile.iter().filter(|c| c.rank == Rank::Ace).count() as u8 * ACE_POINTS;
        if pile.contains(&Card::new(Rank::Ten, Suit::Diamonds)) {
            score.big_casino = BIG_CASINO_POINTS;
        }
        if pile.contains(&Card::new(Rank::Two, Suit::Spades)) {
            score.little_casino = LITTLE_CASINO_POINTS;
        }
    }

    if let Some(p) = sole_leader(scores.map(|s| s.cards)) {
        scores[p].most_cards = MOST_CARDS_POINTS;
    }
    if let Some(p) = sole_leader(scores.map(|s| s.spades)) {
        scores[p].most_spades = MOST_SPADES_POINTS;
    }
    scores
}

fn sole_leader(counts: [u8; PLAYERS]) -> Option<usize> {
    let max = *counts.iter().max()?;
    let mut leaders = counts.iter().enumerate().filter(|(_, c)| **c == max);
    let (first, _) = leaders.next()?;
    leaders.next().is_none().then_some(first)
}

/// Player with the higher total, `None` on a tie.
pub fn winner(scores: &[ScoreBreakdown; PLAYERS]) -> Option<usize> {
    sole_leader(scores.map(|s| s.total()))
}
