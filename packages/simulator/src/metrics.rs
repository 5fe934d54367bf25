//! Metrics collection and output for simulation results.

use std::collections::BTreeMap;

use casino_backend::domain::rules::PLAYERS;
use casino_backend::domain::scoring::ScoreBreakdown;
use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: i64,
    pub seed: u64,
    pub timestamp: String,
    pub config: RunConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub hand_size: u8,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: [u8; PLAYERS],
    /// `None` on a tie.
    pub winner: Option<u8>,
    pub rounds_played: u8,
    pub actions: usize,
    pub rejected_actions: u32,
    pub action_counts: BTreeMap<&'static str, u32>,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub player: u8,
    pub total_score: u8,
    pub breakdown: ScoreBreakdown,
    /// Cards won by the player's own captures, before the final sweep.
    pub captured_in_play: usize,
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    config: RunConfig,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let scores = &result.summary.scores;
    let player_metrics: Vec<PlayerMetrics> = scores
        .iter()
        .enumerate()
        .map(|(player, breakdown)| PlayerMetrics {
            player: player as u8,
            total_score: breakdown.total(),
            breakdown: *breakdown,
            captured_in_play: result.captured[player],
        })
        .collect();

    GameMetrics {
        game_id: result.game_id,
        seed: result.seed,
        timestamp,
        config,
        result: GameResultMetrics {
            final_scores: [scores[0].total(), scores[1].total()],
            winner: result.summary.winner,
            rounds_played: result.rounds_played,
            actions: result.actions,
            rejected_actions: result.rejected,
            action_counts: result.action_counts.clone(),
            duration_ms,
        },
        player_metrics,
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: i64,
    pub seed: u64,
    /// Empty on a tie.
    pub winner: Option<u8>,
    pub player0_score: u8,
    pub player1_score: u8,
    pub player0_cards: u8,
    pub player1_cards: u8,
    pub actions: usize,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        let cards = |p: usize| {
            metrics
                .player_metrics
                .get(p)
                .map(|m| m.breakdown.cards)
                .unwrap_or(0)
        };
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            winner: metrics.result.winner,
            player0_score: metrics.result.final_scores[0],
            player1_score: metrics.result.final_scores[1],
            player0_cards: cards(0),
            player1_cards: cards(1),
            actions: metrics.result.actions,
        }
    }
}
