//! RNG seed derivation utilities for deterministic game behavior.

/// Derive the shuffle seed for a game.
///
/// The same base seed and game id always produce the same deck, which keeps
/// replays and simulator runs reproducible.
pub fn derive_dealing_seed(game_seed: u64, game_id: i64) -> u64 {
    // Cast i64 to u64 for RNG (sign doesn't matter for seed)
    game_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((game_id as u64).wrapping_mul(1_000_003))
        .wrapping_add(2)
}
