//! Test helpers for generating unique test data
//!
//! Unique game ids keep sessions from different tests apart when they share
//! one registry.

use ulid::Ulid;

/// A positive game id that will not collide with other tests.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_game_id;
///
/// let a = unique_game_id();
/// let b = unique_game_id();
/// assert_ne!(a, b);
/// assert!(a > 0);
/// ```
pub fn unique_game_id() -> i64 {
    let bits = (Ulid::new().random() & i64::MAX as u128) as i64;
    bits.max(1)
}
