//! Game flow service: the only path through which live sessions change.
//!
//! Every mutation runs against a clone of the session's state while holding
//! the session lock; the clone replaces the stored state only on success.

mod mutation;
mod player_actions;
mod round_lifecycle;

/// Stateless game flow service; shared resources live in `AppState`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameFlowService;

pub use mutation::GameFlowMutationResult;
pub use round_lifecycle::GameSummary;
