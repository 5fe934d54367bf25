#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use config::engine::EngineConfig;
pub use error::{AppError, ProblemDetails};
pub use errors::{DomainError, ErrorCode};
pub use services::game_flow::{GameFlowMutationResult, GameFlowService, GameSummary};
pub use state::app_state::AppState;
pub use state::session_registry::{GameId, GameSession, SessionRegistry};
pub use telemetry::{init_tracing, LogFormat};

// Prelude for test convenience
pub mod prelude {
    pub use super::domain::*;
    pub use super::error::*;
    pub use super::services::game_flow::*;
    pub use super::state::app_state::AppState;
    pub use super::state::session_registry::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
