use std::sync::Arc;

use crate::config::engine::EngineConfig;
use crate::domain::rule_registry::RuleRegistry;

use super::session_registry::SessionRegistry;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<EngineConfig>,
    /// Live games, keyed by game id
    pub sessions: Arc<SessionRegistry>,
    /// Rule table every determination runs against
    pub rules: Arc<RuleRegistry>,
}

impl AppState {
    /// Create a new AppState with the standard rule table
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rules(config, RuleRegistry::standard())
    }

    pub fn with_rules(config: EngineConfig, rules: RuleRegistry) -> Self {
        let sessions = SessionRegistry::new(config.max_sessions);
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            rules: Arc::new(rules),
        }
    }

    /// Create a test AppState with default configuration
    pub fn for_tests() -> Self {
        Self::new(EngineConfig::default())
    }
}
