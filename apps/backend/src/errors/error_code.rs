//! Error codes for the casino engine.
//!
//! This module defines all error codes used throughout the engine.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that callers render or forward to clients.

use core::fmt;

use serde::{Serialize, Serializer};

/// Centralized error codes for the casino engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Move Validation
    /// No rule matches the interaction
    NoValidAction,
    /// Duplicate same-rank loose cards block an auto-capture
    AmbiguousCapture,
    /// Staging stack overflowed its committed build value
    InvalidBuildOverflow,
    /// Action submitted out of turn
    OutOfTurn,
    /// Requested build value failed strict validation
    InvalidBuild,
    /// Player would not hold a card to capture the build
    MissingCaptureCard,
    /// Parse card error
    ParseCard,
    /// Game is not accepting moves
    PhaseMismatch,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// Referenced card, build or stack does not exist
    MalformedTarget,
    /// Game not found
    GameNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Acting on another player's stack
    OwnershipViolation,
    /// Player already owns a staging stack
    StackLimitExceeded,
    /// Stale expected version
    OptimisticLock,
    /// Another mutation for the same game is in flight
    ConcurrentAction,
    /// Session registry is full
    SessionLimit,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Internal error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoValidAction => "NO_VALID_ACTION",
            Self::AmbiguousCapture => "AMBIGUOUS_CAPTURE",
            Self::InvalidBuildOverflow => "INVALID_BUILD_OVERFLOW",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::InvalidBuild => "INVALID_BUILD",
            Self::MissingCaptureCard => "MISSING_CAPTURE_CARD",
            Self::ParseCard => "PARSE_CARD",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::MalformedTarget => "MALFORMED_TARGET",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::OwnershipViolation => "OWNERSHIP_VIOLATION",
            Self::StackLimitExceeded => "STACK_LIMIT_EXCEEDED",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::ConcurrentAction => "CONCURRENT_ACTION",
            Self::SessionLimit => "SESSION_LIMIT",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
