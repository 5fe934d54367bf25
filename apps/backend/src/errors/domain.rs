//! Domain-level error type used across the engine and the game-flow service.
//!
//! This error type is transport- and storage-agnostic. Services return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Validation kinds: the move is not legal in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Nothing in the rule registry matches the interaction.
    NoValidAction,
    /// Duplicate same-rank loose cards block an automatic capture.
    AmbiguousCapture,
    /// A staging stack overflowed its committed build value.
    InvalidBuildOverflow,
    /// Action submitted by a player who is not the current player.
    OutOfTurn,
    /// Strict build validation rejected the requested value.
    InvalidBuild,
    /// The player would not hold a card able to capture the build.
    MissingCaptureCard,
    ParseCard,
    /// The game is not accepting moves (e.g. it has ended).
    PhaseMismatch,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Acting on another player's staging stack.
    OwnershipViolation,
    /// The player already owns a staging stack.
    StackLimitExceeded,
    /// Caller's expected game version is stale.
    OptimisticLock,
    /// Another mutation for the same game is in flight.
    ConcurrentAction,
    Other(String),
}

/// Domain-level not found kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    /// Referenced card, build or stack is not in the current state.
    MalformedTarget,
    Game,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Game rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Shorthand for the most common lookup failure.
    pub fn malformed_target(detail: impl Into<String>) -> Self {
        Self::NotFound(NotFoundKind::MalformedTarget, detail.into())
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d) => d,
        }
    }

    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::NoValidAction => ErrorCode::NoValidAction,
                ValidationKind::AmbiguousCapture => ErrorCode::AmbiguousCapture,
                ValidationKind::InvalidBuildOverflow => ErrorCode::InvalidBuildOverflow,
                ValidationKind::OutOfTurn => ErrorCode::OutOfTurn,
                ValidationKind::InvalidBuild => ErrorCode::InvalidBuild,
                ValidationKind::MissingCaptureCard => ErrorCode::MissingCaptureCard,
                ValidationKind::ParseCard => ErrorCode::ParseCard,
                ValidationKind::PhaseMismatch => ErrorCode::PhaseMismatch,
                ValidationKind::Other(_) => ErrorCode::ValidationError,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::OwnershipViolation => ErrorCode::OwnershipViolation,
                ConflictKind::StackLimitExceeded => ErrorCode::StackLimitExceeded,
                ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                ConflictKind::ConcurrentAction => ErrorCode::ConcurrentAction,
                ConflictKind::Other(_) => ErrorCode::Conflict,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::MalformedTarget => ErrorCode::MalformedTarget,
                NotFoundKind::Game => ErrorCode::GameNotFound,
                NotFoundKind::Other(_) => ErrorCode::NotFound,
            },
        }
    }
}
