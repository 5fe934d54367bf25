use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;

/// Serializable error body handed to whatever transport wraps the engine.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProblemDetails {
    pub code: ErrorCode,
    pub detail: String,
}

/// Service-level error returned by the game-flow service.
///
/// Domain errors convert into this type via `From<DomainError>`; the
/// remaining variants cover failures that only exist above the domain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Conflict { code, .. } => *code,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::NotFound { detail, .. } => detail.clone(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Whether the client should discard its view of the game and re-fetch.
    ///
    /// Raised for failures that indicate client/server divergence.
    pub fn requires_resync(&self) -> bool {
        matches!(
            self.code(),
            ErrorCode::OptimisticLock
                | ErrorCode::MalformedTarget
                | ErrorCode::InvalidBuild
                | ErrorCode::InvalidBuildOverflow
        )
    }

    pub fn problem(&self) -> ProblemDetails {
        ProblemDetails {
            code: self.code(),
            detail: self.detail(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let code = err.code();
        match err {
            DomainError::Validation(ValidationKind::Other(_), detail) => AppError::Validation {
                code: ErrorCode::ValidationError,
                detail,
            },
            DomainError::Validation(_, detail) => AppError::Validation { code, detail },
            DomainError::Conflict(ConflictKind::Other(_), detail) => AppError::Conflict {
                code: ErrorCode::Conflict,
                detail,
            },
            DomainError::Conflict(_, detail) => AppError::Conflict { code, detail },
            DomainError::NotFound(NotFoundKind::Other(_), detail) => AppError::NotFound {
                code: ErrorCode::NotFound,
                detail,
            },
            DomainError::NotFound(_, detail) => AppError::NotFound { code, detail },
        }
    }
}
