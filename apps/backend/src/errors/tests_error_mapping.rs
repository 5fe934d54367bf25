// Unit tests for error mapping - pure domain logic without transport dependencies
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_kinds() {
    let de = DomainError::validation(ValidationKind::AmbiguousCapture, "two sevens");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::AmbiguousCapture);
    assert!(matches!(app, AppError::Validation { .. }));

    let other = DomainError::validation_other("odd");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_conflicts() {
    let stack = DomainError::conflict(ConflictKind::StackLimitExceeded, "one stack");
    let app: AppError = stack.into();
    assert_eq!(app.code().as_str(), "STACK_LIMIT_EXCEEDED");
    assert!(matches!(app, AppError::Conflict { .. }));

    let owner = DomainError::conflict(ConflictKind::OwnershipViolation, "not yours");
    let app: AppError = owner.into();
    assert_eq!(app.code().as_str(), "OWNERSHIP_VIOLATION");

    // Generic conflict fallback
    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::MalformedTarget, "no stack 9");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "MALFORMED_TARGET");
    assert!(app.requires_resync());

    let game = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = game.into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
    assert!(!app.requires_resync());
}

#[test]
fn detail_survives_conversion() {
    let de = DomainError::validation(ValidationKind::OutOfTurn, "player 1 acted on turn 0");
    let app: AppError = de.into();
    assert_eq!(app.detail(), "player 1 acted on turn 0");
    let problem = app.problem();
    assert_eq!(problem.code, ErrorCode::OutOfTurn);
}
