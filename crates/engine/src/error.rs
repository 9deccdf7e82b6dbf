//! The module contains the errors the engine can throw.
//!
//! Access errors ([`Unauthenticated`], [`SessionExpired`]) are raised before
//! any store access. [`KeyNotFound`] is used both for missing rows and for
//! rows owned by somebody else, so callers cannot tell whether a row exists.
//!
//!  [`Unauthenticated`]: EngineError::Unauthenticated
//!  [`SessionExpired`]: EngineError::SessionExpired
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("user not found")]
    Unauthenticated,
    #[error("session expired")]
    SessionExpired,
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid type: {0}")]
    InvalidType(String),
    #[error("Invalid sort: {0}")]
    InvalidSort(String),
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),
    #[error("Broken transfer: {0}")]
    BrokenTransfer(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthenticated, Self::Unauthenticated) => true,
            (Self::SessionExpired, Self::SessionExpired) => true,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidType(a), Self::InvalidType(b)) => a == b,
            (Self::InvalidSort(a), Self::InvalidSort(b)) => a == b,
            (Self::InvalidTransfer(a), Self::InvalidTransfer(b)) => a == b,
            (Self::BrokenTransfer(a), Self::BrokenTransfer(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
