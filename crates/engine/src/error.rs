//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`IdentifierConflict`] thrown when a new record already carries an id.
//! - [`IdentifierMismatch`] thrown when the path id and the body id disagree.
//! - [`BadRequest`] thrown when a request is malformed (e.g. a null body id).
//! - [`MalformedId`] thrown when a body id is present but not an integer.
//! - [`Validation`] thrown when a required field is missing or null.
//! - [`KeyNotFound`] thrown when no record exists for an id.
//! - [`MethodNotAllowed`] thrown when a mutation has no path id at all.
//!
//!  [`IdentifierConflict`]: EngineError::IdentifierConflict
//!  [`IdentifierMismatch`]: EngineError::IdentifierMismatch
//!  [`BadRequest`]: EngineError::BadRequest
//!  [`MalformedId`]: EngineError::MalformedId
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`MethodNotAllowed`]: EngineError::MethodNotAllowed
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("A new {0} cannot already have an id")]
    IdentifierConflict(String),
    #[error("Invalid id: {0}")]
    IdentifierMismatch(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Malformed id: {0}")]
    MalformedId(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Short, stable key identifying the failure class on the wire.
    #[must_use]
    pub fn error_key(&self) -> &'static str {
        match self {
            Self::IdentifierConflict(_) => "idexists",
            Self::IdentifierMismatch(_) => "idinvalid",
            Self::BadRequest(_) => "idnull",
            Self::MalformedId(_) => "idmalformed",
            Self::Validation(_) => "validation",
            Self::KeyNotFound(_) => "idnotfound",
            Self::MethodNotAllowed(_) => "methodnotallowed",
            Self::Database(_) => "internal",
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IdentifierConflict(a), Self::IdentifierConflict(b)) => a == b,
            (Self::IdentifierMismatch(a), Self::IdentifierMismatch(b)) => a == b,
            (Self::BadRequest(a), Self::BadRequest(b)) => a == b,
            (Self::MalformedId(a), Self::MalformedId(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::MethodNotAllowed(a), Self::MethodNotAllowed(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
