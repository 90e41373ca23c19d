//! The module contains the errors the engine can return.
//!
//! Access and CRUD failures are fatal for the single operation that raised
//! them; a malformed reference inside stored data is not an error at all and
//! is tolerated by the read pipeline (missing lookups resolve to "Unknown").

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("cannot remove the last admin: {0}")]
    LastAdmin(String),
    #[error("\"{0}\" is still referenced!")]
    InUse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unauthenticated, Self::Unauthenticated) => true,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::LastAdmin(a), Self::LastAdmin(b)) => a == b,
            (Self::InUse(a), Self::InUse(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.to_string() == b.to_string(),
            (Self::Serde(a), Self::Serde(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
