// errors.rs
use thiserror::Error;

/// Error del dominio financiero. Las variantes de validación llevan el
/// mensaje tal como debe verlo el usuario final, sin prefijos.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Error de serialización: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}
