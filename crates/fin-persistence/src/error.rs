//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas de esta capa.
//! La conversión a `ProviderError` existe porque los stores SQLite cumplen
//! los traits de colaborador del pipeline.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use fin_providers::ProviderError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("config error: {0}")]
    Config(String),
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not found")]
    NotFound,
    #[error("database busy (retryable): {0}")]
    Busy(String),
    #[error("transient IO / connection pool error: {0}")]
    TransientIo(String),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(message),
                    DatabaseErrorKind::CheckViolation => Self::CheckViolation(message),
                    DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(message),
                    DatabaseErrorKind::SerializationFailure => Self::Busy(message),
                    // SQLite reporta BUSY/LOCKED como errores genéricos con
                    // mensaje fijo; se detectan por texto.
                    _ if is_locked_message(&message) => Self::Busy(message),
                    other => Self::Unknown(format!("db error kind {:?}: {}", other, message)),
                }
            }
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::SerializationError(e) => Self::Unknown(format!("ser: {e}")),
            DieselError::AlreadyInTransaction => Self::Unknown("already in transaction".into()),
            DieselError::RollbackErrorOnCommit { rollback_error, commit_error } => {
                Self::Unknown(format!("rollback={rollback_error}; commit={commit_error}"))
            }
            DieselError::BrokenTransactionManager => {
                Self::TransientIo("broken transaction manager".into())
            }
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            DieselError::InvalidCString(e) => Self::Unknown(format!("invalid cstring: {e}")),
            DieselError::RollbackTransaction => Self::Unknown("rollback transaction".into()),
            DieselError::NotInTransaction => Self::Unknown("not in transaction".into()),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<PersistenceError> for ProviderError {
    fn from(err: PersistenceError) -> Self {
        ProviderError::Upstream(err.to_string())
    }
}

fn is_locked_message(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("database is locked") || lowered.contains("database table is locked")
}

/// Errores que vale la pena reintentar con backoff.
pub fn is_retryable(err: &PersistenceError) -> bool {
    match err {
        PersistenceError::Busy(_) => true,
        PersistenceError::TransientIo(_) => true,
        PersistenceError::Unknown(msg) => {
            let lowered = msg.to_lowercase();
            lowered.contains("database is locked") || lowered.contains("timeout")
        }
        _ => false,
    }
}
