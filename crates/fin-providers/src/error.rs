// error.rs
use thiserror::Error;

/// Falla de un colaborador externo. Los mensajes de las variantes viajan tal
/// cual al diagnóstico del contexto cuando una etapa los reporta.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No profile found for user_id {0}")]
    ProfileNotFound(i64),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Malformed(String),
}
