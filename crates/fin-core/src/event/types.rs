//! Tipos de evento de corrida y estructura `RunEvent`.
//!
//! Rol en el pipeline:
//! - Cada corrida del `PipelineEngine` emite eventos a un `EventStore`
//!   append-only.
//! - Los eventos dejan rastro observable de qué etapa corrió, con qué estado
//!   terminó y cómo cerró la corrida, sin participar en el ruteo.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{StageId, StageStatus};

/// Tipos de evento soportados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Apertura de una corrida. Invariante: primer evento de cada `run_id`.
    RunStarted { user_id: i64 },
    /// Una etapa comenzó su ejecución. No implica éxito.
    StageStarted { stage: StageId },
    /// Una etapa terminó y reportó estado.
    StageFinished { stage: StageId, status: StageStatus },
    /// Cierre de la corrida con su estado terminal.
    RunCompleted { terminal: StageStatus },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el EventStore (orden de append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato, no participa en decisiones
}
