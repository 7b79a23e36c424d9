//! Errores específicos del motor (simples por ahora).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::StageId;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EngineError {
    #[error("stage not registered: {0}")] UnknownStage(StageId),
    #[error("stage already registered: {0}")] DuplicateStage(StageId),
    #[error("hop budget exceeded after {hops} hops, last stage {last}")] HopBudgetExceeded { last: StageId, hops: usize },
    #[error("internal: {0}")] Internal(String),
}
