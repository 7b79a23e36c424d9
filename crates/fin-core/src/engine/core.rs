//! Motor del pipeline: registro ordenado de etapas y corrida de paso único.
//!
//! El motor ejecuta la etapa actual, fusiona la actualización al contexto,
//! consulta el router con el estado reportado y salta a la siguiente etapa
//! hasta que la ruta sea `Halt`. No reintenta nada: una etapa con fallas
//! transitorias resuelve sus reintentos por dentro.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::HOP_BUDGET_FACTOR;
use crate::context::PipelineContext;
use crate::errors::EngineError;
use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::router::{route, Route};
use crate::stage::StageDefinition;
use crate::status::{StageId, StageStatus};

/// Resultado de una corrida completa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub user_id: i64,
    pub terminal: StageStatus,
    pub payload: Value,
    pub hops: usize,
}

/// Motor genérico sobre el almacenamiento de eventos.
pub struct PipelineEngine<E: EventStore> {
    stages: IndexMap<StageId, Box<dyn StageDefinition>>,
    event_store: E,
    last_run_id: Option<Uuid>,
}

impl PipelineEngine<InMemoryEventStore> {
    /// Motor vacío con store de eventos en memoria.
    pub fn new() -> Self {
        PipelineEngine::with_store(InMemoryEventStore::default())
    }
}

impl Default for PipelineEngine<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventStore> PipelineEngine<E> {
    pub fn with_store(event_store: E) -> Self {
        PipelineEngine { stages: IndexMap::new(),
                         event_store,
                         last_run_id: None }
    }

    /// Registra una etapa. El orden de registro se conserva para reportes.
    ///
    /// # Errores
    /// `EngineError::DuplicateStage` si la identidad ya estaba registrada.
    pub fn register(&mut self, stage: Box<dyn StageDefinition>) -> Result<(), EngineError> {
        let id = stage.id();
        if self.stages.contains_key(&id) {
            return Err(EngineError::DuplicateStage(id));
        }
        self.stages.insert(id, stage);
        Ok(())
    }

    /// Identidades registradas en orden de registro.
    pub fn registered(&self) -> Vec<StageId> {
        self.stages.keys().copied().collect()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Corre el pipeline completo para un usuario.
    ///
    /// Siembra el contexto con `user_id`, entra por `FetchUserProfile` y
    /// avanza según el router hasta `Halt`. Devuelve el payload de
    /// recomendación del contexto final; si ninguna etapa lo dejó (condición
    /// de bug), devuelve un payload de error explícito en su lugar.
    pub fn run(&mut self, user_id: i64) -> Result<RunOutcome, EngineError> {
        let run_id = Uuid::new_v4();
        self.last_run_id = Some(run_id);
        self.event_store.append_kind(run_id, RunEventKind::RunStarted { user_id });

        let budget = self.stages.len() * HOP_BUDGET_FACTOR;
        let mut ctx = PipelineContext::seeded(user_id);
        let mut current = StageId::FetchUserProfile;
        let mut hops = 0usize;

        let terminal = loop {
            if hops >= budget {
                return Err(EngineError::HopBudgetExceeded { last: current, hops });
            }
            let stage = self.stages
                            .get(&current)
                            .ok_or(EngineError::UnknownStage(current))?;
            self.event_store.append_kind(run_id, RunEventKind::StageStarted { stage: current });

            let update = stage.run(&ctx);
            let status = update.status;
            self.event_store
                .append_kind(run_id, RunEventKind::StageFinished { stage: current, status });
            ctx = ctx.apply(update);
            hops += 1;

            match route(current, status) {
                Route::To(next) => current = next,
                Route::Halt => break status,
            }
        };

        self.event_store.append_kind(run_id, RunEventKind::RunCompleted { terminal });

        let payload = match ctx.recommendation() {
            Some(value) => value.clone(),
            // Guardia explícita: una corrida terminó sin payload. Es un bug
            // de etapa, no del caller; se reporta como payload de error.
            None => json!({
                "status": "error",
                "message": "Pipeline finished without producing a recommendation",
                "terminal_status": terminal.as_str(),
            }),
        };

        Ok(RunOutcome { run_id, user_id, terminal, payload, hops })
    }

    /// Eventos de una corrida, en orden de append.
    pub fn events_for(&self, run_id: Uuid) -> Vec<RunEvent> {
        self.event_store.list(run_id)
    }

    /// Variante compacta de eventos de una corrida.
    pub fn event_variants(&self, run_id: Uuid) -> Vec<&'static str> {
        self.events_for(run_id)
            .iter()
            .map(|e| match e.kind {
                RunEventKind::RunStarted { .. } => "I",
                RunEventKind::StageStarted { .. } => "S",
                RunEventKind::StageFinished { .. } => "F",
                RunEventKind::RunCompleted { .. } => "C",
            })
            .collect()
    }

    /// Identificador de la última corrida lanzada desde este motor.
    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run_id
    }
}
