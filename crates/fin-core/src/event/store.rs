use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use super::{RunEvent, RunEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts).
    fn append_kind(&mut self, run_id: Uuid, kind: RunEventKind) -> RunEvent;
    /// Lista eventos de una corrida (orden ascendente por seq).
    fn list(&self, run_id: Uuid) -> Vec<RunEvent>;
}

pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<RunEvent>>,
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self { inner: HashMap::new() }
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, run_id: Uuid, kind: RunEventKind) -> RunEvent {
        let vec = self.inner.entry(run_id).or_insert_with(Vec::new);
        let seq = vec.len() as u64;
        let ev = RunEvent { seq, run_id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, run_id: Uuid) -> Vec<RunEvent> {
        self.inner.get(&run_id).cloned().unwrap_or_default()
    }
}
