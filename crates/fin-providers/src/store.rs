//! Colaborador de persistencia de recomendaciones.

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ProviderError;

/// Almacén de payloads de recomendación por usuario. `save` es un insert
/// append-only; `load_latest` devuelve el más reciente o `None`.
pub trait RecommendationStore: Send + Sync {
    fn save(&self, user_id: i64, payload: &Value) -> Result<(), ProviderError>;
    fn load_latest(&self, user_id: i64) -> Result<Option<Value>, ProviderError>;
}

/// Almacén en memoria. Tolera guardados duplicados: siempre gana el último
/// append, igual que la consulta por timestamp del almacén real.
pub struct InMemoryRecommendationStore {
    rows: Mutex<HashMap<i64, Vec<(DateTime<Utc>, Value)>>>,
}

impl InMemoryRecommendationStore {
    pub fn new() -> Self {
        InMemoryRecommendationStore { rows: Mutex::new(HashMap::new()) }
    }

    /// Cantidad de filas guardadas para un usuario.
    pub fn count_for(&self, user_id: i64) -> usize {
        self.rows
            .lock()
            .map(|rows| rows.get(&user_id).map(|v| v.len()).unwrap_or(0))
            .unwrap_or(0)
    }
}

impl Default for InMemoryRecommendationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationStore for InMemoryRecommendationStore {
    fn save(&self, user_id: i64, payload: &Value) -> Result<(), ProviderError> {
        let mut rows = self.rows
                           .lock()
                           .map_err(|_| ProviderError::Upstream("store lock poisoned".to_string()))?;
        rows.entry(user_id).or_insert_with(Vec::new).push((Utc::now(), payload.clone()));
        debug!("[providers] payload guardado user_id={user_id}");
        Ok(())
    }

    fn load_latest(&self, user_id: i64) -> Result<Option<Value>, ProviderError> {
        let rows = self.rows
                       .lock()
                       .map_err(|_| ProviderError::Upstream("store lock poisoned".to_string()))?;
        Ok(rows.get(&user_id).and_then(|v| v.last()).map(|(_, payload)| payload.clone()))
    }
}
