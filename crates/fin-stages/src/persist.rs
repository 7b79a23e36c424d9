//! Etapa de persistencia del payload final.

use std::sync::Arc;

use log::debug;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_providers::RecommendationStore;

/// Entrega la recomendación ya armada al almacén configurado.
pub struct PersistRecommendationStage {
    store: Arc<dyn RecommendationStore>,
}

impl PersistRecommendationStage {
    pub fn new(store: Arc<dyn RecommendationStore>) -> Self {
        PersistRecommendationStage { store }
    }
}

impl StageDefinition for PersistRecommendationStage {
    fn id(&self) -> StageId {
        StageId::PersistRecommendation
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] persist_recommendation user_id={}", ctx.user_id());
        let recommendation = match ctx.recommendation() {
            Some(recommendation) => recommendation,
            None => return ContextUpdate::error("No recommendation to save"),
        };
        match self.store.save(ctx.user_id(), recommendation) {
            Ok(()) => ContextUpdate::status(StageStatus::RecommendationSaved),
            Err(err) => ContextUpdate::error(err.to_string()),
        }
    }
}
