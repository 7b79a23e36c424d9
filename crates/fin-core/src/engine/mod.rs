//! Módulo del motor.
//!
//! Expone `PipelineEngine` junto con los tipos que un consumidor necesita
//! para registrar etapas y observar corridas.

pub mod core;

pub use self::core::{PipelineEngine, RunOutcome};

pub use crate::context::{ContextUpdate, PipelineContext};
pub use crate::event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use crate::stage::StageDefinition;
pub use crate::status::{StageId, StageStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use serde_json::json;

    // Etapa guionada: reporta siempre el mismo estado.
    struct ScriptedStage {
        id: StageId,
        status: StageStatus,
    }

    impl StageDefinition for ScriptedStage {
        fn id(&self) -> StageId {
            self.id
        }
        fn run(&self, _ctx: &PipelineContext) -> ContextUpdate {
            ContextUpdate::status(self.status)
        }
    }

    // Etapa guionada que además deja un payload de recomendación.
    struct PayloadStage {
        id: StageId,
        status: StageStatus,
        payload: serde_json::Value,
    }

    impl StageDefinition for PayloadStage {
        fn id(&self) -> StageId {
            self.id
        }
        fn run(&self, _ctx: &PipelineContext) -> ContextUpdate {
            ContextUpdate { recommendation: Some(self.payload.clone()),
                            ..ContextUpdate::status(self.status) }
        }
    }

    // Sumidero de errores de prueba: envuelve el diagnóstico del contexto.
    struct WrapErrorStage;

    impl StageDefinition for WrapErrorStage {
        fn id(&self) -> StageId {
            StageId::HandleError
        }
        fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
            let message = ctx.error().unwrap_or("An unknown error occurred").to_string();
            ContextUpdate { recommendation: Some(json!({"status": "error", "message": message})),
                            ..ContextUpdate::status(StageStatus::ErrorHandled) }
        }
    }

    fn scripted(id: StageId, status: StageStatus) -> Box<dyn StageDefinition> {
        Box::new(ScriptedStage { id, status })
    }

    fn happy_engine() -> PipelineEngine<InMemoryEventStore> {
        let mut engine = PipelineEngine::new();
        let steps: Vec<Box<dyn StageDefinition>> = vec![
            scripted(StageId::FetchUserProfile, StageStatus::Success),
            scripted(StageId::CheckProfileCompleteness, StageStatus::ProfileValid),
            scripted(StageId::FetchMarketData, StageStatus::MarketDataFetched),
            scripted(StageId::PreprocessMarketData, StageStatus::MarketDataProcessed),
            scripted(StageId::CalculateEmergencyFund, StageStatus::EmergencyFundCalculated),
            scripted(StageId::AnalyzeGoalsAndRisk, StageStatus::RiskAnalyzed),
            scripted(StageId::DefineRiskBasedAllocation, StageStatus::AllocationDefined),
            scripted(StageId::SelectInvestmentProducts, StageStatus::ProductsSelected),
            scripted(StageId::CalculateReturns, StageStatus::ReturnsCalculated),
            Box::new(PayloadStage { id: StageId::GenerateFinalRecommendation,
                                    status: StageStatus::RecommendationGenerated,
                                    payload: json!({"status": "success"}) }),
            scripted(StageId::PersistRecommendation, StageStatus::RecommendationSaved),
            scripted(StageId::GenerateFallbackRecommendation, StageStatus::CompletedWithFallback),
            Box::new(WrapErrorStage),
        ];
        for step in steps {
            engine.register(step).expect("registro sin duplicados");
        }
        engine
    }

    #[test]
    fn test_engine_runs_scripted_happy_path() {
        let mut engine = happy_engine();
        let outcome = engine.run(16).expect("corrida completa");
        assert_eq!(outcome.terminal, StageStatus::RecommendationSaved);
        assert_eq!(outcome.payload, json!({"status": "success"}));
        assert_eq!(outcome.hops, 11);

        let variants = engine.event_variants(outcome.run_id);
        assert_eq!(variants.first(), Some(&"I"));
        assert_eq!(variants.last(), Some(&"C"));
        // 1 apertura + 11 pares started/finished + 1 cierre.
        assert_eq!(variants.len(), 24);
    }

    // Etapa que falla siempre con el mismo diagnóstico.
    struct FailingStage {
        id: StageId,
        message: &'static str,
    }

    impl StageDefinition for FailingStage {
        fn id(&self) -> StageId {
            self.id
        }
        fn run(&self, _ctx: &PipelineContext) -> ContextUpdate {
            ContextUpdate::error(self.message)
        }
    }

    #[test]
    fn test_engine_routes_error_to_handler() {
        let mut broken = PipelineEngine::new();
        broken.register(Box::new(FailingStage { id: StageId::FetchUserProfile,
                                                message: "boom" }))
              .expect("registro");
        broken.register(Box::new(WrapErrorStage)).expect("registro");

        let outcome = broken.run(99).expect("corrida con error manejado");
        assert_eq!(outcome.terminal, StageStatus::ErrorHandled);
        assert_eq!(outcome.hops, 2);
        assert_eq!(outcome.payload["message"], "boom");

        // El motor sano nunca pasa por el sumidero en el camino feliz.
        let mut engine = happy_engine();
        let happy = engine.run(1).expect("corrida feliz");
        assert_eq!(happy.terminal, StageStatus::RecommendationSaved);
    }

    #[test]
    fn test_engine_reports_unknown_stage() {
        let mut engine = PipelineEngine::new();
        engine.register(scripted(StageId::FetchUserProfile, StageStatus::Success))
              .expect("registro");
        let err = engine.run(1).unwrap_err();
        assert_eq!(err, EngineError::UnknownStage(StageId::CheckProfileCompleteness));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut engine = PipelineEngine::new();
        engine.register(scripted(StageId::FetchUserProfile, StageStatus::Success))
              .expect("primer registro");
        let err = engine.register(scripted(StageId::FetchUserProfile, StageStatus::Error))
                        .unwrap_err();
        assert_eq!(err, EngineError::DuplicateStage(StageId::FetchUserProfile));
    }

    #[test]
    fn test_missing_recommendation_payload_guard() {
        // Cadena completa sin que nadie deje payload: el motor responde con
        // un payload de error explícito en vez de truena.
        let mut engine = PipelineEngine::new();
        let steps: Vec<Box<dyn StageDefinition>> = vec![
            scripted(StageId::FetchUserProfile, StageStatus::Success),
            scripted(StageId::CheckProfileCompleteness, StageStatus::ProfileValid),
            scripted(StageId::FetchMarketData, StageStatus::MarketDataFetched),
            scripted(StageId::PreprocessMarketData, StageStatus::MarketDataProcessed),
            scripted(StageId::CalculateEmergencyFund, StageStatus::EmergencyFundCalculated),
            scripted(StageId::AnalyzeGoalsAndRisk, StageStatus::RiskAnalyzed),
            scripted(StageId::DefineRiskBasedAllocation, StageStatus::AllocationDefined),
            scripted(StageId::SelectInvestmentProducts, StageStatus::ProductsSelected),
            scripted(StageId::CalculateReturns, StageStatus::ReturnsCalculated),
            scripted(StageId::GenerateFinalRecommendation, StageStatus::RecommendationGenerated),
            scripted(StageId::PersistRecommendation, StageStatus::RecommendationSaved),
        ];
        for step in steps {
            engine.register(step).expect("registro");
        }

        let outcome = engine.run(7).expect("corrida completa");
        assert_eq!(outcome.terminal, StageStatus::RecommendationSaved);
        assert_eq!(outcome.payload["status"], "error");
        assert_eq!(outcome.payload["message"], "Pipeline finished without producing a recommendation");
    }

    #[test]
    fn test_registered_preserves_order() {
        let engine = happy_engine();
        let order = engine.registered();
        assert_eq!(order.len(), 13);
        assert_eq!(order[0], StageId::FetchUserProfile);
        assert_eq!(order[12], StageId::HandleError);
    }
}
