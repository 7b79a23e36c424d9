//! Armado del pipeline completo.
//!
//! Registra las trece etapas en el orden de ejecución nominal y deja el motor
//! listo para correr. Los colaboradores llegan como `Arc<dyn Trait>` para que
//! un mismo juego de providers sirva a varios motores.

use std::sync::Arc;

use fin_core::{EngineError, EventStore, InMemoryEventStore, PipelineEngine};
use fin_providers::{MarketDataProvider, NarrativeProvider, RecommendationStore,
                    UserProfileProvider};

use crate::fallback::{GenerateFallbackRecommendationStage, HandleErrorStage};
use crate::market::{FetchMarketDataStage, PreprocessMarketDataStage};
use crate::persist::PersistRecommendationStage;
use crate::products::SelectInvestmentProductsStage;
use crate::profile::{CheckProfileCompletenessStage, FetchUserProfileStage};
use crate::report::GenerateFinalRecommendationStage;
use crate::returns::CalculateReturnsStage;
use crate::risk::{AnalyzeGoalsAndRiskStage, DefineRiskBasedAllocationStage};
use crate::savings::CalculateEmergencyFundStage;

/// Juego de colaboradores que alimenta una corrida. El narrativo es opcional;
/// sin él la selección queda puramente determinista.
pub struct PipelineHandles {
    pub profiles: Arc<dyn UserProfileProvider>,
    pub market: Arc<dyn MarketDataProvider>,
    pub store: Arc<dyn RecommendationStore>,
    pub narrative: Option<Arc<dyn NarrativeProvider>>,
}

/// Motor con las trece etapas y eventos en memoria.
pub fn build_pipeline(handles: PipelineHandles)
                      -> Result<PipelineEngine<InMemoryEventStore>, EngineError> {
    build_pipeline_with_events(handles, InMemoryEventStore::default())
}

/// Variante genérica sobre el almacenamiento de eventos.
pub fn build_pipeline_with_events<E: EventStore>(handles: PipelineHandles,
                                                 events: E)
                                                 -> Result<PipelineEngine<E>, EngineError> {
    let select = match handles.narrative {
        Some(narrative) => SelectInvestmentProductsStage::with_narrative(narrative),
        None => SelectInvestmentProductsStage::new(),
    };

    let mut engine = PipelineEngine::with_store(events);
    engine.register(Box::new(FetchUserProfileStage::new(handles.profiles)))?;
    engine.register(Box::new(CheckProfileCompletenessStage))?;
    engine.register(Box::new(FetchMarketDataStage::new(handles.market)))?;
    engine.register(Box::new(PreprocessMarketDataStage))?;
    engine.register(Box::new(CalculateEmergencyFundStage))?;
    engine.register(Box::new(AnalyzeGoalsAndRiskStage))?;
    engine.register(Box::new(DefineRiskBasedAllocationStage))?;
    engine.register(Box::new(select))?;
    engine.register(Box::new(CalculateReturnsStage))?;
    engine.register(Box::new(GenerateFinalRecommendationStage))?;
    engine.register(Box::new(PersistRecommendationStage::new(handles.store)))?;
    engine.register(Box::new(GenerateFallbackRecommendationStage))?;
    engine.register(Box::new(HandleErrorStage))?;
    Ok(engine)
}
