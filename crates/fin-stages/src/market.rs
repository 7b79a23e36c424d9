//! Etapas de mercado: obtención del universo y filtrado por tolerancia.

use std::sync::Arc;

use log::debug;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::RiskTier;
use fin_providers::MarketDataProvider;

/// Trae el snapshot del universo de instrumentos.
pub struct FetchMarketDataStage {
    market: Arc<dyn MarketDataProvider>,
}

impl FetchMarketDataStage {
    pub fn new(market: Arc<dyn MarketDataProvider>) -> Self {
        FetchMarketDataStage { market }
    }
}

impl StageDefinition for FetchMarketDataStage {
    fn id(&self) -> StageId {
        StageId::FetchMarketData
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] fetch_market_data user_id={}", ctx.user_id());
        match self.market.fetch() {
            Ok(snapshot) => ContextUpdate { market_data: Some(snapshot),
                                            ..ContextUpdate::status(StageStatus::MarketDataFetched) },
            Err(err) => ContextUpdate::error(err.to_string()),
        }
    }
}

/// Filtra el universo según la tolerancia declarada en el perfil. La
/// conversión a nivel cerrado aquí es silenciosa; la advertencia por valores
/// desconocidos pertenece al análisis de riesgo.
pub struct PreprocessMarketDataStage;

impl StageDefinition for PreprocessMarketDataStage {
    fn id(&self) -> StageId {
        StageId::PreprocessMarketData
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] preprocess_market_data user_id={}", ctx.user_id());
        let market = match ctx.market_data() {
            Some(market) => market,
            None => return ContextUpdate::error("No market data available for processing"),
        };
        let tier = ctx.user_profile()
                      .and_then(|p| p.risk_appetite.as_deref())
                      .and_then(RiskTier::from_input)
                      .unwrap_or(RiskTier::Medium);
        ContextUpdate { processed_market_data: Some(market.filtered_for(tier)),
                        ..ContextUpdate::status(StageStatus::MarketDataProcessed) }
    }
}
