//! Identidades de etapa y vocabulario cerrado de estados.
//!
//! Rol en el pipeline:
//! - `StageId` nombra cada etapa registrable; el router sólo conoce estos
//!   identificadores.
//! - `StageStatus` es la única señal de ruteo. Cada etapa reporta exactamente
//!   un estado por ejecución y el router decide con un match exhaustivo,
//!   nunca comparando cadenas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Etapas del pipeline de recomendación, en el orden canónico de registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    FetchUserProfile,
    CheckProfileCompleteness,
    FetchMarketData,
    PreprocessMarketData,
    CalculateEmergencyFund,
    AnalyzeGoalsAndRisk,
    DefineRiskBasedAllocation,
    SelectInvestmentProducts,
    CalculateReturns,
    GenerateFinalRecommendation,
    PersistRecommendation,
    GenerateFallbackRecommendation,
    HandleError,
}

impl StageId {
    /// Nombre estable en snake_case, usado en logs y eventos.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::FetchUserProfile => "fetch_user_profile",
            StageId::CheckProfileCompleteness => "check_profile_completeness",
            StageId::FetchMarketData => "fetch_market_data",
            StageId::PreprocessMarketData => "preprocess_market_data",
            StageId::CalculateEmergencyFund => "calculate_emergency_fund",
            StageId::AnalyzeGoalsAndRisk => "analyze_goals_and_risk",
            StageId::DefineRiskBasedAllocation => "define_risk_based_allocation",
            StageId::SelectInvestmentProducts => "select_investment_products",
            StageId::CalculateReturns => "calculate_returns",
            StageId::GenerateFinalRecommendation => "generate_final_recommendation",
            StageId::PersistRecommendation => "persist_recommendation",
            StageId::GenerateFallbackRecommendation => "generate_fallback_recommendation",
            StageId::HandleError => "handle_error",
        }
    }

    /// Orden canónico de registro de las trece etapas.
    pub fn pipeline_order() -> [StageId; 13] {
        [StageId::FetchUserProfile,
         StageId::CheckProfileCompleteness,
         StageId::FetchMarketData,
         StageId::PreprocessMarketData,
         StageId::CalculateEmergencyFund,
         StageId::AnalyzeGoalsAndRisk,
         StageId::DefineRiskBasedAllocation,
         StageId::SelectInvestmentProducts,
         StageId::CalculateReturns,
         StageId::GenerateFinalRecommendation,
         StageId::PersistRecommendation,
         StageId::GenerateFallbackRecommendation,
         StageId::HandleError]
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estado reportado por una etapa. El router decide el siguiente salto a
/// partir de este valor y de nada más.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Success,
    Error,
    ProfileValid,
    ProfileIncomplete,
    ProfileInvalid,
    MarketDataFetched,
    MarketDataProcessed,
    EmergencyFundCalculated,
    RiskAnalyzed,
    AllocationDefined,
    ProductsSelected,
    ReturnsCalculated,
    RecommendationGenerated,
    RecommendationSaved,
    CompletedWithFallback,
    ErrorHandled,
}

impl StageStatus {
    /// Etiqueta estable en snake_case, tal como viaja en payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Success => "success",
            StageStatus::Error => "error",
            StageStatus::ProfileValid => "profile_valid",
            StageStatus::ProfileIncomplete => "profile_incomplete",
            StageStatus::ProfileInvalid => "profile_invalid",
            StageStatus::MarketDataFetched => "market_data_fetched",
            StageStatus::MarketDataProcessed => "market_data_processed",
            StageStatus::EmergencyFundCalculated => "emergency_fund_calculated",
            StageStatus::RiskAnalyzed => "risk_analyzed",
            StageStatus::AllocationDefined => "allocation_defined",
            StageStatus::ProductsSelected => "products_selected",
            StageStatus::ReturnsCalculated => "returns_calculated",
            StageStatus::RecommendationGenerated => "recommendation_generated",
            StageStatus::RecommendationSaved => "recommendation_saved",
            StageStatus::CompletedWithFallback => "completed_with_fallback",
            StageStatus::ErrorHandled => "error_handled",
        }
    }

    /// Los tres estados que cierran una corrida.
    pub fn is_terminal(&self) -> bool {
        matches!(self,
                 StageStatus::RecommendationSaved
                 | StageStatus::CompletedWithFallback
                 | StageStatus::ErrorHandled)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
