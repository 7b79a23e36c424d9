//! Tabla estática de ruteo (etapa, estado) → siguiente etapa.
//!
//! Cada brazo lista primero sus aristas de éxito; cualquier estado no
//! contemplado cae al manejador de errores. El match externo es exhaustivo
//! sobre `StageId`, así que agregar una etapa obliga a declarar sus rutas.

use crate::status::{StageId, StageStatus};

/// Decisión de ruteo del motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    To(StageId),
    Halt,
}

/// Ruta siguiente para `stage` dado el estado que reportó.
pub fn route(stage: StageId, status: StageStatus) -> Route {
    use StageId::*;
    use StageStatus::*;

    match stage {
        FetchUserProfile => match status {
            Success => Route::To(CheckProfileCompleteness),
            _ => Route::To(HandleError),
        },
        CheckProfileCompleteness => match status {
            ProfileValid => Route::To(FetchMarketData),
            ProfileIncomplete | ProfileInvalid => Route::To(GenerateFallbackRecommendation),
            _ => Route::To(HandleError),
        },
        FetchMarketData => match status {
            MarketDataFetched => Route::To(PreprocessMarketData),
            _ => Route::To(HandleError),
        },
        PreprocessMarketData => match status {
            MarketDataProcessed => Route::To(CalculateEmergencyFund),
            _ => Route::To(HandleError),
        },
        CalculateEmergencyFund => match status {
            EmergencyFundCalculated => Route::To(AnalyzeGoalsAndRisk),
            _ => Route::To(HandleError),
        },
        AnalyzeGoalsAndRisk => match status {
            RiskAnalyzed => Route::To(DefineRiskBasedAllocation),
            _ => Route::To(HandleError),
        },
        DefineRiskBasedAllocation => match status {
            AllocationDefined => Route::To(SelectInvestmentProducts),
            _ => Route::To(HandleError),
        },
        SelectInvestmentProducts => match status {
            ProductsSelected => Route::To(CalculateReturns),
            _ => Route::To(HandleError),
        },
        CalculateReturns => match status {
            ReturnsCalculated => Route::To(GenerateFinalRecommendation),
            _ => Route::To(HandleError),
        },
        GenerateFinalRecommendation => match status {
            RecommendationGenerated => Route::To(PersistRecommendation),
            _ => Route::To(HandleError),
        },
        PersistRecommendation => match status {
            RecommendationSaved => Route::Halt,
            _ => Route::To(HandleError),
        },
        GenerateFallbackRecommendation => match status {
            CompletedWithFallback => Route::Halt,
            _ => Route::To(HandleError),
        },
        // Sumidero terminal: pase lo que pase, la corrida cierra aquí.
        HandleError => Route::Halt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StageId::*;
    use StageStatus::*;

    #[test]
    fn test_happy_path_chain() {
        assert_eq!(route(FetchUserProfile, Success), Route::To(CheckProfileCompleteness));
        assert_eq!(route(CheckProfileCompleteness, ProfileValid), Route::To(FetchMarketData));
        assert_eq!(route(FetchMarketData, MarketDataFetched), Route::To(PreprocessMarketData));
        assert_eq!(route(PreprocessMarketData, MarketDataProcessed),
                   Route::To(CalculateEmergencyFund));
        assert_eq!(route(CalculateEmergencyFund, EmergencyFundCalculated),
                   Route::To(AnalyzeGoalsAndRisk));
        assert_eq!(route(AnalyzeGoalsAndRisk, RiskAnalyzed), Route::To(DefineRiskBasedAllocation));
        assert_eq!(route(DefineRiskBasedAllocation, AllocationDefined),
                   Route::To(SelectInvestmentProducts));
        assert_eq!(route(SelectInvestmentProducts, ProductsSelected), Route::To(CalculateReturns));
        assert_eq!(route(CalculateReturns, ReturnsCalculated),
                   Route::To(GenerateFinalRecommendation));
        assert_eq!(route(GenerateFinalRecommendation, RecommendationGenerated),
                   Route::To(PersistRecommendation));
        assert_eq!(route(PersistRecommendation, RecommendationSaved), Route::Halt);
    }

    #[test]
    fn test_incomplete_and_invalid_profiles_go_to_fallback() {
        assert_eq!(route(CheckProfileCompleteness, ProfileIncomplete),
                   Route::To(GenerateFallbackRecommendation));
        assert_eq!(route(CheckProfileCompleteness, ProfileInvalid),
                   Route::To(GenerateFallbackRecommendation));
        assert_eq!(route(GenerateFallbackRecommendation, CompletedWithFallback), Route::Halt);
    }

    #[test]
    fn test_unmatched_statuses_fall_to_handle_error() {
        // Un estado ajeno al vocabulario de la etapa siempre desvía a
        // manejo de errores, nunca truena.
        for stage in StageId::pipeline_order() {
            if stage == HandleError {
                continue;
            }
            assert_eq!(route(stage, Error), Route::To(HandleError), "{stage}");
        }
        assert_eq!(route(FetchUserProfile, RecommendationSaved), Route::To(HandleError));
        assert_eq!(route(CalculateReturns, ProfileValid), Route::To(HandleError));
    }

    #[test]
    fn test_handle_error_always_halts() {
        assert_eq!(route(HandleError, ErrorHandled), Route::Halt);
        assert_eq!(route(HandleError, Error), Route::Halt);
        assert_eq!(route(HandleError, Success), Route::Halt);
    }
}
