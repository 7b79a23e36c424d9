//! Etapa de proyección de retornos anuales.

use log::debug;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::{round2, AssetClass, ProjectedReturns};

/// Aplica la tasa esperada de cada clase al monto que le tocó y deriva el
/// total anual y el ROI sobre la inversión mensual.
pub struct CalculateReturnsStage;

impl StageDefinition for CalculateReturnsStage {
    fn id(&self) -> StageId {
        StageId::CalculateReturns
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] calculate_returns user_id={}", ctx.user_id());
        let monthly_investment = ctx.savings().map(|s| s.monthly_investment()).unwrap_or(0.0);
        let amounts: Vec<(AssetClass, f64)> = match ctx.allocation() {
            Some(allocation) => allocation.entries()
                                          .iter()
                                          .map(|(class, ratio)| {
                                              (*class, round2(ratio * monthly_investment))
                                          })
                                          .collect(),
            None => Vec::new(),
        };
        match ProjectedReturns::over(&amounts, monthly_investment) {
            Ok(projected) => {
                ContextUpdate { projected_returns: Some(projected),
                                ..ContextUpdate::status(StageStatus::ReturnsCalculated) }
            }
            Err(err) => ContextUpdate::error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_domain::{default_allocation, RiskTier, SavingsSplit, UserProfile};

    fn ctx_for_medium() -> PipelineContext {
        let split = SavingsSplit::from_monthly(100_000.0, 60_000.0).expect("partición");
        let (allocation, _) = default_allocation(RiskTier::Medium);
        PipelineContext::seeded(1)
            .apply(ContextUpdate { user_profile: Some(UserProfile::empty(1)),
                                   savings: Some(split),
                                   allocation: Some(allocation),
                                   ..ContextUpdate::status(StageStatus::AllocationDefined) })
    }

    #[test]
    fn test_returns_reference_scenario() {
        let update = CalculateReturnsStage.run(&ctx_for_medium());
        assert_eq!(update.status, StageStatus::ReturnsCalculated);
        let projected = update.projected_returns.expect("proyección");
        assert_eq!(projected.by_class(),
                   &[(AssetClass::Equity, 2_280.0),
                     (AssetClass::FixedIncome, 684.0),
                     (AssetClass::Gold, 0.0),
                     (AssetClass::Cash, 114.0)]);
        assert_eq!(projected.total(), 3_078.0);
        assert_eq!(projected.roi_pct(), 8.1);
    }

    #[test]
    fn test_returns_without_investment_is_error() {
        let update = CalculateReturnsStage.run(&PipelineContext::seeded(3));
        assert_eq!(update.status, StageStatus::Error);
        assert_eq!(update.error.as_deref(),
                   Some("No monthly investment amount available for return calculation"));
    }
}
