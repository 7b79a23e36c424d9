//! Etapa de fondo de emergencia: partición autoritativa del disponible.

use log::debug;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::SavingsSplit;

/// Recalcula y redondea el 5% de emergencia y el 95% de inversión mensual.
/// Un disponible no positivo corta la corrida con el mensaje que verá el
/// usuario.
pub struct CalculateEmergencyFundStage;

impl StageDefinition for CalculateEmergencyFundStage {
    fn id(&self) -> StageId {
        StageId::CalculateEmergencyFund
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] calculate_emergency_fund user_id={}", ctx.user_id());
        let profile = ctx.user_profile();
        let income = profile.and_then(|p| p.monthly_income).unwrap_or(0.0);
        let expenses = profile.and_then(|p| p.monthly_expenses).unwrap_or(0.0);
        match SavingsSplit::from_monthly(income, expenses) {
            Ok(split) => ContextUpdate { savings: Some(split),
                                         ..ContextUpdate::status(StageStatus::EmergencyFundCalculated) },
            Err(err) => ContextUpdate::error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fin_domain::UserProfile;

    fn ctx_with_amounts(income: f64, expenses: f64) -> PipelineContext {
        let mut profile = UserProfile::empty(1);
        profile.monthly_income = Some(income);
        profile.monthly_expenses = Some(expenses);
        PipelineContext::seeded(1)
            .apply(ContextUpdate { user_profile: Some(profile),
                                   ..ContextUpdate::status(StageStatus::ProfileValid) })
    }

    #[test]
    fn test_emergency_fund_reference_amounts() {
        let update = CalculateEmergencyFundStage.run(&ctx_with_amounts(100_000.0, 60_000.0));
        assert_eq!(update.status, StageStatus::EmergencyFundCalculated);
        let savings = update.savings.expect("partición");
        assert_eq!(savings.emergency_fund(), 2_000.0);
        assert_eq!(savings.monthly_investment(), 38_000.0);
    }

    #[test]
    fn test_emergency_fund_rejects_expenses_over_income() {
        let update = CalculateEmergencyFundStage.run(&ctx_with_amounts(50_000.0, 50_000.0));
        assert_eq!(update.status, StageStatus::Error);
        assert_eq!(update.error.as_deref(), Some("Monthly expenses exceed or equal monthly income"));
    }

    #[test]
    fn test_emergency_fund_without_profile_reports_same_cause() {
        let update = CalculateEmergencyFundStage.run(&PipelineContext::seeded(4));
        assert_eq!(update.status, StageStatus::Error);
        assert_eq!(update.error.as_deref(), Some("Monthly expenses exceed or equal monthly income"));
    }
}
