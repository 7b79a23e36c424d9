//! Etapas de riesgo: resumen de metas/tolerancia y tabla de asignación.
//!
//! `tier_or_default` es el único punto donde una tolerancia cruda se vuelve
//! nivel cerrado; valores fuera del conjunto degradan a `Medium` con la
//! advertencia registrada en la bitácora.

use log::{debug, warn};

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::{default_allocation, RiskTier};

/// Convierte la tolerancia declarada en un nivel cerrado, degradando a
/// `Medium` cuando falta o no se reconoce.
pub fn tier_or_default(raw: Option<&str>) -> RiskTier {
    match raw {
        Some(value) => match RiskTier::from_input(value) {
            Some(tier) => tier,
            None => {
                let shown = value.trim().to_lowercase();
                warn!("Warning: Invalid risk profile '{shown}'. Using 'medium' as default.");
                RiskTier::Medium
            }
        },
        None => RiskTier::Medium,
    }
}

/// Resume tolerancia y horizonte para el resto de la corrida.
pub struct AnalyzeGoalsAndRiskStage;

impl StageDefinition for AnalyzeGoalsAndRiskStage {
    fn id(&self) -> StageId {
        StageId::AnalyzeGoalsAndRisk
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] analyze_goals_and_risk user_id={}", ctx.user_id());
        let profile = ctx.user_profile();
        let tier = tier_or_default(profile.and_then(|p| p.risk_appetite.as_deref()));
        let horizon = profile.and_then(|p| p.investment_horizon_years).unwrap_or(5);
        ContextUpdate { risk_profile: Some(tier),
                        time_horizon_years: Some(horizon),
                        ..ContextUpdate::status(StageStatus::RiskAnalyzed) }
    }
}

/// Busca la tabla fija de asignación para el nivel de riesgo vigente.
pub struct DefineRiskBasedAllocationStage;

impl StageDefinition for DefineRiskBasedAllocationStage {
    fn id(&self) -> StageId {
        StageId::DefineRiskBasedAllocation
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] define_risk_based_allocation user_id={}", ctx.user_id());
        let tier = match ctx.risk_profile() {
            Some(tier) => tier,
            // Corrida fuera del orden normal: se acepta la tolerancia cruda.
            None => tier_or_default(ctx.user_profile().and_then(|p| p.risk_appetite.as_deref())),
        };
        let (allocation, description) = default_allocation(tier);
        ContextUpdate { allocation: Some(allocation),
                        allocation_description: Some(description.to_string()),
                        ..ContextUpdate::status(StageStatus::AllocationDefined) }
    }
}
