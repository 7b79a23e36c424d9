//! Etapas de perfil: obtención y validación de completitud.
//!
//! - `FetchUserProfileStage` consulta al colaborador de usuarios; cualquier
//!   falla (incluido el usuario inexistente) viaja como `error` en el
//!   contexto, nunca como pánico.
//! - `CheckProfileCompletenessStage` separa las tres salidas de validación:
//!   perfil completo, incompleto (campos faltantes) o inválido (numéricos
//!   defectuosos). La completitud revisa presencia, no pertenencia: una
//!   tolerancia desconocida pasa y se degrada más adelante.

use std::sync::Arc;

use log::debug;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::{RiskTier, SavingsSplit};
use fin_providers::UserProfileProvider;

/// Primera etapa del pipeline: trae el perfil del usuario sembrado.
pub struct FetchUserProfileStage {
    profiles: Arc<dyn UserProfileProvider>,
}

impl FetchUserProfileStage {
    pub fn new(profiles: Arc<dyn UserProfileProvider>) -> Self {
        FetchUserProfileStage { profiles }
    }
}

impl StageDefinition for FetchUserProfileStage {
    fn id(&self) -> StageId {
        StageId::FetchUserProfile
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] fetch_user_profile user_id={}", ctx.user_id());
        match self.profiles.fetch(ctx.user_id()) {
            Ok(profile) => ContextUpdate { user_profile: Some(profile),
                                           ..ContextUpdate::status(StageStatus::Success) },
            Err(err) => ContextUpdate::error(err.to_string()),
        }
    }
}

/// Valida el perfil y lo deja normalizado para el resto de la corrida.
pub struct CheckProfileCompletenessStage;

impl StageDefinition for CheckProfileCompletenessStage {
    fn id(&self) -> StageId {
        StageId::CheckProfileCompleteness
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] check_profile_completeness user_id={}", ctx.user_id());
        let profile = match ctx.user_profile() {
            Some(profile) => profile,
            None => return ContextUpdate::error("No user profile available in context"),
        };

        let missing = profile.missing_required_fields();
        if !missing.is_empty() {
            let fields: Vec<String> = missing.iter().map(|f| f.to_string()).collect();
            debug!("[stages] perfil incompleto, faltan: {}", fields.join(", "));
            return ContextUpdate { missing_fields: Some(fields),
                                   ..ContextUpdate::status(StageStatus::ProfileIncomplete) };
        }

        if let Some(defect) = profile.numeric_defect() {
            return ContextUpdate { error: Some(defect.to_string()),
                                   ..ContextUpdate::status(StageStatus::ProfileInvalid) };
        }

        let mut normalized = profile.clone();
        if let Some(tier) = profile.risk_appetite.as_deref().and_then(RiskTier::from_input) {
            normalized.risk_appetite = Some(tier.canonical().to_string());
        }
        normalized.financial_goals = Some(profile.goals_or_default());

        // El ahorro derivado sólo se siembra con disponible positivo; el caso
        // contrario lo reporta la etapa de fondo de emergencia.
        let savings = match (normalized.monthly_income, normalized.monthly_expenses) {
            (Some(income), Some(expenses)) => SavingsSplit::from_monthly(income, expenses).ok(),
            _ => None,
        };

        ContextUpdate { user_profile: Some(normalized),
                        savings,
                        ..ContextUpdate::status(StageStatus::ProfileValid) }
    }
}
