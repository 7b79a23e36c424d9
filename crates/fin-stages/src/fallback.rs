//! Etapas terminales de recuperación: consejo mínimo y sumidero de errores.
//!
//! Ninguna de las dos falla; ambas convierten el estado acumulado en un
//! payload estructurado que el caller puede mostrar tal cual.

use log::debug;
use serde_json::json;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};

/// Consejo mínimo cuando el perfil no alcanzó para personalizar: qué falta o
/// por qué es inválido, más las acciones sugeridas fijas.
pub struct GenerateFallbackRecommendationStage;

impl StageDefinition for GenerateFallbackRecommendationStage {
    fn id(&self) -> StageId {
        StageId::GenerateFallbackRecommendation
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] generate_fallback_recommendation user_id={}", ctx.user_id());
        let message = match ctx.missing_fields() {
            Some(fields) if !fields.is_empty() => {
                format!("Please provide the following information: {}.", fields.join(", "))
            }
            _ => match ctx.error() {
                Some(reason) => reason.to_string(),
                None => "Please complete your profile to get personalized recommendations."
                    .to_string(),
            },
        };
        let payload = json!({
            "status": "fallback",
            "message": message,
            "suggested_actions": [
                "Update your financial information",
                "Set clear investment goals",
                "Complete your risk assessment",
            ],
        });
        ContextUpdate { recommendation: Some(payload),
                        ..ContextUpdate::status(StageStatus::CompletedWithFallback) }
    }
}

/// Sumidero terminal: envuelve el diagnóstico acumulado en un payload de
/// falla apto para el usuario.
pub struct HandleErrorStage;

impl StageDefinition for HandleErrorStage {
    fn id(&self) -> StageId {
        StageId::HandleError
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        let message = ctx.error().unwrap_or("An unknown error occurred");
        debug!("[stages] handle_error user_id={} mensaje={message}", ctx.user_id());
        let payload = json!({
            "status": "error",
            "message": message,
            "suggested_actions": [
                "Please try again later",
                "Contact support if the issue persists",
            ],
        });
        ContextUpdate { recommendation: Some(payload),
                        ..ContextUpdate::status(StageStatus::ErrorHandled) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_lists_missing_fields() {
        let ctx = PipelineContext::seeded(2)
            .apply(ContextUpdate { missing_fields: Some(vec!["risk_appetite".to_string()]),
                                   ..ContextUpdate::status(StageStatus::ProfileIncomplete) });
        let update = GenerateFallbackRecommendationStage.run(&ctx);
        assert_eq!(update.status, StageStatus::CompletedWithFallback);
        let payload = update.recommendation.expect("payload");
        assert_eq!(payload["status"], "fallback");
        assert_eq!(payload["message"],
                   "Please provide the following information: risk_appetite.");
        assert_eq!(payload["suggested_actions"][2], "Complete your risk assessment");
    }

    #[test]
    fn test_fallback_uses_invalidity_reason() {
        let ctx = PipelineContext::seeded(2)
            .apply(ContextUpdate { error: Some("Invalid profile data: monthly_income must be a non-negative number".to_string()),
                                   ..ContextUpdate::status(StageStatus::ProfileInvalid) });
        let update = GenerateFallbackRecommendationStage.run(&ctx);
        let payload = update.recommendation.expect("payload");
        assert_eq!(payload["message"],
                   "Invalid profile data: monthly_income must be a non-negative number");
    }

    #[test]
    fn test_fallback_default_message_without_details() {
        let update = GenerateFallbackRecommendationStage.run(&PipelineContext::seeded(2));
        let payload = update.recommendation.expect("payload");
        assert_eq!(payload["message"],
                   "Please complete your profile to get personalized recommendations.");
    }

    #[test]
    fn test_handle_error_wraps_accumulated_diagnostic() {
        let ctx = PipelineContext::seeded(3).apply(ContextUpdate::error("Market data unavailable"));
        let update = HandleErrorStage.run(&ctx);
        assert_eq!(update.status, StageStatus::ErrorHandled);
        let payload = update.recommendation.expect("payload");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["message"], "Market data unavailable");
        assert_eq!(payload["suggested_actions"][0], "Please try again later");
    }

    #[test]
    fn test_handle_error_without_diagnostic_uses_unknown() {
        let update = HandleErrorStage.run(&PipelineContext::seeded(3));
        let payload = update.recommendation.expect("payload");
        assert_eq!(payload["message"], "An unknown error occurred");
    }
}
