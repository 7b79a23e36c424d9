//! Contexto del pipeline y actualizaciones parciales.
//!
//! Rol en el pipeline:
//! - `PipelineContext` es el acumulador que viaja entre etapas. Es inmutable
//!   hacia afuera: las etapas lo leen por referencia y devuelven un
//!   `ContextUpdate`.
//! - `apply` consume el contexto y produce el sucesor fusionado. Un campo
//!   `Some` en la actualización sobrescribe; un `None` conserva lo que había.
//!   No existe forma de borrar un campo ya poblado.
//! - El estado reportado es obligatorio en cada actualización; es la única
//!   señal que consulta el router.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use fin_domain::{Allocation, MarketSnapshot, ProductSelection, ProjectedReturns, RiskTier,
                 SavingsSplit, UserProfile};

use crate::status::StageStatus;

/// Acumulador tipado del pipeline. Se crea sembrado con el `user_id` y cada
/// etapa aporta campos vía `apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineContext {
    user_id: i64,
    status: Option<StageStatus>,
    user_profile: Option<UserProfile>,
    missing_fields: Option<Vec<String>>,
    savings: Option<SavingsSplit>,
    market_data: Option<MarketSnapshot>,
    processed_market_data: Option<MarketSnapshot>,
    risk_profile: Option<RiskTier>,
    time_horizon_years: Option<i32>,
    allocation: Option<Allocation>,
    allocation_description: Option<String>,
    selection: Option<ProductSelection>,
    projected_returns: Option<ProjectedReturns>,
    recommendation: Option<Value>,
    error: Option<String>,
}

impl PipelineContext {
    /// Contexto inicial de una corrida: sólo el usuario, sin estado reportado.
    pub fn seeded(user_id: i64) -> Self {
        PipelineContext { user_id,
                          status: None,
                          user_profile: None,
                          missing_fields: None,
                          savings: None,
                          market_data: None,
                          processed_market_data: None,
                          risk_profile: None,
                          time_horizon_years: None,
                          allocation: None,
                          allocation_description: None,
                          selection: None,
                          projected_returns: None,
                          recommendation: None,
                          error: None }
    }

    /// Fusiona una actualización parcial produciendo el contexto sucesor.
    pub fn apply(self, update: ContextUpdate) -> PipelineContext {
        PipelineContext { user_id: self.user_id,
                          status: Some(update.status),
                          user_profile: update.user_profile.or(self.user_profile),
                          missing_fields: update.missing_fields.or(self.missing_fields),
                          savings: update.savings.or(self.savings),
                          market_data: update.market_data.or(self.market_data),
                          processed_market_data: update.processed_market_data
                                                       .or(self.processed_market_data),
                          risk_profile: update.risk_profile.or(self.risk_profile),
                          time_horizon_years: update.time_horizon_years.or(self.time_horizon_years),
                          allocation: update.allocation.or(self.allocation),
                          allocation_description: update.allocation_description
                                                        .or(self.allocation_description),
                          selection: update.selection.or(self.selection),
                          projected_returns: update.projected_returns.or(self.projected_returns),
                          recommendation: update.recommendation.or(self.recommendation),
                          error: update.error.or(self.error) }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Último estado reportado; `None` antes de la primera etapa.
    pub fn status(&self) -> Option<StageStatus> {
        self.status
    }

    pub fn user_profile(&self) -> Option<&UserProfile> {
        self.user_profile.as_ref()
    }

    pub fn missing_fields(&self) -> Option<&[String]> {
        self.missing_fields.as_deref()
    }

    pub fn savings(&self) -> Option<&SavingsSplit> {
        self.savings.as_ref()
    }

    pub fn market_data(&self) -> Option<&MarketSnapshot> {
        self.market_data.as_ref()
    }

    pub fn processed_market_data(&self) -> Option<&MarketSnapshot> {
        self.processed_market_data.as_ref()
    }

    pub fn risk_profile(&self) -> Option<RiskTier> {
        self.risk_profile
    }

    pub fn time_horizon_years(&self) -> Option<i32> {
        self.time_horizon_years
    }

    pub fn allocation(&self) -> Option<&Allocation> {
        self.allocation.as_ref()
    }

    pub fn allocation_description(&self) -> Option<&str> {
        self.allocation_description.as_deref()
    }

    pub fn selection(&self) -> Option<&ProductSelection> {
        self.selection.as_ref()
    }

    pub fn projected_returns(&self) -> Option<&ProjectedReturns> {
        self.projected_returns.as_ref()
    }

    pub fn recommendation(&self) -> Option<&Value> {
        self.recommendation.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Actualización parcial devuelta por una etapa. El estado es obligatorio;
/// el resto de campos sólo viaja cuando la etapa los produjo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub status: StageStatus,
    pub user_profile: Option<UserProfile>,
    pub missing_fields: Option<Vec<String>>,
    pub savings: Option<SavingsSplit>,
    pub market_data: Option<MarketSnapshot>,
    pub processed_market_data: Option<MarketSnapshot>,
    pub risk_profile: Option<RiskTier>,
    pub time_horizon_years: Option<i32>,
    pub allocation: Option<Allocation>,
    pub allocation_description: Option<String>,
    pub selection: Option<ProductSelection>,
    pub projected_returns: Option<ProjectedReturns>,
    pub recommendation: Option<Value>,
    pub error: Option<String>,
}

impl ContextUpdate {
    /// Actualización vacía con sólo el estado reportado.
    pub fn status(status: StageStatus) -> Self {
        ContextUpdate { status,
                        user_profile: None,
                        missing_fields: None,
                        savings: None,
                        market_data: None,
                        processed_market_data: None,
                        risk_profile: None,
                        time_horizon_years: None,
                        allocation: None,
                        allocation_description: None,
                        selection: None,
                        projected_returns: None,
                        recommendation: None,
                        error: None }
    }

    /// Actualización de falla: estado `Error` más el diagnóstico legible.
    pub fn error(message: impl Into<String>) -> Self {
        ContextUpdate { error: Some(message.into()),
                        ..ContextUpdate::status(StageStatus::Error) }
    }
}
