// profile.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Campos obligatorios para emitir una recomendación personalizada, en el
/// orden en que se reportan cuando faltan.
pub const REQUIRED_PROFILE_FIELDS: [&str; 4] =
    ["monthly_income", "monthly_expenses", "risk_appetite", "investment_horizon_years"];

/// Metas financieras asumidas cuando el perfil no declara ninguna.
pub const DEFAULT_FINANCIAL_GOALS: [&str; 2] = ["Wealth accumulation", "Retirement planning"];

/// Tolerancia al riesgo declarada por el usuario, ya normalizada al conjunto
/// cerrado que entienden las tablas de asignación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Interpreta la cadena cruda del perfil sin importar mayúsculas.
    /// `None` para valores fuera del conjunto {low, medium, high}.
    pub fn from_input(raw: &str) -> Option<RiskTier> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(RiskTier::Low),
            "medium" => Some(RiskTier::Medium),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }

    /// Clave en minúsculas usada por tablas y payloads.
    pub fn key(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Etiqueta canónica tal como se almacena en el perfil.
    pub fn canonical(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Perfil financiero tal como lo entrega el colaborador de usuarios. Todos
/// los campos de negocio son opcionales: la ausencia se detecta y se enruta,
/// nunca se truena por un campo faltante.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub risk_appetite: Option<String>,
    pub investment_horizon_years: Option<i32>,
    pub financial_goals: Option<Vec<String>>,
}

impl UserProfile {
    /// Perfil vacío para un usuario dado.
    pub fn empty(user_id: i64) -> Self {
        UserProfile { user_id,
                      name: None,
                      email: None,
                      monthly_income: None,
                      monthly_expenses: None,
                      risk_appetite: None,
                      investment_horizon_years: None,
                      financial_goals: None }
    }

    /// Campos obligatorios ausentes, en el orden de `REQUIRED_PROFILE_FIELDS`.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.monthly_income.is_none() {
            missing.push(REQUIRED_PROFILE_FIELDS[0]);
        }
        if self.monthly_expenses.is_none() {
            missing.push(REQUIRED_PROFILE_FIELDS[1]);
        }
        if self.risk_appetite.is_none() {
            missing.push(REQUIRED_PROFILE_FIELDS[2]);
        }
        if self.investment_horizon_years.is_none() {
            missing.push(REQUIRED_PROFILE_FIELDS[3]);
        }
        missing
    }

    /// Revisa que los campos numéricos presentes sean utilizables. Devuelve
    /// el motivo de invalidez con el mensaje que verá el usuario.
    pub fn numeric_defect(&self) -> Option<DomainError> {
        if let Some(income) = self.monthly_income {
            if !income.is_finite() || income < 0.0 {
                return Some(DomainError::ValidationError(
                    "Invalid profile data: monthly_income must be a non-negative number".to_string(),
                ));
            }
        }
        if let Some(expenses) = self.monthly_expenses {
            if !expenses.is_finite() || expenses < 0.0 {
                return Some(DomainError::ValidationError(
                    "Invalid profile data: monthly_expenses must be a non-negative number".to_string(),
                ));
            }
        }
        if let Some(horizon) = self.investment_horizon_years {
            if horizon <= 0 {
                return Some(DomainError::ValidationError(
                    "Invalid profile data: investment_horizon_years must be a positive integer".to_string(),
                ));
            }
        }
        None
    }

    /// Metas declaradas, o las metas por defecto si no hay ninguna.
    pub fn goals_or_default(&self) -> Vec<String> {
        match &self.financial_goals {
            Some(goals) if !goals.is_empty() => goals.clone(),
            _ => DEFAULT_FINANCIAL_GOALS.iter().map(|g| g.to_string()).collect(),
        }
    }
}
