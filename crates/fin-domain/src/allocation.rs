//! Clases de activo y tablas fijas de asignación por tolerancia al riesgo.
//!
//! Las razones de cada tabla suman 1. Aun así, `Allocation::normalized`
//! existe porque el pipeline acepta razones arbitrarias y debe
//! re-normalizarlas antes de repartir dinero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{DomainError, RiskTier};

/// Clase de activo reconocida por las tablas y el cálculo de retornos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    Equity,
    FixedIncome,
    Gold,
    Cash,
}

/// Orden estable de presentación y cómputo.
pub const ASSET_CLASS_ORDER: [AssetClass; 4] =
    [AssetClass::Equity, AssetClass::FixedIncome, AssetClass::Gold, AssetClass::Cash];

impl AssetClass {
    /// Clave snake_case usada en payloads.
    pub fn key(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::FixedIncome => "fixed_income",
            AssetClass::Gold => "gold",
            AssetClass::Cash => "cash",
        }
    }

    /// Tasa anual esperada por clase, fija por política.
    pub fn expected_annual_rate(&self) -> f64 {
        match self {
            AssetClass::Equity => 0.10,
            AssetClass::FixedIncome => 0.06,
            AssetClass::Gold => 0.04,
            AssetClass::Cash => 0.03,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Reparto porcentual entre clases de activo. Inmutable una vez construido;
/// toda razón es finita y no negativa y la suma es positiva.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    equity: f64,
    fixed_income: f64,
    gold: f64,
    cash: f64,
}

impl Allocation {
    /// Construye un reparto validado.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si alguna razón es negativa o no
    /// finita, o si todas son cero.
    pub fn new(equity: f64, fixed_income: f64, gold: f64, cash: f64) -> Result<Self, DomainError> {
        for ratio in [equity, fixed_income, gold, cash] {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(DomainError::ValidationError(
                    "Las razones de asignación deben ser números no negativos".to_string(),
                ));
            }
        }
        if equity + fixed_income + gold + cash <= 0.0 {
            return Err(DomainError::ValidationError(
                "La asignación debe repartir algo entre las clases".to_string(),
            ));
        }
        Ok(Allocation { equity, fixed_income, gold, cash })
    }

    pub fn ratio(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Equity => self.equity,
            AssetClass::FixedIncome => self.fixed_income,
            AssetClass::Gold => self.gold,
            AssetClass::Cash => self.cash,
        }
    }

    pub fn sum(&self) -> f64 {
        self.equity + self.fixed_income + self.gold + self.cash
    }

    /// Reparto equivalente cuya suma es exactamente 1.
    pub fn normalized(&self) -> Allocation {
        let total = self.sum();
        Allocation { equity: self.equity / total,
                     fixed_income: self.fixed_income / total,
                     gold: self.gold / total,
                     cash: self.cash / total }
    }

    /// Pares (clase, razón) en el orden estable.
    pub fn entries(&self) -> [(AssetClass, f64); 4] {
        [(AssetClass::Equity, self.equity),
         (AssetClass::FixedIncome, self.fixed_income),
         (AssetClass::Gold, self.gold),
         (AssetClass::Cash, self.cash)]
    }
}

// Construcción interna: las tablas fijas ya cumplen los invariantes.
const LOW_ALLOCATION: Allocation =
    Allocation { equity: 0.30, fixed_income: 0.50, gold: 0.0, cash: 0.20 };
const MEDIUM_ALLOCATION: Allocation =
    Allocation { equity: 0.60, fixed_income: 0.30, gold: 0.0, cash: 0.10 };
const HIGH_ALLOCATION: Allocation =
    Allocation { equity: 0.80, fixed_income: 0.15, gold: 0.0, cash: 0.05 };

/// Tabla fija de asignación por tolerancia al riesgo. Devuelve el reparto y
/// la descripción de cartera que acompaña al reporte.
pub fn default_allocation(tier: RiskTier) -> (Allocation, &'static str) {
    match tier {
        RiskTier::Low => (LOW_ALLOCATION, "Conservative portfolio with focus on capital preservation"),
        RiskTier::Medium => (MEDIUM_ALLOCATION, "Balanced portfolio with moderate growth potential"),
        RiskTier::High => (HIGH_ALLOCATION, "Aggressive portfolio with high growth potential"),
    }
}
