// market.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::RiskTier;

/// Acción listada. `market_cap` es el criterio de ranking para renta
/// variable; `risk_level` alimenta el filtro por tolerancia al riesgo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub market_cap: f64,
    #[serde(default)]
    pub risk_level: String,
}

/// Fondo mutuo. El ranking usa el retorno histórico; la categoría decide si
/// el fondo participa en la clase de renta fija.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualFund {
    pub scheme_name: String,
    pub category: String,
    pub trailing_return_pct: f64,
}

impl MutualFund {
    /// Los fondos de deuda son los únicos elegibles para renta fija.
    pub fn is_debt(&self) -> bool {
        self.category.trim().eq_ignore_ascii_case("debt")
    }
}

/// Depósito a plazo fijo, rankeado por tasa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDeposit {
    pub bank: String,
    pub tenure: String,
    pub interest_rate: f64,
}

/// Universo de instrumentos tal como lo entrega el colaborador de mercado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub as_of: NaiveDate,
    pub currency: String,
    pub stocks: Vec<Stock>,
    pub mutual_funds: Vec<MutualFund>,
    pub fixed_deposits: Vec<FixedDeposit>,
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl MarketSnapshot {
    /// Copia del snapshot filtrada por tolerancia al riesgo. Un perfil
    /// conservador sólo conserva acciones marcadas `risk_level == "low"`;
    /// fondos y depósitos pasan completos.
    pub fn filtered_for(&self, tier: RiskTier) -> MarketSnapshot {
        let stocks = match tier {
            RiskTier::Low => self.stocks
                                 .iter()
                                 .filter(|s| s.risk_level.eq_ignore_ascii_case("low"))
                                 .cloned()
                                 .collect(),
            RiskTier::Medium | RiskTier::High => self.stocks.clone(),
        };
        MarketSnapshot { as_of: self.as_of,
                         currency: self.currency.clone(),
                         stocks,
                         mutual_funds: self.mutual_funds.clone(),
                         fixed_deposits: self.fixed_deposits.clone() }
    }

    /// Top-n de acciones por capitalización de mercado, descendente.
    pub fn top_stocks_by_market_cap(&self, n: usize) -> Vec<Stock> {
        let mut ranked = self.stocks.clone();
        ranked.sort_by(|a, b| desc(a.market_cap, b.market_cap));
        ranked.truncate(n);
        ranked
    }

    /// Top-n de fondos de deuda por retorno histórico, descendente.
    pub fn top_debt_funds_by_return(&self, n: usize) -> Vec<MutualFund> {
        let mut ranked: Vec<MutualFund> =
            self.mutual_funds.iter().filter(|f| f.is_debt()).cloned().collect();
        ranked.sort_by(|a, b| desc(a.trailing_return_pct, b.trailing_return_pct));
        ranked.truncate(n);
        ranked
    }

    /// Top-n de depósitos por tasa, descendente.
    pub fn top_deposits_by_rate(&self, n: usize) -> Vec<FixedDeposit> {
        let mut ranked = self.fixed_deposits.clone();
        ranked.sort_by(|a, b| desc(a.interest_rate, b.interest_rate));
        ranked.truncate(n);
        ranked
    }
}
