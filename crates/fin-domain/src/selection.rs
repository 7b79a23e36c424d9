// selection.rs
use serde::{Deserialize, Serialize};

use crate::AssetClass;

/// Acción seleccionada con su monto asignado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedStock {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub investment_amount: f64,
}

/// Fondo seleccionado con su monto asignado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFund {
    pub scheme_name: String,
    pub category: String,
    pub investment_amount: f64,
}

/// Depósito seleccionado con su monto asignado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDeposit {
    pub bank: String,
    pub tenure: String,
    pub interest_rate: f64,
    pub investment_amount: f64,
}

/// Sugerencia individual con el motivo de la elección.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedInstrument {
    pub instrument_type: String,
    pub name: String,
    pub reason: String,
}

/// Resultado completo de la selección de productos: montos por clase,
/// instrumentos elegidos por clase y sugerencias con motivo. Las notas del
/// asesor sólo aparecen cuando el colaborador narrativo respondió algo
/// parseable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductSelection {
    pub amounts: Vec<(AssetClass, f64)>,
    pub stocks: Vec<SelectedStock>,
    pub mutual_funds: Vec<SelectedFund>,
    pub fixed_deposits: Vec<SelectedDeposit>,
    pub suggested: Vec<SuggestedInstrument>,
    pub advisor_notes: Option<Vec<String>>,
}

impl ProductSelection {
    /// Monto asignado a una clase, 0 si la clase no participa.
    pub fn amount_for(&self, class: AssetClass) -> f64 {
        self.amounts
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }
}
