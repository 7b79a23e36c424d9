//! Subrutinas numéricas del pipeline: partición del ingreso disponible y
//! proyección de retornos anuales por clase de activo.

use serde::{Deserialize, Serialize};

use crate::money::round2;
use crate::{AssetClass, DomainError};

/// Fracción del ingreso disponible reservada como fondo de emergencia.
pub const EMERGENCY_FUND_RATE: f64 = 0.05;
/// Fracción del ingreso disponible destinada a inversión mensual.
pub const INVESTMENT_RATE: f64 = 0.95;

/// Partición del ingreso disponible de un mes. Inmutable; los tres montos
/// quedan redondeados a dos decimales y `emergency_fund + monthly_investment`
/// reconstruye el disponible salvo redondeo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsSplit {
    disposable: f64,
    emergency_fund: f64,
    monthly_investment: f64,
}

impl SavingsSplit {
    /// Calcula la partición a partir de ingreso y gasto mensuales.
    ///
    /// # Errores
    /// `DomainError::ValidationError` cuando el gasto alcanza o supera al
    /// ingreso, con el mensaje exacto que viaja al usuario.
    pub fn from_monthly(income: f64, expenses: f64) -> Result<Self, DomainError> {
        if !income.is_finite() || !expenses.is_finite() {
            return Err(DomainError::ValidationError(
                "Invalid profile data: income and expenses must be numbers".to_string(),
            ));
        }
        let disposable = income - expenses;
        if disposable <= 0.0 {
            return Err(DomainError::ValidationError(
                "Monthly expenses exceed or equal monthly income".to_string(),
            ));
        }
        Ok(SavingsSplit { disposable: round2(disposable),
                          emergency_fund: round2(disposable * EMERGENCY_FUND_RATE),
                          monthly_investment: round2(disposable * INVESTMENT_RATE) })
    }

    pub fn disposable(&self) -> f64 {
        self.disposable
    }

    pub fn emergency_fund(&self) -> f64 {
        self.emergency_fund
    }

    pub fn monthly_investment(&self) -> f64 {
        self.monthly_investment
    }
}

/// Retornos anuales proyectados sobre los montos asignados por clase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedReturns {
    by_class: Vec<(AssetClass, f64)>,
    total: f64,
    roi_pct: f64,
}

impl ProjectedReturns {
    /// Aplica la tasa esperada de cada clase a su monto y deriva el total y
    /// el ROI porcentual sobre la inversión mensual.
    ///
    /// # Errores
    /// `DomainError::ValidationError` si no hay inversión mensual positiva.
    pub fn over(amounts: &[(AssetClass, f64)], monthly_investment: f64) -> Result<Self, DomainError> {
        if !(monthly_investment > 0.0) {
            return Err(DomainError::ValidationError(
                "No monthly investment amount available for return calculation".to_string(),
            ));
        }
        let by_class: Vec<(AssetClass, f64)> =
            amounts.iter()
                   .map(|(class, amount)| (*class, round2(amount * class.expected_annual_rate())))
                   .collect();
        let total = round2(by_class.iter().map(|(_, ret)| ret).sum());
        let roi_pct = round2(total / monthly_investment * 100.0);
        Ok(ProjectedReturns { by_class, total, roi_pct })
    }

    pub fn by_class(&self) -> &[(AssetClass, f64)] {
        &self.by_class
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn roi_pct(&self) -> f64 {
        self.roi_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings_split_reference_scenario() -> Result<(), DomainError> {
        // 100k de ingreso y 60k de gasto: 5% y 95% de 40k.
        let split = SavingsSplit::from_monthly(100_000.0, 60_000.0)?;
        assert_eq!(split.disposable(), 40_000.0);
        assert_eq!(split.emergency_fund(), 2_000.0);
        assert_eq!(split.monthly_investment(), 38_000.0);
        Ok(())
    }

    #[test]
    fn test_savings_split_partition_is_exhaustive() -> Result<(), DomainError> {
        let split = SavingsSplit::from_monthly(83_333.33, 41_210.89)?;
        let rebuilt = split.emergency_fund() + split.monthly_investment();
        assert!((rebuilt - split.disposable()).abs() < 0.011);
        Ok(())
    }

    #[test]
    fn test_savings_split_rejects_nonpositive_disposable() {
        let err = SavingsSplit::from_monthly(50_000.0, 50_000.0);
        assert_eq!(err,
                   Err(DomainError::ValidationError(
                       "Monthly expenses exceed or equal monthly income".to_string())));
        assert!(SavingsSplit::from_monthly(40_000.0, 60_000.0).is_err());
    }

    #[test]
    fn test_projected_returns_rates_and_roi() -> Result<(), DomainError> {
        let amounts = [(AssetClass::Equity, 22_800.0),
                       (AssetClass::FixedIncome, 11_400.0),
                       (AssetClass::Cash, 3_800.0)];
        let projected = ProjectedReturns::over(&amounts, 38_000.0)?;
        assert_eq!(projected.by_class()[0].1, 2_280.0);
        assert_eq!(projected.by_class()[1].1, 684.0);
        assert_eq!(projected.by_class()[2].1, 114.0);
        assert_eq!(projected.total(), 3_078.0);
        assert_eq!(projected.roi_pct(), 8.1);
        Ok(())
    }

    #[test]
    fn test_projected_returns_requires_investment() {
        let err = ProjectedReturns::over(&[], 0.0);
        assert_eq!(err,
                   Err(DomainError::ValidationError(
                       "No monthly investment amount available for return calculation".to_string())));
    }
}
