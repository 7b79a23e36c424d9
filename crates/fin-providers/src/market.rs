//! Colaborador de datos de mercado.

use log::debug;

use fin_domain::MarketSnapshot;

use crate::error::ProviderError;
use crate::seed;

/// Fetcher del universo de instrumentos. Una sola llamada trae el snapshot
/// completo (acciones, fondos y depósitos).
pub trait MarketDataProvider: Send + Sync {
    fn fetch(&self) -> Result<MarketSnapshot, ProviderError>;
}

/// Proveedor en memoria con el snapshot de muestra.
pub struct CannedMarketData {
    snapshot: MarketSnapshot,
}

impl CannedMarketData {
    pub fn new(snapshot: MarketSnapshot) -> Self {
        CannedMarketData { snapshot }
    }

    /// Snapshot determinista de muestra.
    pub fn with_seed() -> Self {
        CannedMarketData { snapshot: seed::sample_snapshot().clone() }
    }
}

impl MarketDataProvider for CannedMarketData {
    fn fetch(&self) -> Result<MarketSnapshot, ProviderError> {
        debug!("[providers] fetch mercado: {} acciones, {} fondos, {} depósitos",
               self.snapshot.stocks.len(),
               self.snapshot.mutual_funds.len(),
               self.snapshot.fixed_deposits.len());
        Ok(self.snapshot.clone())
    }
}

/// Doble que falla siempre, para ejercitar el desvío a manejo de errores.
pub struct FailingMarketData {
    pub message: String,
}

impl MarketDataProvider for FailingMarketData {
    fn fetch(&self) -> Result<MarketSnapshot, ProviderError> {
        Err(ProviderError::Upstream(self.message.clone()))
    }
}
