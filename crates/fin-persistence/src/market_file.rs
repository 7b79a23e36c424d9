//! Proveedor de mercado respaldado por un archivo JSON.
//!
//! Lee el snapshot completo desde disco en cada corrida; el archivo lo deja
//! el sembrado o un proceso externo de actualización de mercado.

use log::debug;
use std::path::PathBuf;

use fin_domain::MarketSnapshot;
use fin_providers::{MarketDataProvider, ProviderError};

pub struct FileMarketData {
    path: PathBuf,
}

impl FileMarketData {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileMarketData { path: path.into() }
    }
}

impl MarketDataProvider for FileMarketData {
    fn fetch(&self) -> Result<MarketSnapshot, ProviderError> {
        debug!("[persistence] leyendo snapshot de {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| ProviderError::Upstream(format!("Failed to fetch market data: {e}")))?;
        serde_json::from_str(&raw)
            .map_err(|e| ProviderError::Malformed(format!("Failed to fetch market data: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_fetch_failure() {
        let provider = FileMarketData::new("/nonexistent/finflow/market.json");
        let err = provider.fetch().expect_err("no hay archivo");
        match err {
            ProviderError::Upstream(msg) => {
                assert!(msg.starts_with("Failed to fetch market data:"), "{msg}");
            }
            other => panic!("variante inesperada: {other:?}"),
        }
    }
}
