//! Carga de configuración desde variables de entorno.
//! Usa convención `DATABASE_URL` para la base SQLite y `MARKET_DATA_PATH`
//! para el snapshot de mercado, ambas con defaults bajo `db/`.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

use crate::error::PersistenceError;

pub const DEFAULT_DATABASE_URL: &str = "db/financial_advisor.db";
pub const DEFAULT_MARKET_DATA_PATH: &str = "db/market_data.json";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub market_data_path: String,
    pub pool_min: u32,
    pub pool_max: u32,
}

impl AppConfig {
    /// Lee la configuración con defaults para todo lo no definido.
    ///
    /// # Errores
    /// `PersistenceError::Config` si un límite del pool no parsea como entero
    /// o si el mínimo supera al máximo.
    pub fn from_env() -> Result<Self, PersistenceError> {
        Lazy::force(&DOTENV_LOADED);
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let market_data_path =
            env::var("MARKET_DATA_PATH").unwrap_or_else(|_| DEFAULT_MARKET_DATA_PATH.to_string());
        let pool_min = pool_bound("FINFLOW_POOL_MIN", 1)?;
        let pool_max = pool_bound("FINFLOW_POOL_MAX", 8)?;
        if pool_min > pool_max {
            return Err(PersistenceError::Config(format!(
                "FINFLOW_POOL_MIN ({pool_min}) must not exceed FINFLOW_POOL_MAX ({pool_max})"
            )));
        }
        Ok(AppConfig { database_url, market_data_path, pool_min, pool_max })
    }
}

fn pool_bound(name: &str, default: u32) -> Result<u32, PersistenceError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw.trim().parse().map_err(|_| {
                                         PersistenceError::Config(format!(
                "{name} must be a non-negative integer, got '{raw}'"
            ))
                                     }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Un solo test: los límites del pool se manipulan por variables de
    // entorno compartidas por el proceso.
    #[test]
    fn test_pool_bounds_defaults_and_misconfiguration() {
        env::remove_var("FINFLOW_POOL_MIN");
        env::remove_var("FINFLOW_POOL_MAX");
        let cfg = AppConfig::from_env().expect("config con defaults");
        assert_eq!(cfg.pool_min, 1);
        assert_eq!(cfg.pool_max, 8);

        env::set_var("FINFLOW_POOL_MIN", "9");
        env::set_var("FINFLOW_POOL_MAX", "2");
        let err = AppConfig::from_env().expect_err("mínimo mayor que máximo");
        assert!(matches!(err, PersistenceError::Config(_)));

        env::set_var("FINFLOW_POOL_MIN", "abc");
        env::remove_var("FINFLOW_POOL_MAX");
        let err = AppConfig::from_env().expect_err("límite no numérico");
        assert!(matches!(err, PersistenceError::Config(_)));

        env::remove_var("FINFLOW_POOL_MIN");
    }
}
