//! fin-persistence: colaboradores durables del pipeline
//!
//! Implementaciones respaldadas por SQLite (Diesel + r2d2) de los traits de
//! `fin-providers`, más el proveedor de mercado por archivo y el sembrado de
//! datos de muestra.
//!
//! Módulos:
//! - `sqlite`: pool, stores de perfiles y recomendaciones.
//! - `market_file`: snapshot de mercado leído de un JSON en disco.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde .env / entorno.
//! - `schema`: tablas Diesel declaradas para compilar queries.
//! - `seed`: datos de muestra para demo y CLI.

pub mod config;
pub mod error;
pub mod market_file;
pub mod migrations;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use config::{init_dotenv, AppConfig, DEFAULT_DATABASE_URL, DEFAULT_MARKET_DATA_PATH};
pub use error::PersistenceError;
pub use market_file::FileMarketData;
pub use seed::{ensure_market_file, seed_sample_users};
pub use sqlite::{build_pool, build_pool_from_env, ConnectionProvider, PoolProvider, SqlitePool,
                 SqliteRecommendationStore, SqliteUserProfileProvider};
