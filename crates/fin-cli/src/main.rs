//! CLI de operación sobre el backend SQLite.
//!
//! Comandos:
//! - `finflow run --user <id>`: corre el pipeline completo e imprime el
//!   payload final como JSON legible.
//! - `finflow latest --user <id>`: imprime la última recomendación guardada.
//! - `finflow seed`: siembra los perfiles de muestra y el snapshot de mercado.
//!
//! Códigos de salida: 0 ok, 2 uso, 3 configuración, 4 corrida fallida o sin
//! resultado, 5 persistencia.

use std::process::exit;
use std::sync::Arc;

use fin_core::StageStatus;
use fin_persistence::{build_pool, ensure_market_file, seed_sample_users, AppConfig,
                      FileMarketData, PoolProvider, SqlitePool, SqliteRecommendationStore,
                      SqliteUserProfileProvider};
use fin_providers::RecommendationStore;
use fin_stages::{build_pipeline, PipelineHandles};

const USAGE: &str = "Uso: finflow <run|latest|seed> [--user <id>]";

fn main() {
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("run") => run_command(&args[2..]),
        Some("latest") => latest_command(&args[2..]),
        Some("seed") => seed_command(),
        _ => {
            eprintln!("{USAGE}");
            exit(2);
        }
    }
}

fn run_command(rest: &[String]) {
    let user_id = parse_user(rest, "run");
    let cfg = load_config("run");
    let pool = open_pool(&cfg, "run");

    let handles = PipelineHandles {
        profiles: Arc::new(SqliteUserProfileProvider::new(PoolProvider { pool: pool.clone() })),
        market: Arc::new(FileMarketData::new(cfg.market_data_path.clone())),
        store: Arc::new(SqliteRecommendationStore::new(PoolProvider { pool })),
        narrative: None,
    };
    let mut engine = match build_pipeline(handles) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("[finflow run] engine error: {e}");
            exit(4);
        }
    };

    match engine.run(user_id) {
        Ok(outcome) => {
            print_payload(&outcome.payload, "run");
            // Un error manejado termina la corrida con payload de
            // diagnóstico; para el operador sigue siendo una falla.
            if outcome.terminal == StageStatus::ErrorHandled {
                exit(4);
            }
        }
        Err(e) => {
            eprintln!("[finflow run] run error: {e}");
            exit(4);
        }
    }
}

fn latest_command(rest: &[String]) {
    let user_id = parse_user(rest, "latest");
    let cfg = load_config("latest");
    let pool = open_pool(&cfg, "latest");
    let store = SqliteRecommendationStore::new(PoolProvider { pool });

    match store.load_latest(user_id) {
        Ok(Some(payload)) => print_payload(&payload, "latest"),
        Ok(None) => {
            eprintln!("[finflow latest] no recommendation found for user_id {user_id}");
            exit(4);
        }
        Err(e) => {
            eprintln!("[finflow latest] store error: {e}");
            exit(5);
        }
    }
}

fn seed_command() {
    let cfg = load_config("seed");
    let pool = open_pool(&cfg, "seed");
    let provider = PoolProvider { pool };

    match seed_sample_users(&provider) {
        Ok(count) => println!("sembrados {count} perfiles de muestra"),
        Err(e) => {
            eprintln!("[finflow seed] seed error: {e}");
            exit(5);
        }
    }
    match ensure_market_file(&cfg.market_data_path) {
        Ok(true) => println!("snapshot de mercado escrito en {}", cfg.market_data_path),
        Ok(false) => println!("snapshot de mercado ya presente en {}", cfg.market_data_path),
        Err(e) => {
            eprintln!("[finflow seed] market file error: {e}");
            exit(5);
        }
    }
}

fn parse_user(args: &[String], context: &str) -> i64 {
    let mut user: Option<i64> = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--user" {
            i += 1;
            if i < args.len() {
                user = args[i].parse().ok();
            }
        }
        i += 1;
    }
    match user {
        Some(id) => id,
        None => {
            eprintln!("[finflow {context}] falta --user <id> numérico");
            eprintln!("{USAGE}");
            exit(2);
        }
    }
}

fn load_config(context: &str) -> AppConfig {
    match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("[finflow {context}] {e}");
            exit(3);
        }
    }
}

fn open_pool(cfg: &AppConfig, context: &str) -> SqlitePool {
    match build_pool(&cfg.database_url, cfg.pool_min, cfg.pool_max) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("[finflow {context}] pool error: {e}");
            exit(5);
        }
    }
}

fn print_payload(payload: &serde_json::Value, context: &str) {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("[finflow {context}] payload render error: {e}");
            exit(5);
        }
    }
}
