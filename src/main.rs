//! Binario de humo del pipeline de recomendación financiera.
//!
//! Corre las rutas principales con providers en memoria y valida en caliente
//! los resultados que un operador revisaría a mano: terminal alcanzado,
//! cantidad de saltos, secuencia de eventos y montos del reporte. La demo
//! contra SQLite es opt-in por variable de entorno para no exigir una base
//! en entornos donde no la hay.

use std::sync::Arc;

use fin_core::{InMemoryEventStore, PipelineEngine, RunOutcome, StageStatus};
use fin_providers::{CannedMarketData, CannedUserProfiles, InMemoryRecommendationStore};
use fin_stages::{build_pipeline, PipelineHandles};
use serde_json::to_string_pretty;

fn main() {
    // Cargar variables de entorno desde .env si existe (antes de leer DATABASE_URL)
    let _ = dotenvy::dotenv();

    let store = Arc::new(InMemoryRecommendationStore::new());
    let handles = PipelineHandles { profiles: Arc::new(CannedUserProfiles::with_seed()),
                                    market: Arc::new(CannedMarketData::with_seed()),
                                    store: store.clone(),
                                    narrative: None };
    let mut engine = build_pipeline(handles).expect("Error al armar el pipeline");

    println!("--- Corrida completa (perfil completo) ---");
    let outcome = engine.run(1).expect("corrida user_id=1");
    print_summary(&engine, &outcome);
    assert_eq!(outcome.terminal, StageStatus::RecommendationSaved);
    assert_eq!(outcome.hops, 11, "La ruta sana recorre 11 etapas");
    assert_eq!(store.count_for(1), 1, "Debe quedar un payload guardado");
    let summary = &outcome.payload["report"]["investment_summary"];
    println!("Fondo de emergencia: {}", summary["emergency_fund"]);
    println!("Inversión mensual:   {}", summary["monthly_investment"]);
    println!("Retorno anual total: {}",
             outcome.payload["report"]["projected_returns"]["total"]);
    println!("Validación de corrida completa: OK");

    println!("--- Corrida con perfil incompleto ---");
    let outcome = engine.run(2).expect("corrida user_id=2");
    print_summary(&engine, &outcome);
    assert_eq!(outcome.terminal, StageStatus::CompletedWithFallback);
    assert_eq!(outcome.hops, 3, "El perfil incompleto corta en la verificación");
    println!("Mensaje: {}", outcome.payload["message"]);
    println!("Validación de fallback: OK");

    println!("--- Corrida con usuario inexistente ---");
    let outcome = engine.run(999).expect("corrida user_id=999");
    print_summary(&engine, &outcome);
    assert_eq!(outcome.terminal, StageStatus::ErrorHandled);
    assert_eq!(outcome.hops, 2, "La falla de lookup va directo al manejador");
    println!("Mensaje: {}", outcome.payload["message"]);
    println!("Validación de error manejado: OK");

    // Demo contra SQLite: opt-in para no exigir DATABASE_URL en toda corrida.
    if std::env::var("FINFLOW_RUN_SQLITE_DEMO").ok().as_deref() == Some("1") {
        maybe_run_sqlite_demo();
    } else {
        eprintln!("[SQLITE DEMO] Skipping (set FINFLOW_RUN_SQLITE_DEMO=1 to enable)");
    }
}

/// Línea de resumen compartida por las tres corridas de la demo.
fn print_summary(engine: &PipelineEngine<InMemoryEventStore>, outcome: &RunOutcome) {
    println!("run_id={} terminal={:?} hops={}",
             outcome.run_id, outcome.terminal, outcome.hops);
    println!("Secuencia de eventos: {:?}", engine.event_variants(outcome.run_id));
}

fn maybe_run_sqlite_demo() {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("[SQLITE DEMO] DATABASE_URL no definido; omitiendo demo de persistencia");
        return;
    }
    if let Err(e) = sqlite_persistence_demo::run() {
        eprintln!("[SQLITE DEMO] Error: {e}");
    }
}

mod sqlite_persistence_demo {
    use super::*;
    use fin_persistence::{build_pool_from_env, seed_sample_users, PoolProvider,
                          SqliteRecommendationStore, SqliteUserProfileProvider};
    use fin_providers::RecommendationStore;

    /// Misma corrida sana de la demo, con perfiles y almacén respaldados por
    /// SQLite. El snapshot de mercado sigue siendo el sembrado en memoria.
    pub fn run() -> Result<(), String> {
        let pool = build_pool_from_env().map_err(|e| e.to_string())?;
        seed_sample_users(&PoolProvider { pool: pool.clone() }).map_err(|e| e.to_string())?;

        let store = Arc::new(SqliteRecommendationStore::new(PoolProvider { pool: pool.clone() }));
        let handles =
            PipelineHandles { profiles:
                                  Arc::new(SqliteUserProfileProvider::new(PoolProvider { pool })),
                              market: Arc::new(CannedMarketData::with_seed()),
                              store: store.clone(),
                              narrative: None };
        let mut engine = build_pipeline(handles).map_err(|e| e.to_string())?;

        println!("--- Corrida completa sobre SQLite ---");
        let outcome = engine.run(1).map_err(|e| e.to_string())?;
        print_summary(&engine, &outcome);
        if outcome.terminal != StageStatus::RecommendationSaved {
            return Err(format!("terminal inesperado: {:?}", outcome.terminal));
        }

        // Releer lo guardado confirma el ciclo completo guardar/consultar.
        let latest = store.load_latest(1)
                          .map_err(|e| e.to_string())?
                          .ok_or_else(|| "sin payload guardado para user_id=1".to_string())?;
        println!("Último payload guardado:\n{}",
                 to_string_pretty(&latest).unwrap_or_default());
        println!("Validación de persistencia SQLite: OK");
        Ok(())
    }
}
