//! Implementaciones SQLite (Diesel) de los colaboradores durables.
//!
//! - Pool r2d2 sobre `SqliteConnection`, con migraciones embebidas corridas
//!   en el primer checkout y pragmas por conexión (claves foráneas y espera
//!   ante locks).
//! - `SqliteUserProfileProvider`: perfiles unidos con la tabla de usuarios.
//! - `SqliteRecommendationStore`: inserts append-only de payloads con hash y
//!   timestamp RFC3339; la consulta devuelve siempre el más reciente.
//! - Errores transitorios (BUSY/LOCKED) se reintentan con backoff lineal
//!   corto dentro de cada operación.

use chrono::Utc;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;
use log::{debug, warn};
use serde_json::Value;
use std::path::Path;

use fin_domain::{payload_hash, UserProfile};
use fin_providers::{ProviderError, RecommendationStore, UserProfileProvider};

use crate::error::{is_retryable, PersistenceError};
use crate::migrations::run_pending_migrations;
use crate::schema::{recommendations, user_profiles, users};

/// Alias del pool r2d2 de conexiones SQLite.
pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type PooledSqlite = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

/// Proveedor abstracto de conexiones, para inyectar el pool real o un doble.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<PooledSqlite, PersistenceError>;
}

/// Implementación concreta respaldada por un `SqlitePool`.
pub struct PoolProvider {
    pub pool: SqlitePool,
}

impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<PooledSqlite, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

// Pragmas por conexión. busy_timeout complementa al retry de más abajo: el
// driver espera hasta 1s antes de reportar BUSY.
#[derive(Debug)]
struct ConnectionPragmas;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 1000;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Retry con backoff lineal corto (hasta 3 intentos extra: 15, 30, 45 ms).
fn with_retry<F, T>(mut f: F) -> Result<T, PersistenceError>
    where F: FnMut() -> Result<T, PersistenceError>
{
    let mut attempts = 0;
    loop {
        match f() {
            Err(e) if is_retryable(&e) && attempts < 3 => {
                let delay_ms = 15 * ((attempts + 1) as u64);
                warn!("[persistence] error transitorio (intento {}): {:?}, durmiendo {delay_ms}ms",
                      attempts + 1,
                      e);
                std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                attempts += 1;
            }
            r => return r,
        }
    }
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = user_profiles)]
struct ProfileRow {
    #[allow(dead_code)]
    user_id: i64,
    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    risk_appetite: Option<String>,
    investment_horizon_years: Option<i32>,
    financial_goals: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = recommendations)]
struct NewRecommendationRow<'a> {
    user_id: i64,
    payload_hash: &'a str,
    recommendation_json: &'a str,
    created_at: &'a str,
}

/// Proveedor de perfiles sobre la base SQLite. Une `users` con
/// `user_profiles`; un usuario sin fila de perfil devuelve los campos
/// financieros en `None`, que la etapa de completitud reporta como faltantes.
pub struct SqliteUserProfileProvider<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteUserProfileProvider<P> {
    pub fn new(provider: P) -> Self {
        SqliteUserProfileProvider { provider }
    }
}

impl<P: ConnectionProvider> UserProfileProvider for SqliteUserProfileProvider<P> {
    fn fetch(&self, user_id: i64) -> Result<UserProfile, ProviderError> {
        debug!("[persistence] fetch perfil user_id={user_id}");
        let row: Option<(UserRow, Option<ProfileRow>)> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            users::table.left_join(user_profiles::table)
                        .filter(users::id.eq(user_id))
                        .select((UserRow::as_select(), Option::<ProfileRow>::as_select()))
                        .first(&mut conn)
                        .optional()
                        .map_err(PersistenceError::from)
        }).map_err(ProviderError::from)?;

        match row {
            Some((user, profile)) => Ok(profile_from_rows(user, profile)),
            None => Err(ProviderError::ProfileNotFound(user_id)),
        }
    }
}

fn profile_from_rows(user: UserRow, profile: Option<ProfileRow>) -> UserProfile {
    let mut assembled = UserProfile::empty(user.id);
    assembled.name = Some(user.name);
    assembled.email = Some(user.email);
    if let Some(row) = profile {
        assembled.monthly_income = row.monthly_income;
        assembled.monthly_expenses = row.monthly_expenses;
        assembled.risk_appetite = row.risk_appetite;
        assembled.investment_horizon_years = row.investment_horizon_years;
        assembled.financial_goals = row.financial_goals.as_deref().map(parse_goals);
    }
    assembled
}

// Parse laxo: un JSON ilegible degrada a lista vacía, no a falla de corrida.
fn parse_goals(raw: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(goals) => goals,
        Err(err) => {
            debug!("[persistence] financial_goals ilegible: {err}");
            Vec::new()
        }
    }
}

/// Almacén de recomendaciones sobre SQLite. `save` es un insert append-only
/// con hash del payload y timestamp RFC3339 asignado aquí; `load_latest`
/// ordena por fecha y desempata por id.
pub struct SqliteRecommendationStore<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteRecommendationStore<P> {
    pub fn new(provider: P) -> Self {
        SqliteRecommendationStore { provider }
    }

    /// Cantidad de filas guardadas para un usuario.
    pub fn saved_count(&self, user_id: i64) -> Result<i64, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            recommendations::table.filter(recommendations::user_id.eq(user_id))
                                  .count()
                                  .get_result(&mut conn)
                                  .map_err(PersistenceError::from)
        })
    }
}

impl<P: ConnectionProvider> RecommendationStore for SqliteRecommendationStore<P> {
    fn save(&self, user_id: i64, payload: &Value) -> Result<(), ProviderError> {
        let hash = payload_hash(payload);
        let body = payload.to_string();
        let created_at = Utc::now().to_rfc3339();
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::insert_into(recommendations::table)
                .values(NewRecommendationRow { user_id,
                                               payload_hash: &hash,
                                               recommendation_json: &body,
                                               created_at: &created_at })
                .execute(&mut conn)
                .map_err(PersistenceError::from)
        }).map_err(ProviderError::from)?;
        debug!("[persistence] payload guardado user_id={user_id} hash={}", &hash[..12]);
        Ok(())
    }

    fn load_latest(&self, user_id: i64) -> Result<Option<Value>, ProviderError> {
        let body: Option<String> = with_retry(|| {
            let mut conn = self.provider.connection()?;
            recommendations::table.filter(recommendations::user_id.eq(user_id))
                                  .order((recommendations::created_at.desc(),
                                          recommendations::id.desc()))
                                  .select(recommendations::recommendation_json)
                                  .first(&mut conn)
                                  .optional()
                                  .map_err(PersistenceError::from)
        }).map_err(ProviderError::from)?;
        match body {
            Some(text) => {
                serde_json::from_str(&text).map(Some).map_err(|e| {
                                                         ProviderError::Malformed(format!(
                    "stored recommendation is not valid JSON: {e}"
                ))
                                                     })
            }
            None => Ok(None),
        }
    }
}

/// Construye un pool SQLite r2d2 sobre `database_url`.
///
/// Comportamiento:
/// - Ajusta tamaños fuera de rango (cero pasa a uno, `min` se acota a `max`).
/// - Crea el directorio padre del archivo si no existe.
/// - Corre las migraciones pendientes inmediatamente tras el primer `get()`.
pub fn build_pool(database_url: &str,
                  min_size: u32,
                  max_size: u32)
                  -> Result<SqlitePool, PersistenceError> {
    let validated_min = if min_size == 0 { 1 } else { min_size };
    let validated_max = if max_size == 0 { 1 } else { max_size };
    let final_min = validated_min.min(validated_max);

    ensure_parent_dir(database_url)?;
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .connection_customizer(Box::new(ConnectionPragmas))
                                    .build(manager)
                                    .map_err(|e| {
                                        PersistenceError::TransientIo(format!("pool build: {e}"))
                                    })?;
    {
        let mut conn = pool.get().map_err(|e| {
                                     PersistenceError::TransientIo(format!(
                "pool get for migrations: {e}"
            ))
                                 })?;
        run_pending_migrations(&mut conn)?;
    }
    debug!("[persistence] pool listo url={database_url} min={final_min} max={validated_max}");
    Ok(pool)
}

/// Pool construido desde `.env` / entorno, ya migrado.
pub fn build_pool_from_env() -> Result<SqlitePool, PersistenceError> {
    crate::config::init_dotenv();
    let cfg = crate::config::AppConfig::from_env()?;
    build_pool(&cfg.database_url, cfg.pool_min, cfg.pool_max)
}

// El archivo de base vive bajo db/ por defecto; las URLs especiales de
// SQLite (:memory:, file:) no llevan directorio que crear.
fn ensure_parent_dir(database_url: &str) -> Result<(), PersistenceError> {
    if database_url == ":memory:" || database_url.starts_with("file:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(database_url).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PersistenceError::TransientIo(format!("create dir {}: {e}", parent.display()))
            })?;
        }
    }
    Ok(())
}
