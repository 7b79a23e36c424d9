//! Runner de migraciones embebidas.
//!
//! El directorio `migrations/` de este crate se embebe en el binario; al
//! construir el pool se aplican las pendientes una sola vez.

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn run_pending_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let applied = conn.run_pending_migrations(MIGRATIONS)
                      .map_err(|e| PersistenceError::Unknown(format!("migration error: {e}")))?;
    if !applied.is_empty() {
        info!("[persistence] migraciones aplicadas: {}", applied.len());
    }
    Ok(())
}
