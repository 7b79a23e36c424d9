//! Sembrado de datos de muestra: usuarios, perfiles y snapshot de mercado.
//!
//! Idempotente: los usuarios se reescriben por id y el snapshot sólo se
//! escribe si el archivo no existe todavía.

use diesel::prelude::*;
use log::info;
use std::path::Path;

use fin_providers::seed::{sample_profiles, sample_snapshot};

use crate::error::PersistenceError;
use crate::schema::{user_profiles, users};
use crate::sqlite::ConnectionProvider;

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
struct SeedUserRow<'a> {
    id: i64,
    name: &'a str,
    email: &'a str,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = user_profiles)]
struct SeedProfileRow<'a> {
    user_id: i64,
    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    risk_appetite: Option<&'a str>,
    investment_horizon_years: Option<i32>,
    financial_goals: Option<String>,
}

/// Inserta o refresca los perfiles de muestra. Devuelve cuántos quedaron.
pub fn seed_sample_users<P: ConnectionProvider>(provider: &P) -> Result<usize, PersistenceError> {
    let profiles = sample_profiles();
    let mut conn = provider.connection()?;
    for profile in &profiles {
        let goals_json = match &profile.financial_goals {
            Some(goals) => {
                Some(serde_json::to_string(goals).map_err(|e| {
                                                     PersistenceError::Unknown(format!(
                    "goals json: {e}"
                ))
                                                 })?)
            }
            None => None,
        };
        diesel::replace_into(users::table)
            .values(SeedUserRow { id: profile.user_id,
                                  name: profile.name.as_deref().unwrap_or(""),
                                  email: profile.email.as_deref().unwrap_or("") })
            .execute(&mut conn)?;
        diesel::replace_into(user_profiles::table)
            .values(SeedProfileRow { user_id: profile.user_id,
                                     monthly_income: profile.monthly_income,
                                     monthly_expenses: profile.monthly_expenses,
                                     risk_appetite: profile.risk_appetite.as_deref(),
                                     investment_horizon_years: profile.investment_horizon_years,
                                     financial_goals: goals_json })
            .execute(&mut conn)?;
    }
    info!("[persistence] sembrados {} perfiles de muestra", profiles.len());
    Ok(profiles.len())
}

/// Escribe el snapshot de mercado de muestra si el archivo no existe.
/// Devuelve `true` cuando hubo escritura.
pub fn ensure_market_file(path: &str) -> Result<bool, PersistenceError> {
    let target = Path::new(path);
    if target.exists() {
        return Ok(false);
    }
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PersistenceError::TransientIo(format!("create dir {}: {e}", parent.display()))
            })?;
        }
    }
    let body = serde_json::to_string_pretty(sample_snapshot())
        .map_err(|e| PersistenceError::Unknown(format!("snapshot json: {e}")))?;
    std::fs::write(target, body)
        .map_err(|e| PersistenceError::TransientIo(format!("write {path}: {e}")))?;
    info!("[persistence] snapshot de mercado escrito en {path}");
    Ok(true)
}
