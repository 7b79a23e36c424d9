//! Tests de integración sobre SQLite real.
//!
//! Corren sólo con `DATABASE_URL` definido (sirve `:memory:` o la ruta a un
//! archivo); sin la variable se saltan con aviso. El pool es 1x1 para que
//! `:memory:` comparta la única conexión ya migrada.

use diesel::prelude::*;
use serde_json::json;

use fin_persistence::schema::{recommendations, user_profiles, users};
use fin_persistence::{build_pool, seed_sample_users, ConnectionProvider, PoolProvider,
                      SqliteRecommendationStore, SqliteUserProfileProvider};
use fin_providers::{RecommendationStore, UserProfileProvider};

fn test_provider() -> Option<PoolProvider> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set - skipping SQLite integration test");
            return None;
        }
    };
    let pool = build_pool(&url, 1, 1).expect("pool de test");
    Some(PoolProvider { pool })
}

#[test]
fn test_seeded_profiles_fetch_through_join() {
    let provider = match test_provider() {
        Some(provider) => provider,
        None => return,
    };
    seed_sample_users(&provider).expect("sembrado");
    let profiles = SqliteUserProfileProvider::new(provider);

    let alice = profiles.fetch(1).expect("perfil de Alice");
    assert_eq!(alice.name.as_deref(), Some("Alice Johnson"));
    assert_eq!(alice.email.as_deref(), Some("alice@example.com"));
    assert_eq!(alice.monthly_income, Some(100_000.0));
    assert_eq!(alice.financial_goals.as_deref().map(<[String]>::len), Some(2));

    // Bob está sembrado sin tolerancia al riesgo declarada.
    let bob = profiles.fetch(2).expect("perfil de Bob");
    assert!(bob.risk_appetite.is_none());
    assert_eq!(bob.investment_horizon_years, Some(12));

    let err = profiles.fetch(999_999).expect_err("usuario inexistente");
    assert_eq!(err.to_string(), "No profile found for user_id 999999");
}

#[test]
fn test_save_appends_and_load_latest_wins() {
    let provider = match test_provider() {
        Some(provider) => provider,
        None => return,
    };
    seed_sample_users(&provider).expect("sembrado");
    let store = SqliteRecommendationStore::new(provider);

    let before = store.saved_count(1).expect("conteo inicial");
    let first = json!({"status": "success", "revision": "a"});
    let second = json!({"status": "success", "revision": "b"});
    store.save(1, &first).expect("primer guardado");
    store.save(1, &second).expect("segundo guardado");

    assert_eq!(store.saved_count(1).expect("conteo final"), before + 2);
    let latest = store.load_latest(1).expect("consulta").expect("fila guardada");
    assert_eq!(latest, second);
}

#[test]
fn test_load_latest_without_rows_is_none() {
    let provider = match test_provider() {
        Some(provider) => provider,
        None => return,
    };
    seed_sample_users(&provider).expect("sembrado");
    let store = SqliteRecommendationStore::new(provider);
    // Charlie nunca recibe guardados en esta suite.
    assert_eq!(store.saved_count(3).expect("conteo"), 0);
    assert!(store.load_latest(3).expect("consulta").is_none());
}

#[test]
fn test_unreadable_goals_degrade_to_empty_list() {
    let provider = match test_provider() {
        Some(provider) => provider,
        None => return,
    };
    {
        let mut conn = provider.connection().expect("conexión");
        diesel::replace_into(users::table)
            .values((users::id.eq(9),
                     users::name.eq("Grace Hall"),
                     users::email.eq("grace@example.com")))
            .execute(&mut conn)
            .expect("alta de usuario");
        diesel::replace_into(user_profiles::table)
            .values((user_profiles::user_id.eq(9),
                     user_profiles::monthly_income.eq(Some(55_000.0)),
                     user_profiles::monthly_expenses.eq(Some(25_000.0)),
                     user_profiles::risk_appetite.eq(Some("High")),
                     user_profiles::investment_horizon_years.eq(Some(7)),
                     user_profiles::financial_goals.eq(Some("not-json"))))
            .execute(&mut conn)
            .expect("alta de perfil");
    }
    let profiles = SqliteUserProfileProvider::new(provider);
    let grace = profiles.fetch(9).expect("perfil con metas rotas");
    assert_eq!(grace.financial_goals, Some(Vec::new()));
    assert_eq!(grace.risk_appetite.as_deref(), Some("High"));
}

#[test]
fn test_user_without_profile_row_reports_missing_fields() {
    let provider = match test_provider() {
        Some(provider) => provider,
        None => return,
    };
    {
        let mut conn = provider.connection().expect("conexión");
        diesel::replace_into(users::table)
            .values((users::id.eq(10),
                     users::name.eq("Henry Ruiz"),
                     users::email.eq("henry@example.com")))
            .execute(&mut conn)
            .expect("alta de usuario");
    }
    let profiles = SqliteUserProfileProvider::new(provider);
    let henry = profiles.fetch(10).expect("usuario sin fila de perfil");
    assert_eq!(henry.name.as_deref(), Some("Henry Ruiz"));
    assert!(henry.monthly_income.is_none());
    assert_eq!(henry.missing_required_fields().len(), 4);
}

#[test]
fn test_saved_row_hash_matches_canonical_json() {
    let provider = match test_provider() {
        Some(provider) => provider,
        None => return,
    };
    let raw = PoolProvider { pool: provider.pool.clone() };
    {
        let mut conn = provider.connection().expect("conexión");
        diesel::replace_into(users::table)
            .values((users::id.eq(12),
                     users::name.eq("Iris West"),
                     users::email.eq("iris@example.com")))
            .execute(&mut conn)
            .expect("alta de usuario");
    }
    let store = SqliteRecommendationStore::new(provider);

    // El hash de la fila es el SHA-256 del JSON canónico del payload, con
    // las claves ya ordenadas; el orden de escritura no influye.
    let payload = json!({ "zeta": 1, "alpha": { "b": 2, "a": 3 } });
    store.save(12, &payload).expect("guardado");

    let mut conn = raw.connection().expect("conexión");
    let stored: String = recommendations::table.filter(recommendations::user_id.eq(12))
                                               .order(recommendations::id.desc())
                                               .select(recommendations::payload_hash)
                                               .first(&mut conn)
                                               .expect("hash persistido");
    assert_eq!(stored, fin_domain::payload_hash(&payload));
}

#[test]
fn test_migrations_apply_idempotently() {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set - skipping SQLite integration test");
            return;
        }
    };
    let _first = build_pool(&url, 1, 1).expect("primer pool");
    let _second = build_pool(&url, 1, 1).expect("segundo pool sin migraciones pendientes");
}
