//! Datos de muestra deterministas.
//!
//! Tres perfiles fijos (uno completo, uno incompleto, uno conservador) y un
//! snapshot de mercado estable. Nada aleatorio: los tests y el demo asumen
//! estos valores.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use fin_domain::{FixedDeposit, MarketSnapshot, MutualFund, Stock, UserProfile};

/// Perfiles de muestra. Alice está completa y reproduce el escenario de
/// referencia (100k de ingreso, 60k de gasto); Bob no declaró tolerancia al
/// riesgo; Charlie es un perfil conservador de horizonte largo.
pub fn sample_profiles() -> Vec<UserProfile> {
    vec![UserProfile { user_id: 1,
                       name: Some("Alice Johnson".to_string()),
                       email: Some("alice@example.com".to_string()),
                       monthly_income: Some(100_000.0),
                       monthly_expenses: Some(60_000.0),
                       risk_appetite: Some("Medium".to_string()),
                       investment_horizon_years: Some(5),
                       financial_goals: Some(vec!["Retirement planning".to_string(),
                                                  "Wealth creation".to_string()]) },
         UserProfile { user_id: 2,
                       name: Some("Bob Williams".to_string()),
                       email: Some("bob@example.com".to_string()),
                       monthly_income: Some(75_000.0),
                       monthly_expenses: Some(42_000.0),
                       risk_appetite: None,
                       investment_horizon_years: Some(12),
                       financial_goals: Some(vec!["Buying a house".to_string()]) },
         UserProfile { user_id: 3,
                       name: Some("Charlie Brown".to_string()),
                       email: Some("charlie@example.com".to_string()),
                       monthly_income: Some(80_000.0),
                       monthly_expenses: Some(30_000.0),
                       risk_appetite: Some("Low".to_string()),
                       investment_horizon_years: Some(10),
                       financial_goals: Some(vec!["Children's education".to_string(),
                                                  "Tax saving".to_string()]) }]
}

static SAMPLE_SNAPSHOT: Lazy<MarketSnapshot> = Lazy::new(build_sample_snapshot);

/// Snapshot de mercado de muestra, estable entre corridas.
pub fn sample_snapshot() -> &'static MarketSnapshot {
    &SAMPLE_SNAPSHOT
}

fn stock(symbol: &str, name: &str, sector: &str, market_cap: f64, risk_level: &str) -> Stock {
    Stock { symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
            market_cap,
            risk_level: risk_level.to_string() }
}

fn fund(scheme_name: &str, category: &str, trailing_return_pct: f64) -> MutualFund {
    MutualFund { scheme_name: scheme_name.to_string(),
                 category: category.to_string(),
                 trailing_return_pct }
}

fn deposit(bank: &str, tenure: &str, interest_rate: f64) -> FixedDeposit {
    FixedDeposit { bank: bank.to_string(),
                   tenure: tenure.to_string(),
                   interest_rate }
}

fn build_sample_snapshot() -> MarketSnapshot {
    MarketSnapshot {
        as_of: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap_or_default(),
        currency: "INR".to_string(),
        stocks: vec![stock("HDFCB", "HDFC Bank", "Banking", 1_120_000.0, "low"),
                     stock("TCS", "Tata Consultancy Services", "Technology", 1_290_000.0, "low"),
                     stock("INFY", "Infosys", "Technology", 620_000.0, "medium"),
                     stock("SUNPH", "Sun Pharma", "Pharma", 410_000.0, "low"),
                     stock("BAJFN", "Bajaj Finance", "NBFC", 450_000.0, "high"),
                     stock("ADANIG", "Adani Green", "Energy", 290_000.0, "high"),
                     stock("ITC", "ITC", "FMCG", 560_000.0, "low"),
                     stock("BHARTI", "Bharti Airtel", "Telecom", 790_000.0, "medium")],
        mutual_funds: vec![fund("HDFC Corporate Bond Fund", "Debt", 7.9),
                           fund("SBI Magnum Gilt Fund", "Debt", 8.4),
                           fund("ICICI Prudential Short Term Fund", "Debt", 7.2),
                           fund("Axis Bluechip Fund", "Equity", 12.8),
                           fund("HDFC Balanced Advantage Fund", "Hybrid", 10.9),
                           fund("UTI Nifty Index Fund", "Index", 11.6)],
        fixed_deposits: vec![deposit("SafeBank", "12 months", 7.1),
                             deposit("TrustBank", "18 months", 6.8),
                             deposit("GrowBank", "24 months", 7.4),
                             deposit("NeoBank", "12 months", 6.5),
                             deposit("SecureBank", "36 months", 7.0)],
    }
}
