//! Etapa de selección de productos.
//!
//! Reparte la inversión mensual entre clases según la asignación vigente,
//! rankea los instrumentos disponibles por clase y divide cada monto en
//! partes iguales entre los elegidos. Clases sin instrumentos calificados
//! reciben un instrumento por defecto con el monto completo. Si hay un
//! colaborador narrativo configurado, la selección determinista se enriquece
//! con notas del asesor; cualquier falla del colaborador o de su formato se
//! descarta sin tocar la selección.

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::{default_allocation, round2, AssetClass, MarketSnapshot, ProductSelection,
                 RiskTier, SavingsSplit, SelectedDeposit, SelectedFund, SelectedStock,
                 SuggestedInstrument};
use fin_providers::NarrativeProvider;

/// Cuántas acciones reparten la clase de renta variable.
const MAX_STOCKS: usize = 5;
/// Cuántos fondos de deuda reparten la renta fija.
const MAX_FUNDS: usize = 3;
/// Cuántos depósitos reparten la clase de efectivo.
const MAX_DEPOSITS: usize = 3;

pub struct SelectInvestmentProductsStage {
    narrative: Option<Arc<dyn NarrativeProvider>>,
}

impl SelectInvestmentProductsStage {
    /// Selección determinista, sin notas del asesor.
    pub fn new() -> Self {
        SelectInvestmentProductsStage { narrative: None }
    }

    /// Selección con enriquecimiento narrativo opcional.
    pub fn with_narrative(narrative: Arc<dyn NarrativeProvider>) -> Self {
        SelectInvestmentProductsStage { narrative: Some(narrative) }
    }
}

impl Default for SelectInvestmentProductsStage {
    fn default() -> Self {
        Self::new()
    }
}

impl StageDefinition for SelectInvestmentProductsStage {
    fn id(&self) -> StageId {
        StageId::SelectInvestmentProducts
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] select_investment_products user_id={}", ctx.user_id());
        let monthly_investment = match resolve_monthly_investment(ctx) {
            Ok(amount) => amount,
            Err(message) => return ContextUpdate::error(message),
        };

        let allocation = match ctx.allocation() {
            Some(allocation) => *allocation,
            None => default_allocation(RiskTier::Medium).0,
        };
        let normalized = allocation.normalized();
        let universe = ctx.processed_market_data().or_else(|| ctx.market_data());

        let mut amounts = Vec::new();
        let mut stocks = Vec::new();
        let mut mutual_funds = Vec::new();
        let mut fixed_deposits = Vec::new();
        for (class, ratio) in normalized.entries() {
            let amount = round2(ratio * monthly_investment);
            if amount <= 0.0 {
                continue;
            }
            amounts.push((class, amount));
            match class {
                AssetClass::Equity => stocks = select_stocks(universe, amount),
                AssetClass::FixedIncome => mutual_funds = select_funds(universe, amount),
                AssetClass::Cash => fixed_deposits = select_deposits(universe, amount),
                // Sin universo de oro: la clase participa sólo con su monto.
                AssetClass::Gold => {}
            }
        }

        let suggested = suggest_instruments(&stocks, &mutual_funds, &fixed_deposits);
        let mut selection = ProductSelection { amounts,
                                               stocks,
                                               mutual_funds,
                                               fixed_deposits,
                                               suggested,
                                               advisor_notes: None };

        if let Some(narrative) = &self.narrative {
            let prompt = selection_prompt(ctx, &selection);
            match narrative.generate(&prompt) {
                Ok(reply) => selection.advisor_notes = extract_advisor_notes(&reply),
                Err(err) => debug!("[stages] narrativa no disponible: {err}"),
            }
        }

        ContextUpdate { selection: Some(selection),
                        ..ContextUpdate::status(StageStatus::ProductsSelected) }
    }
}

/// Inversión mensual vigente: la partición del contexto, o el 95% del
/// disponible recalculado desde el perfil.
fn resolve_monthly_investment(ctx: &PipelineContext) -> Result<f64, String> {
    if let Some(savings) = ctx.savings() {
        return Ok(savings.monthly_investment());
    }
    let profile = ctx.user_profile();
    let income = profile.and_then(|p| p.monthly_income).unwrap_or(0.0);
    let expenses = profile.and_then(|p| p.monthly_expenses).unwrap_or(0.0);
    match SavingsSplit::from_monthly(income, expenses) {
        Ok(split) => Ok(split.monthly_investment()),
        Err(_) => Err("No monthly investment amount available".to_string()),
    }
}

fn select_stocks(universe: Option<&MarketSnapshot>, amount: f64) -> Vec<SelectedStock> {
    let ranked = universe.map(|m| m.top_stocks_by_market_cap(MAX_STOCKS)).unwrap_or_default();
    if ranked.is_empty() {
        return vec![SelectedStock { symbol: "RELIANCE".to_string(),
                                    name: "Reliance Industries".to_string(),
                                    sector: "Conglomerate".to_string(),
                                    investment_amount: amount }];
    }
    let per_stock = round2(amount / ranked.len() as f64);
    ranked.into_iter()
          .map(|s| SelectedStock { symbol: s.symbol,
                                   name: s.name,
                                   sector: s.sector,
                                   investment_amount: per_stock })
          .collect()
}

fn select_funds(universe: Option<&MarketSnapshot>, amount: f64) -> Vec<SelectedFund> {
    let ranked = universe.map(|m| m.top_debt_funds_by_return(MAX_FUNDS)).unwrap_or_default();
    if ranked.is_empty() {
        return vec![SelectedFund { scheme_name: "HDFC Top 100 Fund".to_string(),
                                   category: "Equity".to_string(),
                                   investment_amount: amount }];
    }
    let per_fund = round2(amount / ranked.len() as f64);
    ranked.into_iter()
          .map(|f| SelectedFund { scheme_name: f.scheme_name,
                                  category: f.category,
                                  investment_amount: per_fund })
          .collect()
}

fn select_deposits(universe: Option<&MarketSnapshot>, amount: f64) -> Vec<SelectedDeposit> {
    let ranked = universe.map(|m| m.top_deposits_by_rate(MAX_DEPOSITS)).unwrap_or_default();
    if ranked.is_empty() {
        return vec![SelectedDeposit { bank: "SBI".to_string(),
                                      tenure: "1 year".to_string(),
                                      interest_rate: 6.5,
                                      investment_amount: amount }];
    }
    let per_deposit = round2(amount / ranked.len() as f64);
    ranked.into_iter()
          .map(|d| SelectedDeposit { bank: d.bank,
                                     tenure: d.tenure,
                                     interest_rate: d.interest_rate,
                                     investment_amount: per_deposit })
          .collect()
}

/// Una sugerencia con motivo por cada instrumento elegido, en el orden
/// acciones, fondos, depósitos.
fn suggest_instruments(stocks: &[SelectedStock],
                       funds: &[SelectedFund],
                       deposits: &[SelectedDeposit])
                       -> Vec<SuggestedInstrument> {
    let mut suggested = Vec::with_capacity(stocks.len() + funds.len() + deposits.len());
    for stock in stocks {
        suggested.push(SuggestedInstrument {
            instrument_type: "Stock".to_string(),
            name: stock.name.clone(),
            reason: format!("Selected based on market cap in {} sector", stock.sector),
        });
    }
    for fund in funds {
        suggested.push(SuggestedInstrument {
            instrument_type: "Mutual Fund".to_string(),
            name: fund.scheme_name.clone(),
            reason: format!("Selected based on historical returns in {} category", fund.category),
        });
    }
    for deposit in deposits {
        suggested.push(SuggestedInstrument {
            instrument_type: "Fixed Deposit".to_string(),
            name: deposit.bank.clone(),
            reason: format!("Selected based on interest rate of {}%", deposit.interest_rate),
        });
    }
    suggested
}

/// Texto que recibe el colaborador narrativo: nivel de riesgo, montos por
/// clase y los instrumentos ya elegidos.
fn selection_prompt(ctx: &PipelineContext, selection: &ProductSelection) -> String {
    let tier = ctx.risk_profile().unwrap_or(RiskTier::Medium);
    let mut prompt = String::new();
    prompt.push_str("You are a financial advisor reviewing a monthly investment selection.\n");
    prompt.push_str(&format!("Risk profile: {}\n", tier.key()));
    prompt.push_str("Monthly amounts per asset class:\n");
    for (class, amount) in &selection.amounts {
        prompt.push_str(&format!("- {}: {:.2}\n", class.key(), amount));
    }
    if !selection.stocks.is_empty() {
        prompt.push_str("Stocks: ");
        let names: Vec<&str> = selection.stocks.iter().map(|s| s.name.as_str()).collect();
        prompt.push_str(&names.join(", "));
        prompt.push('\n');
    }
    if !selection.mutual_funds.is_empty() {
        prompt.push_str("Mutual funds: ");
        let names: Vec<&str> = selection.mutual_funds.iter().map(|f| f.scheme_name.as_str()).collect();
        prompt.push_str(&names.join(", "));
        prompt.push('\n');
    }
    if !selection.fixed_deposits.is_empty() {
        prompt.push_str("Fixed deposits: ");
        let names: Vec<&str> = selection.fixed_deposits.iter().map(|d| d.bank.as_str()).collect();
        prompt.push_str(&names.join(", "));
        prompt.push('\n');
    }
    prompt.push_str("Return a JSON object with a single key 'advisor_notes' \
                     containing an array of short strings.\n");
    prompt
}

/// Extrae las notas del asesor de una respuesta libre: toma el texto entre la
/// primera `{` y la última `}`, lo parsea como JSON y lee `advisor_notes`.
/// Cualquier defecto de formato devuelve `None`.
fn extract_advisor_notes(reply: &str) -> Option<Vec<String>> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    let parsed: Value = match serde_json::from_str(&reply[start..=end]) {
        Ok(value) => value,
        Err(err) => {
            debug!("[stages] respuesta narrativa no parseable: {err}");
            return None;
        }
    };
    let notes: Vec<String> = parsed.get("advisor_notes")?
                                   .as_array()?
                                   .iter()
                                   .filter_map(|note| note.as_str().map(|s| s.to_string()))
                                   .collect();
    if notes.is_empty() {
        None
    } else {
        Some(notes)
    }
}
