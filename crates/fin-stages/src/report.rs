//! Etapa de armado del reporte final.
//!
//! Desnormaliza perfil, asignación, selección y proyección en un solo payload
//! con montos ya formateados en rupias. La etapa no falla: todo insumo
//! ausente degrada a un valor neutro, el enrutamiento previo garantiza que en
//! una corrida sana los insumos están completos.

use log::debug;
use serde_json::{json, Map, Value};

use fin_core::{ContextUpdate, PipelineContext, StageDefinition, StageId, StageStatus};
use fin_domain::{format_inr, format_pct1, round2, RiskTier, DEFAULT_FINANCIAL_GOALS};

pub struct GenerateFinalRecommendationStage;

impl StageDefinition for GenerateFinalRecommendationStage {
    fn id(&self) -> StageId {
        StageId::GenerateFinalRecommendation
    }

    fn run(&self, ctx: &PipelineContext) -> ContextUpdate {
        debug!("[stages] generate_final_recommendation user_id={}", ctx.user_id());
        let profile = ctx.user_profile();
        let name = profile.and_then(|p| p.name.clone())
                          .unwrap_or_else(|| "Investor".to_string());
        let email = profile.and_then(|p| p.email.clone()).unwrap_or_default();
        let income = profile.and_then(|p| p.monthly_income).unwrap_or(0.0);
        let expenses = profile.and_then(|p| p.monthly_expenses).unwrap_or(0.0);
        let goals = match profile {
            Some(p) => p.goals_or_default(),
            None => DEFAULT_FINANCIAL_GOALS.iter().map(|g| g.to_string()).collect(),
        };

        let savings = ctx.savings();
        let disposable = savings.map(|s| s.disposable()).unwrap_or(0.0);
        let emergency_fund = savings.map(|s| s.emergency_fund()).unwrap_or(0.0);
        let monthly_investment = savings.map(|s| s.monthly_investment()).unwrap_or(0.0);

        let risk = ctx.risk_profile().unwrap_or(RiskTier::Medium);
        let horizon = ctx.time_horizon_years().unwrap_or(5);

        let mut allocation_obj = Map::new();
        if let Some(allocation) = ctx.allocation() {
            for (class, ratio) in allocation.entries() {
                if ratio > 0.0 {
                    allocation_obj.insert(class.key().to_string(),
                                          Value::String(format_pct1(ratio)));
                }
            }
        }

        let selection = ctx.selection();
        let stocks: Vec<Value> = selection.map(|s| {
                                              s.stocks
                                               .iter()
                                               .map(|stock| {
                                                   json!({
                                                       "symbol": stock.symbol,
                                                       "name": stock.name,
                                                       "sector": stock.sector,
                                                       "investment_amount":
                                                           format_inr(stock.investment_amount),
                                                   })
                                               })
                                               .collect()
                                          })
                                          .unwrap_or_default();
        let mutual_funds: Vec<Value> = selection.map(|s| {
                                                    s.mutual_funds
                                                     .iter()
                                                     .map(|fund| {
                                                         json!({
                                                             "scheme_name": fund.scheme_name,
                                                             "category": fund.category,
                                                             "investment_amount":
                                                                 format_inr(fund.investment_amount),
                                                         })
                                                     })
                                                     .collect()
                                                })
                                                .unwrap_or_default();
        let fixed_deposits: Vec<Value> =
            selection.map(|s| {
                         s.fixed_deposits
                          .iter()
                          .map(|deposit| {
                              json!({
                                  "bank": deposit.bank,
                                  "tenure": deposit.tenure,
                                  "interest_rate": deposit.interest_rate,
                                  "investment_amount": format_inr(deposit.investment_amount),
                              })
                          })
                          .collect()
                     })
                     .unwrap_or_default();
        let total_allocated = selection.map(total_allocated).unwrap_or(0.0);
        let suggested: Vec<Value> = selection.map(|s| {
                                                 s.suggested
                                                  .iter()
                                                  .map(|item| {
                                                      json!({
                                                          "instrument_type": item.instrument_type,
                                                          "name": item.name,
                                                          "reason": item.reason,
                                                      })
                                                  })
                                                  .collect()
                                             })
                                             .unwrap_or_default();

        let mut returns_obj = Map::new();
        if let Some(projected) = ctx.projected_returns() {
            for (class, annual) in projected.by_class() {
                if *annual > 0.0 {
                    returns_obj.insert(class.key().to_string(),
                                       Value::String(format_inr(*annual)));
                }
            }
            returns_obj.insert("total".to_string(), Value::String(format_inr(projected.total())));
            returns_obj.insert("roi_pct".to_string(),
                               Value::String(format!("{:.2}%", projected.roi_pct())));
        }

        let mut report = json!({
            "personal_info": {
                "name": name,
                "email": email,
                "monthly_income": format_inr(income),
                "monthly_expenses": format_inr(expenses),
                "disposable_income": format_inr(disposable),
            },
            "investment_summary": {
                "emergency_fund": format_inr(emergency_fund),
                "monthly_investment": format_inr(monthly_investment),
                "risk_profile": risk.key(),
                "portfolio_description": ctx.allocation_description().unwrap_or(""),
                "time_horizon_years": horizon,
                "financial_goals": goals,
            },
            "asset_allocation": Value::Object(allocation_obj),
            "selected_investments": {
                "stocks": stocks,
                "mutual_funds": mutual_funds,
                "fixed_deposits": fixed_deposits,
                "total_allocated": format_inr(total_allocated),
            },
            "suggested_instruments": suggested,
            "projected_returns": Value::Object(returns_obj),
        });
        if let Some(notes) = selection.and_then(|s| s.advisor_notes.clone()) {
            if let Some(map) = report.as_object_mut() {
                map.insert("advisor_notes".to_string(), json!(notes));
            }
        }

        let recommendation = json!({
            "status": "success",
            "message": "Investment recommendation generated successfully",
            "report": report,
        });
        ContextUpdate { recommendation: Some(recommendation),
                        ..ContextUpdate::status(StageStatus::RecommendationGenerated) }
    }
}

/// Suma redondeada de los montos repartidos entre instrumentos.
fn total_allocated(selection: &fin_domain::ProductSelection) -> f64 {
    let stocks: f64 = selection.stocks.iter().map(|s| s.investment_amount).sum();
    let funds: f64 = selection.mutual_funds.iter().map(|f| f.investment_amount).sum();
    let deposits: f64 = selection.fixed_deposits.iter().map(|d| d.investment_amount).sum();
    round2(stocks + funds + deposits)
}
