// fin-domain library entry point
pub mod allocation;
pub mod calculator;
pub mod errors;
pub mod hashing;
pub mod market;
pub mod money;
pub mod profile;
pub mod selection;

pub use allocation::{default_allocation, Allocation, AssetClass, ASSET_CLASS_ORDER};
pub use calculator::{ProjectedReturns, SavingsSplit, EMERGENCY_FUND_RATE, INVESTMENT_RATE};
pub use errors::DomainError;
pub use hashing::{payload_hash, to_canonical_json};
pub use market::{FixedDeposit, MarketSnapshot, MutualFund, Stock};
pub use money::{format_inr, format_pct1, round2};
pub use profile::{RiskTier, UserProfile, DEFAULT_FINANCIAL_GOALS, REQUIRED_PROFILE_FIELDS};
pub use selection::{ProductSelection, SelectedDeposit, SelectedFund, SelectedStock,
                    SuggestedInstrument};
