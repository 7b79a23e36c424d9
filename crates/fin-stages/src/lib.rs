//! fin-stages: las trece etapas del pipeline de recomendación
//!
//! Cada etapa implementa `StageDefinition` del core y lee/escribe el
//! `PipelineContext` acumulador. Las etapas con colaboradores externos
//! (perfiles, mercado, narrativa, persistencia) los reciben como trait
//! objects de `fin-providers`, así los tests las ejercitan con dobles en
//! memoria y la CLI con implementaciones respaldadas por SQLite.
//!
//! `assemble::build_pipeline` registra las etapas en el orden nominal y
//! devuelve un motor listo para `run(user_id)`.
pub mod assemble;
pub mod fallback;
pub mod market;
pub mod persist;
pub mod products;
pub mod profile;
pub mod report;
pub mod returns;
pub mod risk;
pub mod savings;

pub use assemble::{build_pipeline, build_pipeline_with_events, PipelineHandles};
pub use fallback::{GenerateFallbackRecommendationStage, HandleErrorStage};
pub use market::{FetchMarketDataStage, PreprocessMarketDataStage};
pub use persist::PersistRecommendationStage;
pub use products::SelectInvestmentProductsStage;
pub use profile::{CheckProfileCompletenessStage, FetchUserProfileStage};
pub use report::GenerateFinalRecommendationStage;
pub use returns::CalculateReturnsStage;
pub use risk::{tier_or_default, AnalyzeGoalsAndRiskStage, DefineRiskBasedAllocationStage};
pub use savings::CalculateEmergencyFundStage;
