//! fin-providers: colaboradores externos del pipeline y sus dobles en memoria
//!
//! Cada colaborador es un trait object-safe; el pipeline sólo conoce el
//! trait. Las implementaciones en memoria de este crate alimentan demos y
//! tests; las respaldadas por SQLite/archivos viven en `fin-persistence`.
pub mod error;
pub mod market;
pub mod narrative;
pub mod profiles;
pub mod seed;
pub mod store;

pub use error::ProviderError;
pub use market::{CannedMarketData, FailingMarketData, MarketDataProvider};
pub use narrative::{NarrativeProvider, ScriptedNarrative};
pub use profiles::{CannedUserProfiles, UserProfileProvider};
pub use store::{InMemoryRecommendationStore, RecommendationStore};
