//! fin-core: Motor de pipeline por etapas con ruteo por estado
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod event;
pub mod router;
pub mod stage;
pub mod status;

pub use context::{ContextUpdate, PipelineContext};
pub use engine::{PipelineEngine, RunOutcome};
pub use errors::EngineError;
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use router::{route, Route};
pub use stage::StageDefinition;
pub use status::{StageId, StageStatus};
