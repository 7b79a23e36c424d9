//! Definiciones de eventos de corrida y trait EventStore.

mod store;
mod types;

pub use store::EventStore;
pub use store::InMemoryEventStore;
pub use types::{RunEvent, RunEventKind};
