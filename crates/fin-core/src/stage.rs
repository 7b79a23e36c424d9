use crate::context::{ContextUpdate, PipelineContext};
use crate::status::StageId;

/// Trait que define una etapa. Implementaciones deben ser puras respecto al
/// contexto recibido: mismo contexto, misma actualización.
///
/// Una etapa nunca deja escapar un error de Rust: toda falla interna se
/// convierte en `ContextUpdate::error(..)` con un diagnóstico legible.
pub trait StageDefinition: Send + Sync {
    /// Identidad estable de la etapa dentro del pipeline.
    fn id(&self) -> StageId;

    /// Nombre amigable opcional.
    fn name(&self) -> &str {
        self.id().as_str()
    }

    /// Ejecuta la etapa contra el contexto actual.
    fn run(&self, ctx: &PipelineContext) -> ContextUpdate;
}
