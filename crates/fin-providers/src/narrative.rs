//! Colaborador narrativo (LLM externo).
//!
//! El pipeline le manda un prompt estructurado en texto y recibe texto
//! libre; quien llama es responsable de extraer el JSON embebido y de
//! tolerar respuestas sin JSON alguno. El colaborador es opcional: sin él
//! la selección de productos es puramente determinista.

use crate::error::ProviderError;

pub trait NarrativeProvider: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Doble guionado: devuelve siempre la misma respuesta.
pub struct ScriptedNarrative {
    reply: String,
}

impl ScriptedNarrative {
    pub fn new(reply: impl Into<String>) -> Self {
        ScriptedNarrative { reply: reply.into() }
    }

    /// Respuesta con notas de asesor embebidas en JSON, como las produce el
    /// modelo cuando coopera.
    pub fn with_notes(notes: &[&str]) -> Self {
        let notes_json = serde_json::json!({ "advisor_notes": notes });
        ScriptedNarrative { reply: format!("Here is my assessment:\n{notes_json}\nRegards.") }
    }
}

impl NarrativeProvider for ScriptedNarrative {
    fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_reply_embeds_json() {
        let narrative = ScriptedNarrative::with_notes(&["Diversify beyond banking"]);
        let reply = narrative.generate("whatever").expect("respuesta");
        assert!(reply.contains("advisor_notes"));
        assert!(reply.contains('{') && reply.contains('}'));
    }
}
