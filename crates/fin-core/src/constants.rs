//! Constantes del motor.

/// Versión lógica del motor. Viaja en los payloads de diagnóstico para poder
/// correlacionar corridas con la versión del ruteo vigente.
pub const ENGINE_VERSION: &str = "F1.0";

/// Factor del presupuesto de saltos: el motor aborta si una corrida ejecuta
/// más de `factor × etapas registradas` etapas. La tabla de ruteo es acíclica
/// salvo por los desvíos a manejo de error, así que alcanzarlo es un bug.
pub const HOP_BUDGET_FACTOR: usize = 2;
