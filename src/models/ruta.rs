//! Modelo de Ruta

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Ruta de servicio, identificada naturalmente por su código
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ruta {
    pub id: String,
    pub nombre: String,
    pub codigo: String,
    pub origen: String,
    pub destino: String,
    /// Duración estimada en minutos
    pub duracion_estimada: i64,
    pub empresa_id: i64,
}
