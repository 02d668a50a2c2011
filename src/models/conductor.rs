//! Modelo de Conductor

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Conductor de la flota, identificado naturalmente por su cédula
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conductor {
    pub id: String,
    pub nombre: String,
    pub cedula: String,
    pub licencia: String,
    pub telefono: String,
    pub estado: String,
    pub empresa_id: i64,
}
