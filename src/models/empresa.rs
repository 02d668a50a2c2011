//! Modelo de Empresa
//!
//! La empresa es la unidad de aislamiento de datos: cada una tiene su
//! propia base de flota y es dueña de sus usuarios, conductores,
//! vehículos, rutas y trayectos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Empresa registrada en el directorio global
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Empresa {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub nit: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}
