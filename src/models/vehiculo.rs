//! Modelo de Vehículo

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehículo de la flota, identificado naturalmente por su placa
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehiculo {
    pub id: String,
    pub marca: String,
    pub placa: String,
    pub modelo: String,
    pub lateral: String,
    pub anio_fabricacion: i64,
    pub capacidad_pasajeros: i64,
    pub estado_operativo: String,
    pub empresa_id: i64,
}
