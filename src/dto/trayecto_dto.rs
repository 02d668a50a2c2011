//! DTOs de trayecto

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::trayecto::Trayecto;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTrayectoRequest {
    pub fecha: NaiveDate,
    pub hora_salida: NaiveTime,
    pub hora_llegada: NaiveTime,

    #[validate(range(min = 0, max = 500))]
    pub cantidad_pasajeros: i64,

    #[validate(range(min = 0))]
    pub kilometraje: i64,

    pub observaciones: Option<String>,
    pub ruta_id: Option<String>,
    pub conductor_id: Option<String>,
    pub vehiculo_id: Option<String>,
}

/// Request de actualización parcial; las referencias a ruta, conductor y
/// vehículo no se reasignan por PATCH
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrayectoRequest {
    pub fecha: Option<NaiveDate>,
    pub hora_salida: Option<NaiveTime>,
    pub hora_llegada: Option<NaiveTime>,

    #[validate(range(min = 0, max = 500))]
    pub cantidad_pasajeros: Option<i64>,

    #[validate(range(min = 0))]
    pub kilometraje: Option<i64>,

    pub observaciones: Option<String>,
}

/// Fila cruda del CSV de importación masiva. Las fechas y horas llegan
/// como texto y se validan fila por fila.
#[derive(Debug, Deserialize)]
pub struct TrayectoCsvRow {
    pub fecha: String,
    pub hora_salida: String,
    pub hora_llegada: String,
    pub cantidad_pasajeros: i64,
    pub kilometraje: i64,
    pub observaciones: Option<String>,
    pub ruta_id: Option<String>,
    pub conductor_id: Option<String>,
    pub vehiculo_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrayectoResponse {
    pub id: String,
    pub fecha: NaiveDate,
    pub hora_salida: NaiveTime,
    pub hora_llegada: NaiveTime,
    pub cantidad_pasajeros: i64,
    pub kilometraje: i64,
    pub observaciones: Option<String>,
    pub ruta_id: Option<String>,
    pub conductor_id: Option<String>,
    pub vehiculo_id: Option<String>,
    pub empresa_id: i64,
}

impl From<Trayecto> for TrayectoResponse {
    fn from(trayecto: Trayecto) -> Self {
        Self {
            id: trayecto.id,
            fecha: trayecto.fecha,
            hora_salida: trayecto.hora_salida,
            hora_llegada: trayecto.hora_llegada,
            cantidad_pasajeros: trayecto.cantidad_pasajeros,
            kilometraje: trayecto.kilometraje,
            observaciones: trayecto.observaciones,
            ruta_id: trayecto.ruta_id,
            conductor_id: trayecto.conductor_id,
            vehiculo_id: trayecto.vehiculo_id,
            empresa_id: trayecto.empresa_id,
        }
    }
}

/// Resultado de la importación masiva: filas insertadas y errores por fila
#[derive(Debug, Serialize)]
pub struct BulkImportResponse {
    pub trayectos_insertados: usize,
    pub errores: Vec<String>,
}
