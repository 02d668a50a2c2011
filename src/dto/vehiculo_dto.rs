//! DTOs de vehículo

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehiculo::Vehiculo;

/// Request de creación; el endpoint de alta recibe una lista de estos
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehiculoRequest {
    #[validate(length(min = 1, max = 100))]
    pub marca: String,

    #[validate(length(min = 3, max = 10))]
    pub placa: String,

    #[validate(length(min = 1, max = 100))]
    pub modelo: String,

    #[validate(length(min = 1, max = 20))]
    pub lateral: String,

    #[validate(range(min = 1950, max = 2100))]
    pub anio_fabricacion: i64,

    #[validate(range(min = 1, max = 200))]
    pub capacidad_pasajeros: i64,

    #[validate(length(min = 1, max = 50))]
    pub estado_operativo: String,
}

/// Request de actualización: PUT manda todos los campos, PATCH un subconjunto
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehiculoRequest {
    #[validate(length(min = 1, max = 100))]
    pub marca: Option<String>,

    #[validate(length(min = 3, max = 10))]
    pub placa: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub modelo: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub lateral: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    pub anio_fabricacion: Option<i64>,

    #[validate(range(min = 1, max = 200))]
    pub capacidad_pasajeros: Option<i64>,

    #[validate(length(min = 1, max = 50))]
    pub estado_operativo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VehiculoResponse {
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

impl From<Vehiculo> for VehiculoResponse {
    fn from(vehiculo: Vehiculo) -> Self {
        Self {
            id: vehiculo.id,
            marca: vehiculo.marca,
            placa: vehiculo.placa,
            modelo: vehiculo.modelo,
            lateral: vehiculo.lateral,
            anio_fabricacion: vehiculo.anio_fabricacion,
            capacidad_pasajeros: vehiculo.capacidad_pasajeros,
            estado_operativo: vehiculo.estado_operativo,
            empresa_id: vehiculo.empresa_id,
        }
    }
}
