//! DTOs de ruta

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ruta::Ruta;

/// Request de creación; el endpoint de alta recibe una lista de estos
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRutaRequest {
    #[validate(length(min = 2, max = 255))]
    pub nombre: String,

    #[validate(length(min = 1, max = 20))]
    pub codigo: String,

    #[validate(length(min = 1, max = 255))]
    pub origen: String,

    #[validate(length(min = 1, max = 255))]
    pub destino: String,

    #[validate(range(min = 1, max = 1440))]
    pub duracion_estimada: i64,
}

/// Request de actualización: PUT manda todos los campos, PATCH un subconjunto
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRutaRequest {
    #[validate(length(min = 2, max = 255))]
    pub nombre: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub codigo: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub origen: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub destino: Option<String>,

    #[validate(range(min = 1, max = 1440))]
    pub duracion_estimada: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RutaResponse {
    pub id: String,
    pub nombre: String,
    pub codigo: String,
    pub origen: String,
    pub destino: String,
    pub duracion_estimada: i64,
    pub empresa_id: i64,
}

impl From<Ruta> for RutaResponse {
    fn from(ruta: Ruta) -> Self {
        Self {
            id: ruta.id,
            nombre: ruta.nombre,
            codigo: ruta.codigo,
            origen: ruta.origen,
            destino: ruta.destino,
            duracion_estimada: ruta.duracion_estimada,
            empresa_id: ruta.empresa_id,
        }
    }
}
