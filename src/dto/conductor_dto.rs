//! DTOs de conductor

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::conductor::Conductor;

/// Request de creación; el endpoint de alta recibe una lista de estos
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConductorRequest {
    #[validate(length(min = 2, max = 255))]
    pub nombre: String,

    #[validate(length(min = 5, max = 20))]
    pub cedula: String,

    #[validate(length(min = 1, max = 50))]
    pub licencia: String,

    #[validate(length(min = 7, max = 20))]
    pub telefono: String,

    #[validate(length(min = 1, max = 50))]
    pub estado: String,
}

/// Request de actualización: PUT manda todos los campos, PATCH un subconjunto
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateConductorRequest {
    #[validate(length(min = 2, max = 255))]
    pub nombre: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub cedula: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub licencia: Option<String>,

    #[validate(length(min = 7, max = 20))]
    pub telefono: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub estado: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConductorResponse {
    pub id: String,
    pub nombre: String,
    pub cedula: String,
    pub licencia: String,
    pub telefono: String,
    pub estado: String,
    pub empresa_id: i64,
}

impl From<Conductor> for ConductorResponse {
    fn from(conductor: Conductor) -> Self {
        Self {
            id: conductor.id,
            nombre: conductor.nombre,
            cedula: conductor.cedula,
            licencia: conductor.licencia,
            telefono: conductor.telefono,
            estado: conductor.estado,
            empresa_id: conductor.empresa_id,
        }
    }
}
